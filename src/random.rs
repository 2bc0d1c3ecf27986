//! 安全随机数生成模块
//!
//! 提供密码学安全的随机字节生成与常量时间比较,用于生成共享密钥材料
//! 以及比对一次性密码。

use rand::{TryRngCore, rngs::OsRng};

use crate::error::{Error, Result};

/// 生成指定长度的随机字节数组
///
/// 使用操作系统提供的密码学安全随机数生成器 (CSPRNG)。熵源取数失败时
/// 立即返回错误,由调用方决定是否重试。
///
/// # Arguments
///
/// * `length` - 要生成的字节数
///
/// # Returns
///
/// 返回包含随机字节的 `Vec<u8>`
///
/// # Example
///
/// ```rust
/// use otprs::random::generate_random_bytes;
///
/// let bytes = generate_random_bytes(20).unwrap();
/// assert_eq!(bytes.len(), 20);
/// ```
pub fn generate_random_bytes(length: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::primitive_unavailable(format!("entropy source failed: {:?}", e)))?;
    Ok(bytes)
}

/// 常量时间比较两个字节切片
///
/// 用于防止时序攻击
///
/// # Arguments
///
/// * `a` - 第一个字节切片
/// * `b` - 第二个字节切片
///
/// # Returns
///
/// 如果两个切片相等返回 true
///
/// # Example
///
/// ```rust
/// use otprs::random::constant_time_compare;
///
/// assert!(constant_time_compare(b"755224", b"755224"));
/// assert!(!constant_time_compare(b"755224", b"287082"));
/// ```
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

/// 常量时间比较两个字符串
///
/// # Arguments
///
/// * `a` - 第一个字符串
/// * `b` - 第二个字符串
///
/// # Returns
///
/// 如果两个字符串相等返回 true
pub fn constant_time_compare_str(a: &str, b: &str) -> bool {
    constant_time_compare(a.as_bytes(), b.as_bytes())
}
