//! 共享密钥模块
//!
//! OTP 共享密钥同时持有原始字节与规范 Base32 表示,创建后不可变。
//! 引擎从不持久化密钥,所有权完全归调用方(UI 会话、测试夹具等)。

use crate::base32;
use crate::error::{Error, Result};
use crate::random;

/// 默认密钥长度(字节),即 RFC 4226 建议的 160 比特最低强度
pub const DEFAULT_SECRET_LENGTH: usize = 20;

/// OTP 共享密钥
///
/// 两种表示始终保持一致:`raw` 是参与 HMAC 计算的字节,
/// `base32` 是用于展示、录入与 otpauth URI 的规范编码(大写、无填充)。
///
/// # Example
///
/// ```rust
/// use otprs::secret::OtpSecret;
///
/// let secret = OtpSecret::from_bytes(b"12345678901234567890".to_vec()).unwrap();
/// assert_eq!(secret.base32(), "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ");
///
/// let restored = OtpSecret::from_base32(secret.base32()).unwrap();
/// assert_eq!(restored, secret);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSecret {
    raw: Vec<u8>,
    base32: String,
}

impl OtpSecret {
    /// 从原始字节创建密钥
    ///
    /// 空字节序列被拒绝,返回 [`Error::InvalidSecret`]。
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::invalid_secret("secret must not be empty"));
        }
        let base32 = base32::encode(&bytes);
        Ok(Self { raw: bytes, base32 })
    }

    /// 从 Base32 文本恢复密钥
    ///
    /// 输入先按 [`base32::canonicalize`] 清理(统一大写、忽略填充与
    /// 字母表外字符)。清理后解不出任何字节时返回
    /// [`Error::InvalidSecret`]。
    pub fn from_base32(text: &str) -> Result<Self> {
        let raw = base32::decode(text);
        if raw.is_empty() {
            return Err(Error::invalid_secret(
                "secret contains no decodable base32 data",
            ));
        }
        Self::from_bytes(raw)
    }

    /// 用系统 CSPRNG 生成新的随机密钥
    ///
    /// `byte_length` 通常取 [`DEFAULT_SECRET_LENGTH`];传 0 会因密钥
    /// 为空而被拒绝。熵源不可用时返回 [`Error::PrimitiveUnavailable`]。
    ///
    /// # Example
    ///
    /// ```rust
    /// use otprs::secret::{OtpSecret, DEFAULT_SECRET_LENGTH};
    ///
    /// let secret = OtpSecret::generate(DEFAULT_SECRET_LENGTH).unwrap();
    /// assert_eq!(secret.byte_length(), 20);
    /// ```
    pub fn generate(byte_length: usize) -> Result<Self> {
        let bytes = random::generate_random_bytes(byte_length)?;
        Self::from_bytes(bytes)
    }

    /// 原始密钥字节
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// 规范 Base32 表示
    pub fn base32(&self) -> &str {
        &self.base32
    }

    /// 密钥长度(字节)
    pub fn byte_length(&self) -> usize {
        self.raw.len()
    }
}
