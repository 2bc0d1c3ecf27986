//! Base32 编解码模块 (RFC 4648)
//!
//! 提供共享密钥的 Base32 编解码。编码输出大写且不带 `=` 填充;
//! 解码是宽容的:先统一为大写,忽略 `=` 与字母表之外的字符,
//! 末尾不足一字节的比特位按 5 比特/8 比特错位产生的填充丢弃。
//!
//! 编解码本身从不报错;"完全不含有效字符" 的拒绝由密钥层
//! ([`crate::secret::OtpSecret::from_base32`]) 负责。

use base32::{Alphabet, decode as base32_decode, encode as base32_encode};

/// RFC 4648 字母表 `A-Z2-7`,不输出填充
const BASE32_ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };

/// 将字节序列编码为 Base32 字符串
///
/// 按完整比特流自高位起每 5 比特一组查表,最后一组不足 5 比特时
/// 右侧补零后查表。不输出 `=` 填充字符。
///
/// # Example
///
/// ```rust
/// use otprs::base32;
///
/// assert_eq!(base32::encode(b"1234567890"), "GEZDGNBVGY3TQOJQ");
/// assert_eq!(base32::encode(&[]), "");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    base32_encode(BASE32_ALPHABET, bytes)
}

/// 将 Base32 文本解码为字节序列
///
/// 先做规范化(见 [`canonicalize`]),再把每个字符映射回 5 比特值,
/// 按位拼接并截断到整字节。末尾不足 8 比特的部分是编码填充而非数据,
/// 直接丢弃。
///
/// 输入中不含任何有效字符时返回空向量,不报错。
///
/// # Example
///
/// ```rust
/// use otprs::base32;
///
/// assert_eq!(base32::decode("GEZDGNBVGY3TQOJQ"), b"1234567890");
/// // 小写、填充与分隔符都被容忍
/// assert_eq!(base32::decode("gezd gnbv-gy3t qojq=="), b"1234567890");
/// ```
pub fn decode(text: &str) -> Vec<u8> {
    let canonical = canonicalize(text);
    base32_decode(BASE32_ALPHABET, &canonical).unwrap_or_default()
}

/// 将 Base32 文本规范化为大写无填充形式
///
/// 统一为大写,丢弃 `=` 以及一切不在 `A-Z2-7` 字母表中的字符。
/// 这是解码前的清理步骤,也用于把用户输入的密钥还原为规范表示。
///
/// # Example
///
/// ```rust
/// use otprs::base32;
///
/// assert_eq!(base32::canonicalize("gezd gnbv="), "GEZDGNBV");
/// ```
pub fn canonicalize(text: &str) -> String {
    text.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|&c| is_base32_char(c))
        .collect()
}

/// 判断字符是否属于 RFC 4648 字母表
fn is_base32_char(c: char) -> bool {
    matches!(c, 'A'..='Z' | '2'..='7')
}
