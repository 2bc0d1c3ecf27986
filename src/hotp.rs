//! HOTP (基于计数器的一次性密码) 实现模块
//!
//! 提供符合 RFC 4226 的 HOTP 生成与验证,以及拆分成独立步骤的
//! 生成流水线:HMAC 摘要、动态截断、十进制格式化。
//!
//! ## 特性
//!
//! - 符合 RFC 4226 标准,HMAC-SHA1 摘要
//! - 支持自定义位数
//! - 支持计数器前向同步窗口
//!
//! ## 示例
//!
//! ```rust
//! use otprs::hotp::{HotpConfig, HotpGenerator};
//!
//! // 创建 HOTP 生成器
//! let generator = HotpGenerator::new(HotpConfig::default());
//!
//! // 生成密钥
//! let secret = generator.generate_secret().unwrap();
//!
//! // 生成指定计数器的验证码
//! let code = generator.generate(&secret, 0).unwrap();
//!
//! // 验证用户输入的码
//! let (is_valid, next_counter) = generator.verify(&secret, &code, 0).unwrap();
//! assert!(is_valid);
//! assert_eq!(next_counter, 1);
//! ```

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{Error, Result};
use crate::random::constant_time_compare;
use crate::secret::{DEFAULT_SECRET_LENGTH, OtpSecret};

/// HMAC-SHA1 摘要长度(字节)
pub const DIGEST_LENGTH: usize = 20;

/// HOTP 配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotpConfig {
    /// 验证码位数,默认 6 位
    pub digits: u32,

    /// 同步窗口大小(向前查找的计数器数量)
    pub look_ahead_window: u64,

    /// 密钥长度(字节),默认 20 字节(160 位)
    pub secret_length: usize,
}

impl Default for HotpConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            look_ahead_window: 10,
            secret_length: DEFAULT_SECRET_LENGTH,
        }
    }
}

impl HotpConfig {
    /// 创建新的配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置验证码位数
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// 设置同步窗口大小
    pub fn with_look_ahead_window(mut self, window: u64) -> Self {
        self.look_ahead_window = window;
        self
    }

    /// 设置密钥长度
    pub fn with_secret_length(mut self, length: usize) -> Self {
        self.secret_length = length;
        self
    }

    /// 校验配置
    ///
    /// `digits` 为零时返回 [`Error::InvalidConfiguration`]。
    /// 每次生成或验证前都会执行,无效配置不可能悄悄产出验证码。
    pub fn validate(&self) -> Result<()> {
        if self.digits == 0 {
            return Err(Error::invalid_configuration("digits", "must be positive"));
        }
        Ok(())
    }
}

/// HOTP 验证结果
#[derive(Debug, Clone)]
pub struct HotpVerifyResult {
    /// 是否验证成功
    pub valid: bool,

    /// 匹配时的计数器值(如果验证成功)
    pub matched_counter: Option<u64>,

    /// 建议的下一个计数器值,供调用方重新同步
    pub next_counter: u64,
}

/// HOTP 生成器
#[derive(Debug, Clone)]
pub struct HotpGenerator {
    config: HotpConfig,
}

impl HotpGenerator {
    /// 创建新的 HOTP 生成器
    pub fn new(config: HotpConfig) -> Self {
        Self { config }
    }

    /// 使用默认配置创建生成器
    pub fn default_generator() -> Self {
        Self::new(HotpConfig::default())
    }

    /// 生成新的 HOTP 密钥
    pub fn generate_secret(&self) -> Result<OtpSecret> {
        OtpSecret::generate(self.config.secret_length)
    }

    /// 生成 HOTP 验证码
    ///
    /// 对同一组 (密钥, 计数器, 配置) 输入,输出是确定的。
    ///
    /// # 参数
    ///
    /// * `secret` - 密钥
    /// * `counter` - 计数器值
    ///
    /// # 返回
    ///
    /// 返回生成的验证码字符串,长度恰为 `digits` 位
    pub fn generate(&self, secret: &OtpSecret, counter: u64) -> Result<String> {
        self.config.validate()?;
        let digest = hmac_digest(secret.raw(), counter)?;
        let (_, value) = dynamic_truncate(&digest);
        Ok(format_code(value, self.config.digits))
    }

    /// 验证 HOTP 验证码
    ///
    /// # 参数
    ///
    /// * `secret` - 密钥
    /// * `code` - 用户输入的验证码
    /// * `counter` - 当前计数器值
    ///
    /// # 返回
    ///
    /// 返回 (是否有效, 新的计数器值)
    pub fn verify(&self, secret: &OtpSecret, code: &str, counter: u64) -> Result<(bool, u64)> {
        let result = self.verify_with_result(secret, code, counter)?;
        Ok((result.valid, result.next_counter))
    }

    /// 验证 HOTP 验证码并返回详细结果
    ///
    /// 在 `counter ..= counter + look_ahead_window` 范围内逐个比对,
    /// 命中后给出匹配位置与建议的下一个计数器值(RFC 4226 重同步协议)。
    pub fn verify_with_result(
        &self,
        secret: &OtpSecret,
        code: &str,
        counter: u64,
    ) -> Result<HotpVerifyResult> {
        self.config.validate()?;

        // 规范化输入码
        let normalized_code = code.replace([' ', '-'], "");

        // 检查码的长度
        if normalized_code.len() != self.config.digits as usize {
            return Ok(HotpVerifyResult {
                valid: false,
                matched_counter: None,
                next_counter: counter,
            });
        }

        // 在同步窗口内检查
        for offset in 0..=self.config.look_ahead_window {
            let check_counter = counter.saturating_add(offset);
            let expected_code = self.generate(secret, check_counter)?;

            if constant_time_compare(normalized_code.as_bytes(), expected_code.as_bytes()) {
                return Ok(HotpVerifyResult {
                    valid: true,
                    matched_counter: Some(check_counter),
                    next_counter: check_counter.saturating_add(1),
                });
            }
        }

        Ok(HotpVerifyResult {
            valid: false,
            matched_counter: None,
            next_counter: counter,
        })
    }

    /// 生成 otpauth://hotp/ 密钥配置 URI
    ///
    /// 此 URI 可用于生成二维码,供认证器应用扫描。账户标签为空时
    /// 返回 [`Error::InvalidLabel`]。
    pub fn key_uri(
        &self,
        secret: &OtpSecret,
        account: &str,
        issuer: &str,
        counter: u64,
    ) -> Result<String> {
        if account.is_empty() {
            return Err(Error::invalid_label("account label must not be empty"));
        }
        Ok(format!(
            "otpauth://hotp/{}:{}?secret={}&issuer={}&digits={}&counter={}",
            urlencoding::encode(issuer),
            urlencoding::encode(account),
            secret.base32(),
            urlencoding::encode(issuer),
            self.config.digits,
            counter
        ))
    }

    /// 获取配置
    pub fn config(&self) -> &HotpConfig {
        &self.config
    }
}

// ============================================================================
// RFC 4226 生成流水线
// ============================================================================

/// 计算一次 HMAC-SHA1 摘要
///
/// 计数器按 RFC 4226 编码为 8 字节大端整数作为消息,密钥字节作为
/// HMAC 密钥。底层 keyed-hash 原语拒绝密钥时返回
/// [`Error::PrimitiveUnavailable`]。
pub fn hmac_digest(secret: &[u8], counter: u64) -> Result<[u8; DIGEST_LENGTH]> {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret)
        .map_err(|_| Error::primitive_unavailable("hmac-sha1 rejected the key"))?;
    mac.update(&counter.to_be_bytes());
    Ok(mac.finalize().into_bytes().into())
}

/// RFC 4226 §5.3 动态截断
///
/// 偏移取摘要最后一字节的低 4 位,从该偏移起读 4 字节大端整数,
/// 清掉最高位得到 31 位非负值。返回 (偏移, 截断值)。
pub fn dynamic_truncate(digest: &[u8; DIGEST_LENGTH]) -> (usize, u32) {
    let offset = (digest[DIGEST_LENGTH - 1] & 0x0f) as usize;
    let value = ((digest[offset] & 0x7f) as u32) << 24
        | (digest[offset + 1] as u32) << 16
        | (digest[offset + 2] as u32) << 8
        | (digest[offset + 3] as u32);
    (offset, value)
}

/// 把截断值约减并格式化为固定位数的十进制验证码
///
/// 取 `value mod 10^digits`,左侧补零到恰好 `digits` 个字符,
/// 前导零必须保留。
pub fn format_code(value: u32, digits: u32) -> String {
    let modulo = 10u64.checked_pow(digits).unwrap_or(u64::MAX);
    let code = u64::from(value) % modulo;
    format!("{:0width$}", code, width = digits as usize)
}
