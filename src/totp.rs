//! TOTP (基于时间的一次性密码) 实现模块
//!
//! 提供 TOTP 的生成、验证和管理功能,兼容 Google Authenticator、Authy 等应用。
//!
//! ## 特性
//!
//! - 符合 RFC 6238 标准,HMAC-SHA1 摘要
//! - 支持自定义时间步长、位数与漂移窗口
//! - 生成 otpauth:// 密钥配置 URI
//! - 所有操作都有显式时间戳变体,便于确定性测试
//!
//! ## 示例
//!
//! ```rust
//! use otprs::totp::{TotpConfig, TotpManager};
//!
//! // 创建 TOTP 管理器
//! let manager = TotpManager::new(TotpConfig::default());
//!
//! // 为用户生成密钥
//! let secret = manager.generate_secret().unwrap();
//!
//! // 生成当前验证码
//! let code = manager.generate_code(&secret).unwrap();
//!
//! // 验证用户输入的码
//! let is_valid = manager.verify(&secret, &code).unwrap();
//! assert!(is_valid);
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};
use crate::hotp::{dynamic_truncate, format_code, hmac_digest};
use crate::random::constant_time_compare;
use crate::secret::{DEFAULT_SECRET_LENGTH, OtpSecret};

/// 由 Unix 时间戳导出移动因子计数器
///
/// 即 RFC 6238 的 `T = floor(unix_seconds / step_seconds)`。
///
/// # Example
///
/// ```rust
/// use otprs::totp::time_counter;
///
/// assert_eq!(time_counter(59, 30), 1);
/// assert_eq!(time_counter(60, 30), 2);
/// ```
pub fn time_counter(unix_seconds: u64, step_seconds: u64) -> u64 {
    unix_seconds / step_seconds.max(1)
}

/// 当前验证码在本时间步内的剩余秒数
///
/// 取 `step_seconds - (unix_seconds mod step_seconds)`;恰好落在步长
/// 边界时余数为 0,结果是完整的 `step_seconds` 而不是 0。
///
/// # Example
///
/// ```rust
/// use otprs::totp::seconds_remaining;
///
/// assert_eq!(seconds_remaining(29, 30), 1);
/// assert_eq!(seconds_remaining(30, 30), 30);
/// ```
pub fn seconds_remaining(unix_seconds: u64, step_seconds: u64) -> u64 {
    let step = step_seconds.max(1);
    step - (unix_seconds % step)
}

/// TOTP 配置
///
/// 纯数据,显式传入每次生成与验证调用,没有任何库级全局状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpConfig {
    /// 验证码位数,默认 6 位
    pub digits: u32,

    /// 时间步长(秒),默认 30 秒
    pub step_seconds: u64,

    /// 允许的时间漂移窗口(前后各多少个时间步),默认为 1,
    /// 即允许前后各 `step_seconds` 秒的误差
    pub window: u64,

    /// 密钥长度(字节),默认 20 字节(160 位)
    pub secret_length: usize,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            step_seconds: 30,
            window: 1,
            secret_length: DEFAULT_SECRET_LENGTH,
        }
    }
}

impl TotpConfig {
    /// 创建新的配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置验证码位数
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// 设置时间步长
    pub fn with_step_seconds(mut self, seconds: u64) -> Self {
        self.step_seconds = seconds;
        self
    }

    /// 设置时间漂移窗口
    pub fn with_window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }

    /// 设置密钥长度
    pub fn with_secret_length(mut self, length: usize) -> Self {
        self.secret_length = length;
        self
    }

    /// 创建高安全性配置:8 位验证码,不容忍漂移,32 字节密钥
    pub fn high_security() -> Self {
        Self {
            digits: 8,
            step_seconds: 30,
            window: 0,
            secret_length: 32,
        }
    }

    /// 校验配置
    ///
    /// `digits` 或 `step_seconds` 为零时返回
    /// [`Error::InvalidConfiguration`]。窗口是无符号计数,负值在类型层面
    /// 不可表示。每次生成或验证前都会执行。
    pub fn validate(&self) -> Result<()> {
        if self.digits == 0 {
            return Err(Error::invalid_configuration("digits", "must be positive"));
        }
        if self.step_seconds == 0 {
            return Err(Error::invalid_configuration(
                "step_seconds",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// TOTP 管理器
#[derive(Debug, Clone)]
pub struct TotpManager {
    config: TotpConfig,
}

impl TotpManager {
    /// 创建新的 TOTP 管理器
    pub fn new(config: TotpConfig) -> Self {
        Self { config }
    }

    /// 使用默认配置创建管理器
    pub fn default_manager() -> Self {
        Self::new(TotpConfig::default())
    }

    /// 生成新的 TOTP 密钥
    pub fn generate_secret(&self) -> Result<OtpSecret> {
        OtpSecret::generate(self.config.secret_length)
    }

    /// 生成当前时刻的 TOTP 验证码
    pub fn generate_code(&self, secret: &OtpSecret) -> Result<String> {
        self.generate_code_at(secret, current_timestamp())
    }

    /// 生成指定时间戳的 TOTP 验证码
    ///
    /// 对同一组 (密钥, 时间戳, 配置) 输入,输出是确定的,
    /// 内部不再读取时钟或任何随机源。
    pub fn generate_code_at(&self, secret: &OtpSecret, unix_seconds: u64) -> Result<String> {
        self.config.validate()?;
        let counter = time_counter(unix_seconds, self.config.step_seconds);
        let digest = hmac_digest(secret.raw(), counter)?;
        let (_, value) = dynamic_truncate(&digest);
        Ok(format_code(value, self.config.digits))
    }

    /// 验证 TOTP 验证码
    pub fn verify(&self, secret: &OtpSecret, code: &str) -> Result<bool> {
        self.verify_at(secret, code, current_timestamp())
    }

    /// 在指定时间戳验证 TOTP 验证码
    ///
    /// 以当前计数器 `C` 为中心,逐个比对 `C-window ..= C+window`
    /// (下边界在 0 处饱和),任一命中即有效。返回值只说明是否有效,
    /// 不暴露命中的是哪个偏移;每个候选都用常量时间比较。
    pub fn verify_at(&self, secret: &OtpSecret, code: &str, unix_seconds: u64) -> Result<bool> {
        self.config.validate()?;

        // 规范化输入码
        let normalized_code = code.replace([' ', '-'], "");

        // 检查码的长度
        if normalized_code.len() != self.config.digits as usize {
            return Ok(false);
        }

        let base_counter = time_counter(unix_seconds, self.config.step_seconds);
        let start = base_counter.saturating_sub(self.config.window);
        let end = base_counter.saturating_add(self.config.window);

        let mut valid = false;
        for check_counter in start..=end {
            let digest = hmac_digest(secret.raw(), check_counter)?;
            let (_, value) = dynamic_truncate(&digest);
            let expected_code = format_code(value, self.config.digits);

            if constant_time_compare(normalized_code.as_bytes(), expected_code.as_bytes()) {
                valid = true;
            }
        }

        Ok(valid)
    }

    /// 生成 otpauth://totp/ 密钥配置 URI
    ///
    /// 此 URI 可用于生成二维码,供认证器应用扫描。格式为
    /// `otpauth://totp/{issuer}:{account}?secret=..&issuer=..&digits=..&period=..`,
    /// 标签与签发者分别做百分号编码。账户标签为空时返回
    /// [`Error::InvalidLabel`]。
    pub fn key_uri(&self, secret: &OtpSecret, account: &str, issuer: &str) -> Result<String> {
        if account.is_empty() {
            return Err(Error::invalid_label("account label must not be empty"));
        }
        Ok(format!(
            "otpauth://totp/{}:{}?secret={}&issuer={}&digits={}&period={}",
            urlencoding::encode(issuer),
            urlencoding::encode(account),
            secret.base32(),
            urlencoding::encode(issuer),
            self.config.digits,
            self.config.step_seconds
        ))
    }

    /// 获取当前验证码的剩余有效时间(秒)
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining_at(current_timestamp())
    }

    /// 获取指定时间戳下验证码的剩余有效时间(秒)
    pub fn time_remaining_at(&self, unix_seconds: u64) -> u64 {
        seconds_remaining(unix_seconds, self.config.step_seconds)
    }

    /// 获取配置
    pub fn config(&self) -> &TotpConfig {
        &self.config
    }
}

// ============================================================================
// 内部方法
// ============================================================================

/// 获取当前 Unix 时间戳
pub(crate) fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
