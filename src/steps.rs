//! 生成流水线步骤追踪模块
//!
//! 把一次 TOTP 生成的全部中间状态暴露给渲染层:密钥的两种表示、
//! 时间计数器、真实的 HMAC 摘要、动态截断的偏移与截断值,直到最终
//! 验证码。所有值都来自同一趟真实流水线,不存在任何占位展示值。

use serde::Serialize;

use crate::error::Result;
use crate::hotp::{dynamic_truncate, format_code, hmac_digest};
use crate::secret::OtpSecret;
use crate::totp::{TotpManager, current_timestamp, seconds_remaining, time_counter};

/// 一次 TOTP 生成的完整中间状态
///
/// 序列化后交给外部展示层逐步渲染。
#[derive(Debug, Clone, Serialize)]
pub struct TotpSteps {
    /// 密钥的规范 Base32 表示
    pub secret_base32: String,

    /// 密钥字节的大写十六进制表示
    pub secret_hex: String,

    /// 本次生成使用的 Unix 时间戳
    pub unix_timestamp: u64,

    /// 当前时间步的剩余秒数
    pub seconds_remaining: u64,

    /// 移动因子计数器
    pub time_counter: u64,

    /// 计数器的 8 字节大端十六进制表示,也就是 HMAC 的消息
    pub time_counter_hex: String,

    /// HMAC-SHA1 摘要,40 个大写十六进制字符
    pub hmac_hex: String,

    /// 动态截断选中的字节偏移(摘要末字节低 4 位)
    pub offset: usize,

    /// 从偏移处读出的 4 字节,最高位已清零
    pub truncated_hex: String,

    /// 31 位截断值
    pub truncated_value: u32,

    /// 最终验证码
    pub otp: String,
}

impl TotpManager {
    /// 追踪当前时刻的一次完整验证码生成
    pub fn generate_steps(&self, secret: &OtpSecret) -> Result<TotpSteps> {
        self.generate_steps_at(secret, current_timestamp())
    }

    /// 追踪指定时间戳下的一次完整验证码生成
    ///
    /// `otp` 字段与 [`TotpManager::generate_code_at`] 在相同输入下的
    /// 结果一致,其余字段是得到它的每一步中间值。
    pub fn generate_steps_at(&self, secret: &OtpSecret, unix_seconds: u64) -> Result<TotpSteps> {
        let config = self.config();
        config.validate()?;

        let counter = time_counter(unix_seconds, config.step_seconds);
        let digest = hmac_digest(secret.raw(), counter)?;
        let (offset, value) = dynamic_truncate(&digest);
        let otp = format_code(value, config.digits);

        Ok(TotpSteps {
            secret_base32: secret.base32().to_string(),
            secret_hex: hex_upper(secret.raw()),
            unix_timestamp: unix_seconds,
            seconds_remaining: seconds_remaining(unix_seconds, config.step_seconds),
            time_counter: counter,
            time_counter_hex: format!("{:016X}", counter),
            hmac_hex: hex_upper(&digest),
            offset,
            truncated_hex: format!("{:08X}", value),
            truncated_value: value,
            otp,
        })
    }
}

// ============================================================================
// 辅助函数
// ============================================================================

/// 将字节序列编码为大写十六进制字符串
fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
