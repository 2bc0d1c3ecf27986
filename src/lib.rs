//! # OtpRS
//!
//! 一个符合 RFC 4226 / RFC 6238 的一次性密码引擎。
//!
//! ## 功能特性
//!
//! - **HOTP**: 基于计数器的一次性密码,含前向同步窗口验证
//! - **TOTP**: 基于时间的一次性密码,含漂移窗口验证
//! - **Base32 编解码**: RFC 4648 字母表,对用户输入宽容解码
//! - **密钥生成**: 密码学安全的随机密钥与规范 Base32 表示
//! - **otpauth URI**: 生成认证器应用可扫描的密钥配置 URI
//! - **步骤追踪**: 暴露一次生成的全部真实中间值,供展示层渲染
//!
//! ## TOTP 示例
//!
//! ```rust
//! use otprs::{TotpConfig, TotpManager};
//!
//! let manager = TotpManager::new(TotpConfig::default());
//!
//! // 为用户生成密钥,供认证器应用扫描
//! let secret = manager.generate_secret().unwrap();
//! let uri = manager.key_uri(&secret, "user@example.com", "MyApp").unwrap();
//! assert!(uri.starts_with("otpauth://totp/"));
//!
//! // 登录时验证用户输入的码
//! let code = manager.generate_code(&secret).unwrap();
//! assert!(manager.verify(&secret, &code).unwrap());
//! ```
//!
//! ## HOTP 示例
//!
//! ```rust
//! use otprs::{HotpConfig, HotpGenerator};
//!
//! let generator = HotpGenerator::new(HotpConfig::default());
//! let secret = generator.generate_secret().unwrap();
//!
//! let code = generator.generate(&secret, 0).unwrap();
//! let (is_valid, next_counter) = generator.verify(&secret, &code, 0).unwrap();
//! assert!(is_valid);
//! assert_eq!(next_counter, 1);
//! ```
//!
//! ## 固定时间戳示例
//!
//! 所有涉及时钟的操作都有显式时间戳变体,相同输入总是产生相同输出:
//!
//! ```rust
//! use otprs::{OtpSecret, TotpConfig, TotpManager};
//!
//! let secret = OtpSecret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
//! let manager = TotpManager::new(TotpConfig::default().with_digits(8));
//!
//! // RFC 6238 附录 B 的测试向量
//! assert_eq!(manager.generate_code_at(&secret, 59).unwrap(), "94287082");
//! ```

pub mod base32;
pub mod error;
pub mod hotp;
pub mod random;
pub mod secret;
pub mod steps;
pub mod totp;

pub use error::{Error, Result};

// ============================================================================
// 密钥相关导出
// ============================================================================

pub use secret::{DEFAULT_SECRET_LENGTH, OtpSecret};

// ============================================================================
// 随机数生成函数导出
// ============================================================================

pub use random::{constant_time_compare, constant_time_compare_str, generate_random_bytes};

// ============================================================================
// HOTP 相关导出
// ============================================================================

pub use hotp::{HotpConfig, HotpGenerator, HotpVerifyResult};

// ============================================================================
// TOTP 相关导出
// ============================================================================

pub use steps::TotpSteps;
pub use totp::{TotpConfig, TotpManager, seconds_remaining, time_counter};
