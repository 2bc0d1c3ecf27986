//! 统一错误类型模块
//!
//! 提供 otprs 库中所有操作的错误类型定义。错误总是局部于产生它的那次调用,
//! 任何操作失败都不会留下需要回滚的部分副作用。

use std::fmt;

/// otprs 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// otprs 库的错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 无效密钥:原始字节为空,或 Base32 文本中不含任何有效字母表字符
    InvalidSecret(String),

    /// 无效配置:`digits` 或 `step_seconds` 为零
    InvalidConfiguration {
        /// 出错的配置字段
        field: String,
        /// 具体原因
        message: String,
    },

    /// 无效标签:构建 otpauth URI 时账户标签为空
    InvalidLabel(String),

    /// 外部密码学能力不可用:HMAC 初始化被拒绝,或系统熵源取数失败
    PrimitiveUnavailable(String),
}

impl Error {
    /// 创建一个无效密钥错误
    pub fn invalid_secret(msg: impl Into<String>) -> Self {
        Error::InvalidSecret(msg.into())
    }

    /// 创建一个无效配置错误
    pub fn invalid_configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 创建一个无效标签错误
    pub fn invalid_label(msg: impl Into<String>) -> Self {
        Error::InvalidLabel(msg.into())
    }

    /// 创建一个原语不可用错误
    pub fn primitive_unavailable(msg: impl Into<String>) -> Self {
        Error::PrimitiveUnavailable(msg.into())
    }
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSecret(msg) => write!(f, "Invalid secret: {}", msg),
            Error::InvalidConfiguration { field, message } => {
                write!(f, "Invalid configuration for '{}': {}", field, message)
            }
            Error::InvalidLabel(msg) => write!(f, "Invalid label: {}", msg),
            Error::PrimitiveUnavailable(msg) => {
                write!(f, "Crypto primitive unavailable: {}", msg)
            }
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
