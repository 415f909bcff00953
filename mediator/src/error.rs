//! 中介者统一错误定义
//!
//! - `BindError`：绑定（初始化）阶段的失败，出现即中止整个绑定；
//! - `MediatorError`：分发阶段的失败，处理器/观察者的错误原样透传。
//!
use thiserror::Error;

/// 绑定阶段错误：任一违规都会使本次绑定整体失败，不保留部分路由表
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("command not handled: command={command}")]
    UnhandledCommand { command: &'static str },

    #[error("too many handlers: command={command}, candidates={candidates:?}")]
    AmbiguousHandler {
        command: &'static str,
        candidates: Vec<&'static str>,
    },

    #[error("missing provider: contract={contract}, implementation={implementation}")]
    MissingProvider {
        contract: &'static str,
        implementation: &'static str,
    },
}

/// 分发阶段错误
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MediatorError {
    #[error("command not handled: command={command}")]
    UnhandledCommand { command: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// 处理器或观察者自身的错误，不做翻译
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

/// 统一 Result 类型别名
pub type MediatorResult<T> = Result<T, MediatorError>;
