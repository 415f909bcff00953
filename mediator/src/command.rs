use crate::kind::Kind;

/// 命令（Command）
///
/// 表达“意图”的写操作请求，由且仅由一个处理器执行。
/// - 命令实例的身份（而非值相等）决定临时订阅的归属，见 [`ScopeId`](crate::scope::ScopeId)；
/// - 需要 `Clone`，以便在执行完成后随 [`CommandExecuted`](crate::meta_event::CommandExecuted) 携带快照。
///
/// 关联常量：
/// - `NAME`：命令的稳定名称，用于日志、追踪与错误信息。避免依赖 `type_name::<T>()`。
pub trait Command: Clone + Send + Sync + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    fn kind() -> Kind {
        Kind::named::<Self>(Self::NAME)
    }
}
