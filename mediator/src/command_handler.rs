use crate::{command::Command, context::CommandContext, error::MediatorResult};

/// 命令处理器：某一命令类型唯一的执行者
///
/// 处理器由类型注册表构造，对中介者无状态；需要发布事件时通过 `ctx` 完成。
pub trait CommandHandler<C>: Send + Sync + 'static
where
    C: Command,
{
    fn handle(&self, ctx: &CommandContext<'_>, command: &mut C) -> MediatorResult<()>;
}
