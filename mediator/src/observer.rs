use crate::{context::EventContext, error::MediatorResult, event::Event};

/// 事件观察者：对每一个该类型的事件作出反应
///
/// 返回错误会中止本次发布中剩余观察者的调用，并原样返回给调用方。
pub trait Observer<E>: Send + Sync + 'static
where
    E: Event,
{
    fn react_to(&self, ctx: &EventContext<'_>, event: &mut E) -> MediatorResult<()>;
}
