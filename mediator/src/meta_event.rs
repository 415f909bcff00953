//! 元事件（Meta-events）
//!
//! 由中介者自身合成、描述分发活动的事件，与业务事件走同一套路由：
//! - [`CommandExecuted`]：命令处理成功之后发布，不带来源作用域；
//! - [`EventRaised`]：任一非 `EventRaised` 事件发布之后发布，沿用原事件的来源。
//!
//! 两者携带被描述对象的快照（类型擦除），通过 `command::<C>()` / `event::<E>()` 还原。
//!
use crate::{command::Command, event::Event, kind::Kind, scope::ScopeId};
use std::any::Any;
use std::sync::Arc;

type Snapshot = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Debug)]
pub struct CommandExecuted {
    command: Snapshot,
    command_kind: Kind,
    scope: ScopeId,
}

impl CommandExecuted {
    pub(crate) fn new<C: Command>(command: &C, scope: ScopeId) -> Self {
        Self {
            command: Arc::new(command.clone()),
            command_kind: C::kind(),
            scope,
        }
    }

    /// 还原为具体命令；类型不符时返回 `None`
    pub fn command<C: Command>(&self) -> Option<&C> {
        (*self.command).downcast_ref::<C>()
    }

    pub fn command_kind(&self) -> Kind {
        self.command_kind
    }

    /// 已执行命令所在的作用域（其临时订阅此时已被清除）
    pub fn scope(&self) -> ScopeId {
        self.scope
    }
}

impl Event for CommandExecuted {
    const NAME: &'static str = "mediator.CommandExecuted";
}

#[derive(Clone, Debug)]
pub struct EventRaised {
    event: Snapshot,
    event_kind: Kind,
    source: Option<ScopeId>,
}

impl EventRaised {
    pub(crate) fn new<E: Event>(event: &E, source: Option<ScopeId>) -> Self {
        Self {
            event: Arc::new(event.clone()),
            event_kind: E::kind(),
            source,
        }
    }

    pub fn event<E: Event>(&self) -> Option<&E> {
        (*self.event).downcast_ref::<E>()
    }

    pub fn event_kind(&self) -> Kind {
        self.event_kind
    }

    pub fn source(&self) -> Option<ScopeId> {
        self.source
    }
}

impl Event for EventRaised {
    const NAME: &'static str = "mediator.EventRaised";
}
