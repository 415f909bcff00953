//! 分发上下文
//!
//! 处理器与观察者通过上下文回到中介者：发布事件、注册临时订阅或执行嵌套命令。
//!
use crate::{
    command::Command, error::MediatorResult, event::Event, kind::Kind, mediator::Mediator,
    scope::ScopeId,
};

/// 命令执行上下文
///
/// `raise` 默认以当前命令为来源，当前命令的临时订阅可以收到这些事件。
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    mediator: &'a Mediator,
    scope: ScopeId,
    command: Kind,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(mediator: &'a Mediator, scope: ScopeId, command: Kind) -> Self {
        Self {
            mediator,
            scope,
            command,
        }
    }

    pub fn mediator(&self) -> &'a Mediator {
        self.mediator
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn command(&self) -> Kind {
        self.command
    }

    pub fn raise<E: Event>(&self, event: &mut E) -> MediatorResult<()> {
        self.mediator.raise_from(event, self.scope)
    }

    pub fn raise_unscoped<E: Event>(&self, event: &mut E) -> MediatorResult<()> {
        self.mediator.raise(event)
    }

    pub fn observe<E, F>(&self, action: F)
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        self.mediator.observe::<E, F>(self.scope, action);
    }

    /// 执行嵌套命令（拥有独立的作用域）
    pub fn execute<C: Command>(&self, command: &mut C) -> MediatorResult<()> {
        self.mediator.execute(command)
    }
}

/// 事件发布上下文
///
/// 观察者在此发布的后续事件沿用原事件的来源作用域。
#[derive(Clone, Copy)]
pub struct EventContext<'a> {
    mediator: &'a Mediator,
    source: Option<ScopeId>,
    event: Kind,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(mediator: &'a Mediator, source: Option<ScopeId>, event: Kind) -> Self {
        Self {
            mediator,
            source,
            event,
        }
    }

    pub fn mediator(&self) -> &'a Mediator {
        self.mediator
    }

    pub fn source(&self) -> Option<ScopeId> {
        self.source
    }

    pub fn event(&self) -> Kind {
        self.event
    }

    pub fn raise<E: Event>(&self, event: &mut E) -> MediatorResult<()> {
        match self.source {
            Some(scope) => self.mediator.raise_from(event, scope),
            None => self.mediator.raise(event),
        }
    }
}
