use crate::kind::Kind;
use std::collections::HashMap;

/// 类型声明：说明某个类型在中介者中扮演的角色
///
/// 同一类型可以出现在多条声明中（例如同时观察两类事件）。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Declaration {
    Command(Kind),
    Event(Kind),
    Handler { handler: Kind, command: Kind },
    Observer { observer: Kind, event: Kind },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Handler,
    Observer,
}

/// 一条绑定：契约类型（命令/事件）到实现类型（处理器/观察者）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub role: Role,
    pub contract: Kind,
    pub implementation: Kind,
}

/// 路由表（绑定完成后只读）
#[derive(Clone, Debug, Default)]
pub struct RoutingTable {
    commands: Vec<Kind>,
    events: Vec<Kind>,
    handlers: HashMap<Kind, Kind>,
    observers: HashMap<Kind, Vec<Kind>>,
}

impl RoutingTable {
    pub(crate) fn new(
        commands: Vec<Kind>,
        events: Vec<Kind>,
        handlers: HashMap<Kind, Kind>,
        observers: HashMap<Kind, Vec<Kind>>,
    ) -> Self {
        Self {
            commands,
            events,
            handlers,
            observers,
        }
    }

    pub fn handler(&self, command: &Kind) -> Option<Kind> {
        self.handlers.get(command).copied()
    }

    /// 按绑定顺序返回观察者；未声明或无观察者时为空
    pub fn observers(&self, event: &Kind) -> &[Kind] {
        self.observers.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn commands(&self) -> &[Kind] {
        &self.commands
    }

    pub fn events(&self) -> &[Kind] {
        &self.events
    }

    /// 全部绑定：先按命令声明顺序列出处理器，再按事件声明顺序列出观察者
    pub fn bindings(&self) -> Vec<Binding> {
        let handlers = self.commands.iter().filter_map(|command| {
            self.handler(command).map(|implementation| Binding {
                role: Role::Handler,
                contract: *command,
                implementation,
            })
        });

        let observers = self.events.iter().flat_map(|event| {
            self.observers(event).iter().map(|observer| Binding {
                role: Role::Observer,
                contract: *event,
                implementation: *observer,
            })
        });

        handlers.chain(observers).collect()
    }
}
