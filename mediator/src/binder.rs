//! 绑定器（Binder）
//!
//! 在初始化时一次性校验声明并构建路由表：
//! - 每个命令类型必须有且仅有一个处理器（0 个或多于 1 个都会失败）；
//! - 每个事件类型可绑定任意数量的观察者，保持声明顺序；
//! - 元事件 `CommandExecuted` / `EventRaised` 总是隐式声明；
//! - 遇到第一个违规即中止，不保留部分结果。
//!
//! 绑定阶段不构造任何实例，实例化推迟到分发时由类型注册表完成。
//!
use crate::{
    error::BindError,
    event::Event,
    kind::Kind,
    meta_event::{CommandExecuted, EventRaised},
    routing::{Declaration, RoutingTable},
};
use std::collections::HashMap;
use tracing::debug;

pub struct Binder;

impl Binder {
    pub fn bind(declarations: &[Declaration]) -> Result<RoutingTable, BindError> {
        let mut commands: Vec<Kind> = Vec::new();
        let mut events: Vec<Kind> = Vec::new();

        for declaration in declarations {
            match declaration {
                Declaration::Command(kind) => push_unique(&mut commands, *kind),
                Declaration::Event(kind) => push_unique(&mut events, *kind),
                _ => {}
            }
        }
        push_unique(&mut events, CommandExecuted::kind());
        push_unique(&mut events, EventRaised::kind());

        let mut observers: HashMap<Kind, Vec<Kind>> = HashMap::new();
        for event in &events {
            let bound = distinct(declarations.iter().filter_map(|d| match d {
                Declaration::Observer { observer, event: e } if e == event => Some(*observer),
                _ => None,
            }));
            if !bound.is_empty() {
                observers.insert(*event, bound);
            }
        }

        let mut handlers: HashMap<Kind, Kind> = HashMap::new();
        for command in &commands {
            let candidates = distinct(declarations.iter().filter_map(|d| match d {
                Declaration::Handler { handler, command: c } if c == command => Some(*handler),
                _ => None,
            }));

            match candidates.as_slice() {
                [] => {
                    return Err(BindError::UnhandledCommand {
                        command: command.name(),
                    });
                }
                [handler] => {
                    handlers.insert(*command, *handler);
                }
                _ => {
                    return Err(BindError::AmbiguousHandler {
                        command: command.name(),
                        candidates: candidates.iter().map(Kind::name).collect(),
                    });
                }
            }
        }

        for declaration in declarations {
            match declaration {
                Declaration::Handler { handler, command } if !commands.contains(command) => {
                    debug!(%handler, %command, "handler ignored: command not declared");
                }
                Declaration::Observer { observer, event } if !events.contains(event) => {
                    debug!(%observer, %event, "observer ignored: event not declared");
                }
                _ => {}
            }
        }

        debug!(
            commands = commands.len(),
            events = events.len(),
            observers = observers.values().map(Vec::len).sum::<usize>(),
            "routing table bound"
        );

        Ok(RoutingTable::new(commands, events, handlers, observers))
    }
}

fn push_unique(kinds: &mut Vec<Kind>, kind: Kind) {
    if !kinds.contains(&kind) {
        kinds.push(kind);
    }
}

fn distinct(kinds: impl Iterator<Item = Kind>) -> Vec<Kind> {
    let mut out = Vec::new();
    for kind in kinds {
        push_unique(&mut out, kind);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CreateUser;
    struct DeleteUser;
    struct CreateUserHandler;
    struct OtherCreateUserHandler;
    struct UserCreated;
    struct Audit;
    struct Mailer;

    fn command<T: 'static>() -> Declaration {
        Declaration::Command(Kind::of::<T>())
    }

    fn event<T: 'static>() -> Declaration {
        Declaration::Event(Kind::of::<T>())
    }

    fn handler<H: 'static, C: 'static>() -> Declaration {
        Declaration::Handler {
            handler: Kind::of::<H>(),
            command: Kind::of::<C>(),
        }
    }

    fn observer<O: 'static, E: 'static>() -> Declaration {
        Declaration::Observer {
            observer: Kind::of::<O>(),
            event: Kind::of::<E>(),
        }
    }

    #[test]
    fn binds_single_handler_per_command() {
        let table = Binder::bind(&[
            handler::<CreateUserHandler, CreateUser>(),
            command::<CreateUser>(),
        ])
        .unwrap();

        assert_eq!(
            table.handler(&Kind::of::<CreateUser>()),
            Some(Kind::of::<CreateUserHandler>())
        );
        assert_eq!(table.commands(), &[Kind::of::<CreateUser>()]);
    }

    #[test]
    fn command_without_handler_fails() {
        let err = Binder::bind(&[
            handler::<CreateUserHandler, CreateUser>(),
            command::<CreateUser>(),
            command::<DeleteUser>(),
        ])
        .unwrap_err();

        match err {
            BindError::UnhandledCommand { command } => assert!(command.contains("DeleteUser")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn command_with_two_handlers_fails() {
        let err = Binder::bind(&[
            handler::<CreateUserHandler, CreateUser>(),
            handler::<OtherCreateUserHandler, CreateUser>(),
            command::<CreateUser>(),
        ])
        .unwrap_err();

        match err {
            BindError::AmbiguousHandler {
                command,
                candidates,
            } => {
                assert!(command.contains("CreateUser"));
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_declarations_collapse() {
        let table = Binder::bind(&[
            command::<CreateUser>(),
            command::<CreateUser>(),
            handler::<CreateUserHandler, CreateUser>(),
            handler::<CreateUserHandler, CreateUser>(),
            event::<UserCreated>(),
            observer::<Audit, UserCreated>(),
            observer::<Audit, UserCreated>(),
        ])
        .unwrap();

        assert_eq!(table.commands().len(), 1);
        assert_eq!(table.observers(&Kind::of::<UserCreated>()).len(), 1);
    }

    #[test]
    fn observers_keep_declaration_order() {
        let table = Binder::bind(&[
            observer::<Mailer, UserCreated>(),
            event::<UserCreated>(),
            observer::<Audit, UserCreated>(),
        ])
        .unwrap();

        assert_eq!(
            table.observers(&Kind::of::<UserCreated>()),
            &[Kind::of::<Mailer>(), Kind::of::<Audit>()]
        );
    }

    #[test]
    fn event_without_observers_is_valid() {
        let table = Binder::bind(&[event::<UserCreated>()]).unwrap();
        assert!(table.observers(&Kind::of::<UserCreated>()).is_empty());
        assert!(table.bindings().is_empty());
    }

    #[test]
    fn undeclared_contracts_are_not_bound() {
        let table = Binder::bind(&[
            handler::<CreateUserHandler, CreateUser>(),
            observer::<Audit, UserCreated>(),
        ])
        .unwrap();

        assert!(table.handler(&Kind::of::<CreateUser>()).is_none());
        assert!(table.observers(&Kind::of::<UserCreated>()).is_empty());
    }

    #[test]
    fn meta_events_are_always_declared() {
        let table = Binder::bind(&[observer::<Audit, EventRaised>()]).unwrap();
        assert!(table.events().contains(&CommandExecuted::kind()));
        assert_eq!(table.observers(&EventRaised::kind()), &[Kind::of::<Audit>()]);
    }
}
