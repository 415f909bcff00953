//! 进程内命令/事件中介者（mediator）
//!
//! 提供同步、单进程的 CQRS 分发核心：
//! - 命令（`command`）路由到唯一的处理器（`command_handler`）；
//! - 事件（`event`）扇出到零个或多个观察者（`observer`）；
//! - 针对单个命令实例的临时订阅，仅在该命令执行期间存在（`scope`）；
//! - 元事件（`meta_event`）：`CommandExecuted` 与 `EventRaised`。
//!
//! 典型用法：
//! 1. 用 `TypeSet` 显式声明命令、事件、处理器与观察者；
//! 2. `Mediator::builder().types(types).build()?` 校验并绑定（每个命令必须恰好一个处理器）；
//! 3. 调用 `execute` / `raise` / `observe` 进行分发。
//!
//! 实例的构造交给 `TypeRegistry`，默认实现为工厂表 `FactoryRegistry`，也可替换为外部容器。
//!
pub mod binder;
pub mod command;
pub mod command_handler;
pub mod config;
pub mod context;
mod ephemeral;
pub mod error;
pub mod event;
pub mod kind;
pub mod mediator;
pub mod meta_event;
pub mod observer;
pub mod registry;
pub mod routing;
pub mod scope;
pub mod type_set;

pub use binder::Binder;
pub use command::Command;
pub use command_handler::CommandHandler;
pub use config::MediatorConfig;
pub use context::{CommandContext, EventContext};
pub use error::{BindError, MediatorError, MediatorResult};
pub use event::Event;
pub use kind::Kind;
pub use mediator::Mediator;
pub use meta_event::{CommandExecuted, EventRaised};
pub use observer::Observer;
pub use registry::{FactoryRegistry, TypeRegistry};
pub use routing::{Binding, Declaration, Role, RoutingTable};
pub use scope::{ScopeId, Scoped};
pub use type_set::TypeSet;
