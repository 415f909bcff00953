//! 类型注册表（TypeRegistry）
//!
//! 中介者通过该接口取得处理器与观察者实例，而不关心它们如何被构造：
//! 可以是简单的工厂表（[`FactoryRegistry`]），也可以是外部依赖注入容器的适配器。
//!
//! 实例以类型擦除的闭包交付（[`HandlerFn`] / [`ObserverFn`]），
//! 闭包内部完成唯一一次向具体类型的 downcast。
//!
use crate::{
    command::Command,
    command_handler::CommandHandler,
    context::{CommandContext, EventContext},
    error::{BindError, MediatorError, MediatorResult},
    event::Event,
    kind::Kind,
    observer::Observer,
    routing::{Binding, Role},
};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

pub type HandlerFn =
    Arc<dyn Fn(&CommandContext<'_>, &mut dyn Any) -> MediatorResult<()> + Send + Sync>;

pub type ObserverFn =
    Arc<dyn Fn(&EventContext<'_>, &mut dyn Any) -> MediatorResult<()> + Send + Sync>;

type HandlerProvider = Arc<dyn Fn() -> HandlerFn + Send + Sync>;

type ObserverProvider = Arc<dyn Fn() -> ObserverFn + Send + Sync>;

pub trait TypeRegistry: Send + Sync {
    /// 由绑定器产出的每条绑定调用一次；无法满足时返回错误以中止初始化
    fn register_binding(&mut self, binding: &Binding) -> Result<(), BindError>;

    fn resolve_handler(&self, command: &Kind) -> Option<HandlerFn>;

    /// 按绑定顺序返回观察者
    fn resolve_observers(&self, event: &Kind) -> Vec<ObserverFn>;
}

/// 基于工厂表的类型注册表
///
/// - 工厂提供者：每次分发构造一个新实例；
/// - 实例提供者：共享同一个 `Arc` 实例。
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    // (契约类型, 实现类型) -> 提供者
    handler_providers: HashMap<(Kind, Kind), HandlerProvider>,
    observer_providers: HashMap<(Kind, Kind), ObserverProvider>,
    handlers: HashMap<Kind, HandlerProvider>,
    observers: HashMap<Kind, Vec<ObserverProvider>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide_handler<C, H>(&mut self, factory: impl Fn() -> H + Send + Sync + 'static)
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let provider: HandlerProvider = Arc::new(move || erase_handler::<C, H>(Arc::new(factory())));
        self.handler_providers
            .insert((C::kind(), Kind::of::<H>()), provider);
    }

    pub fn provide_handler_instance<C, H>(&mut self, handler: Arc<H>)
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let provider: HandlerProvider = Arc::new(move || erase_handler::<C, H>(handler.clone()));
        self.handler_providers
            .insert((C::kind(), Kind::of::<H>()), provider);
    }

    pub fn provide_observer<E, O>(&mut self, factory: impl Fn() -> O + Send + Sync + 'static)
    where
        E: Event,
        O: Observer<E>,
    {
        let provider: ObserverProvider =
            Arc::new(move || erase_observer::<E, O>(Arc::new(factory())));
        self.observer_providers
            .insert((E::kind(), Kind::of::<O>()), provider);
    }

    pub fn provide_observer_instance<E, O>(&mut self, observer: Arc<O>)
    where
        E: Event,
        O: Observer<E>,
    {
        let provider: ObserverProvider = Arc::new(move || erase_observer::<E, O>(observer.clone()));
        self.observer_providers
            .insert((E::kind(), Kind::of::<O>()), provider);
    }
}

impl TypeRegistry for FactoryRegistry {
    fn register_binding(&mut self, binding: &Binding) -> Result<(), BindError> {
        let key = (binding.contract, binding.implementation);
        let missing = || BindError::MissingProvider {
            contract: binding.contract.name(),
            implementation: binding.implementation.name(),
        };

        match binding.role {
            Role::Handler => {
                let provider = self.handler_providers.get(&key).cloned().ok_or_else(missing)?;
                self.handlers.insert(binding.contract, provider);
            }
            Role::Observer => {
                let provider = self.observer_providers.get(&key).cloned().ok_or_else(missing)?;
                self.observers
                    .entry(binding.contract)
                    .or_default()
                    .push(provider);
            }
        }
        Ok(())
    }

    fn resolve_handler(&self, command: &Kind) -> Option<HandlerFn> {
        self.handlers.get(command).map(|provide| provide())
    }

    fn resolve_observers(&self, event: &Kind) -> Vec<ObserverFn> {
        self.observers
            .get(event)
            .map(|providers| providers.iter().map(|provide| provide()).collect())
            .unwrap_or_default()
    }
}

fn erase_handler<C, H>(handler: Arc<H>) -> HandlerFn
where
    C: Command,
    H: CommandHandler<C>,
{
    Arc::new(move |ctx: &CommandContext<'_>, command: &mut dyn Any| {
        // 键与闭包同属泛型 C，正常情况下不会失败
        match command.downcast_mut::<C>() {
            Some(command) => handler.handle(ctx, command),
            None => Err(MediatorError::TypeMismatch {
                expected: C::NAME,
                found: ctx.command().name(),
            }),
        }
    })
}

fn erase_observer<E, O>(observer: Arc<O>) -> ObserverFn
where
    E: Event,
    O: Observer<E>,
{
    Arc::new(move |ctx: &EventContext<'_>, event: &mut dyn Any| {
        match event.downcast_mut::<E>() {
            Some(event) => observer.react_to(ctx, event),
            None => Err(MediatorError::TypeMismatch {
                expected: E::NAME,
                found: ctx.event().name(),
            }),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Ping;

    impl Command for Ping {
        const NAME: &'static str = "Ping";
    }

    #[derive(Clone, Debug)]
    struct Pong;

    impl Command for Pong {
        const NAME: &'static str = "Pong";
    }

    struct PingHandler;

    impl CommandHandler<Ping> for PingHandler {
        fn handle(&self, _ctx: &CommandContext<'_>, _command: &mut Ping) -> MediatorResult<()> {
            Ok(())
        }
    }

    #[test]
    fn binding_without_provider_fails() {
        let mut registry = FactoryRegistry::new();
        let err = registry
            .register_binding(&Binding {
                role: Role::Handler,
                contract: Ping::kind(),
                implementation: Kind::of::<PingHandler>(),
            })
            .unwrap_err();

        assert!(matches!(err, BindError::MissingProvider { contract: "Ping", .. }));
    }

    #[test]
    fn resolves_only_registered_bindings() {
        let mut registry = FactoryRegistry::new();
        registry.provide_handler::<Ping, _>(|| PingHandler);
        assert!(registry.resolve_handler(&Ping::kind()).is_none());

        registry
            .register_binding(&Binding {
                role: Role::Handler,
                contract: Ping::kind(),
                implementation: Kind::of::<PingHandler>(),
            })
            .unwrap();
        assert!(registry.resolve_handler(&Ping::kind()).is_some());
        assert!(registry.resolve_observers(&Ping::kind()).is_empty());
    }

    #[test]
    fn mismatched_command_reports_both_kinds() {
        use crate::{mediator::Mediator, scope::ScopeId, type_set::TypeSet};

        let mediator = Mediator::builder().types(TypeSet::new()).build().unwrap();
        let ctx = CommandContext::new(&mediator, ScopeId::next(), Pong::kind());
        let handler = erase_handler::<Ping, _>(Arc::new(PingHandler));

        match handler(&ctx, &mut Pong) {
            Err(MediatorError::TypeMismatch { expected, found }) => {
                assert_eq!(expected, "Ping");
                assert_eq!(found, "Pong");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
