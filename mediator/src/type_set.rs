use crate::{
    command::Command,
    command_handler::CommandHandler,
    event::Event,
    kind::Kind,
    observer::Observer,
    registry::FactoryRegistry,
    routing::Declaration,
};
use std::sync::Arc;

/// 显式注册表：同时记录类型声明与实例提供者
///
/// ```rust,ignore
/// let types = TypeSet::new()
///     .command::<CreateUser>()
///     .handler::<CreateUser, CreateUserHandler>()
///     .event::<UserCreated>()
///     .observer_with::<UserCreated, _>(|| Mailer::new(smtp.clone()));
/// ```
#[derive(Clone, Default)]
pub struct TypeSet {
    declarations: Vec<Declaration>,
    registry: FactoryRegistry,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command<C: Command>(mut self) -> Self {
        self.declarations.push(Declaration::Command(C::kind()));
        self
    }

    pub fn event<E: Event>(mut self) -> Self {
        self.declarations.push(Declaration::Event(E::kind()));
        self
    }

    pub fn handler<C, H>(self) -> Self
    where
        C: Command,
        H: CommandHandler<C> + Default,
    {
        self.handler_with::<C, H>(H::default)
    }

    pub fn handler_with<C, H>(mut self, factory: impl Fn() -> H + Send + Sync + 'static) -> Self
    where
        C: Command,
        H: CommandHandler<C>,
    {
        self.declare_handler::<C, H>();
        self.registry.provide_handler::<C, H>(factory);
        self
    }

    /// 注册共享实例（单例）
    pub fn handler_instance<C, H>(mut self, handler: Arc<H>) -> Self
    where
        C: Command,
        H: CommandHandler<C>,
    {
        self.declare_handler::<C, H>();
        self.registry.provide_handler_instance::<C, H>(handler);
        self
    }

    pub fn observer<E, O>(self) -> Self
    where
        E: Event,
        O: Observer<E> + Default,
    {
        self.observer_with::<E, O>(O::default)
    }

    pub fn observer_with<E, O>(mut self, factory: impl Fn() -> O + Send + Sync + 'static) -> Self
    where
        E: Event,
        O: Observer<E>,
    {
        self.declare_observer::<E, O>();
        self.registry.provide_observer::<E, O>(factory);
        self
    }

    pub fn observer_instance<E, O>(mut self, observer: Arc<O>) -> Self
    where
        E: Event,
        O: Observer<E>,
    {
        self.declare_observer::<E, O>();
        self.registry.provide_observer_instance::<E, O>(observer);
        self
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn into_parts(self) -> (Vec<Declaration>, FactoryRegistry) {
        (self.declarations, self.registry)
    }

    fn declare_handler<C: Command, H: 'static>(&mut self) {
        self.declarations.push(Declaration::Handler {
            handler: Kind::of::<H>(),
            command: C::kind(),
        });
    }

    fn declare_observer<E: Event, O: 'static>(&mut self) {
        self.declarations.push(Declaration::Observer {
            observer: Kind::of::<O>(),
            event: E::kind(),
        });
    }
}
