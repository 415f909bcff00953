//! 中介者（Mediator）
//!
//! 同步、进程内的命令/事件分发核心：
//! - `execute`：把命令路由到唯一的处理器，结束后清理该命令的临时订阅并发布 `CommandExecuted`；
//! - `raise` / `raise_from`：按绑定顺序扇出到全部观察者，再调用来源作用域的临时订阅，
//!   最后发布 `EventRaised`（`EventRaised` 自身不再包装，递归只有一层）；
//! - `observe`：为某个命令作用域注册临时订阅。
//!
//! 所有调用都在调用方线程上内联完成；处理器与观察者的错误原样返回，不重试也不隔离。
//!
use crate::{
    binder::Binder,
    command::Command,
    config::MediatorConfig,
    context::{CommandContext, EventContext},
    ephemeral::EphemeralStore,
    error::{BindError, MediatorError, MediatorResult},
    event::Event,
    meta_event::{CommandExecuted, EventRaised},
    registry::TypeRegistry,
    routing::{Declaration, RoutingTable},
    scope::{ScopeId, Scoped},
    type_set::TypeSet,
};
use bon::bon;
use tracing::{debug, trace};

pub struct Mediator {
    routes: RoutingTable,
    registry: Box<dyn TypeRegistry>,
    ephemeral: EphemeralStore,
    config: MediatorConfig,
}

#[bon]
impl Mediator {
    /// 以显式注册表构建中介者，任一绑定违规都会返回错误
    #[builder]
    pub fn new(
        types: TypeSet,
        #[builder(default)] config: MediatorConfig,
    ) -> Result<Self, BindError> {
        let (declarations, registry) = types.into_parts();
        Self::bind(&declarations, Box::new(registry), config)
    }

    /// 以任意类型注册表构建中介者（例如外部容器的适配器）
    pub fn bind(
        declarations: &[Declaration],
        mut registry: Box<dyn TypeRegistry>,
        config: MediatorConfig,
    ) -> Result<Self, BindError> {
        let routes = Binder::bind(declarations)?;
        for binding in routes.bindings() {
            registry.register_binding(&binding)?;
        }

        Ok(Self {
            routes,
            registry,
            ephemeral: EphemeralStore::default(),
            config,
        })
    }

    pub fn execute<C: Command>(&self, command: &mut C) -> MediatorResult<()> {
        self.execute_in(ScopeId::next(), command)
    }

    /// 在命令预先分配的作用域中执行，执行前注册的临时订阅在此生效
    pub fn execute_scoped<C: Command>(&self, command: &mut Scoped<C>) -> MediatorResult<()> {
        let (scope, command) = command.parts_mut();
        self.execute_in(scope, command)
    }

    pub fn raise<E: Event>(&self, event: &mut E) -> MediatorResult<()> {
        self.raise_with(event, None)
    }

    pub fn raise_from<E: Event>(&self, event: &mut E, source: ScopeId) -> MediatorResult<()> {
        self.raise_with(event, Some(source))
    }

    /// 注册临时订阅：追加到 (作用域, 事件类型) 的回调列表末尾
    ///
    /// 不要求该作用域正在执行；作用域对应的命令执行结束后订阅即被移除。
    /// 对已经执行结束的作用域注册，条目不会再被清理，会一直留到中介者被丢弃，
    /// 可通过 [`Mediator::active_scopes`] 观察。
    pub fn observe<E, F>(&self, source: ScopeId, action: F)
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        trace!(event = E::NAME, scope = %source, "observing");
        self.ephemeral.observe::<E, F>(source, action);
    }

    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    pub fn config(&self) -> MediatorConfig {
        self.config
    }

    /// 当前仍持有临时订阅的作用域数量
    pub fn active_scopes(&self) -> usize {
        self.ephemeral.len()
    }

    fn execute_in<C: Command>(&self, scope: ScopeId, command: &mut C) -> MediatorResult<()> {
        let kind = C::kind();
        {
            // 先于一切可能失败的步骤取得守卫，保证条目总会被释放
            let _guard = self.ephemeral.guard(scope);

            let unhandled = || MediatorError::UnhandledCommand { command: C::NAME };
            let handler_kind = self.routes.handler(&kind).ok_or_else(unhandled)?;
            let handler = self.registry.resolve_handler(&kind).ok_or_else(unhandled)?;

            trace!(command = C::NAME, handler = %handler_kind, %scope, "executing command");

            let ctx = CommandContext::new(self, scope, kind);
            handler(&ctx, &mut *command).inspect_err(|err| {
                debug!(command = C::NAME, %scope, error = %err, "command handler failed");
            })?;
        }

        if self.config.emit_command_executed {
            let mut executed = CommandExecuted::new(&*command, scope);
            self.raise_with(&mut executed, None)?;
        }
        Ok(())
    }

    fn raise_with<E: Event>(&self, event: &mut E, source: Option<ScopeId>) -> MediatorResult<()> {
        let kind = E::kind();
        trace!(event = E::NAME, source = ?source, "raising event");

        if !self.routes.observers(&kind).is_empty() {
            let ctx = EventContext::new(self, source, kind);
            for observer in self.registry.resolve_observers(&kind) {
                observer(&ctx, &mut *event).inspect_err(|err| {
                    debug!(event = E::NAME, error = %err, "observer failed");
                })?;
            }
        }

        if let Some(scope) = source {
            for callback in self.ephemeral.callbacks(scope, kind.id()) {
                callback(&mut *event);
            }
        }

        if self.config.emit_event_raised && !kind.is::<EventRaised>() {
            let mut raised = EventRaised::new(&*event, source);
            self.raise_with(&mut raised, source)?;
        }
        Ok(())
    }
}
