//! 临时订阅存储
//!
//! 以作用域令牌为键，按事件类型保存回调列表（保持注册顺序）。
//! 条目在首次 `observe` 时创建，在所属命令执行结束时由 [`ScopeGuard`] 整体移除，
//! 无论处理器成功、返回错误还是 panic。
//!
use crate::{event::Event, scope::ScopeId};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

pub(crate) type EphemeralFn = Arc<dyn Fn(&mut dyn Any) + Send + Sync>;

#[derive(Default)]
pub(crate) struct EphemeralStore {
    entries: DashMap<ScopeId, HashMap<TypeId, Vec<EphemeralFn>>>,
}

impl EphemeralStore {
    pub(crate) fn observe<E, F>(&self, scope: ScopeId, action: F)
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let callback: EphemeralFn = Arc::new(move |event: &mut dyn Any| {
            if let Some(event) = event.downcast_mut::<E>() {
                action(event);
            }
        });

        self.entries
            .entry(scope)
            .or_default()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(callback);
    }

    /// 取出回调的副本；调用回调时不持有分片锁，回调可以重入中介者
    pub(crate) fn callbacks(&self, scope: ScopeId, event: TypeId) -> Vec<EphemeralFn> {
        self.entries
            .get(&scope)
            .and_then(|entry| entry.get(&event).cloned())
            .unwrap_or_default()
    }

    pub(crate) fn release(&self, scope: ScopeId) -> bool {
        self.entries.remove(&scope).is_some()
    }

    pub(crate) fn guard(&self, scope: ScopeId) -> ScopeGuard<'_> {
        ScopeGuard { store: self, scope }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

pub(crate) struct ScopeGuard<'a> {
    store: &'a EphemeralStore,
    scope: ScopeId,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if self.store.release(self.scope) {
            trace!(scope = %self.scope, "ephemeral observers released");
        }
    }
}
