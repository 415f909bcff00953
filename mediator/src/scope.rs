//! 执行作用域（Scope）
//!
//! 以单调递增的令牌代替对象身份，作为临时订阅的键。
//!
use serde::Serialize;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCOPE: AtomicU64 = AtomicU64::new(1);

/// 命令实例的作用域令牌（进程内唯一）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScopeId(u64);

impl ScopeId {
    pub fn next() -> Self {
        Self(NEXT_SCOPE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope-{}", self.0)
    }
}

/// 预先分配了作用域的命令
///
/// 用于在执行前注册临时订阅：
/// ```rust,ignore
/// let mut cmd = Scoped::new(CreateUser { name: "alice".into() });
/// mediator.observe::<UserCreated, _>(cmd.scope(), |e| println!("{e:?}"));
/// mediator.execute_scoped(&mut cmd)?;
/// ```
///
/// 克隆得到的是另一个命令实例，会分配新的作用域，原实例上的订阅不随之复制。
///
/// 作用域执行结束后再对其 `observe`，条目不会再被移除，直到中介者被丢弃。
#[derive(Debug)]
pub struct Scoped<C> {
    scope: ScopeId,
    command: C,
}

impl<C> Scoped<C> {
    pub fn new(command: C) -> Self {
        Self {
            scope: ScopeId::next(),
            command,
        }
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn into_inner(self) -> C {
        self.command
    }

    pub(crate) fn parts_mut(&mut self) -> (ScopeId, &mut C) {
        (self.scope, &mut self.command)
    }
}

impl<C: Clone> Clone for Scoped<C> {
    fn clone(&self) -> Self {
        Self::new(self.command.clone())
    }
}

impl<C> Deref for Scoped<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.command
    }
}

impl<C> DerefMut for Scoped<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_are_monotonic_and_distinct() {
        let a = ScopeId::next();
        let b = ScopeId::next();
        assert!(b > a);

        let first = Scoped::new(1u8);
        let second = Scoped::new(1u8);
        assert_ne!(first.scope(), second.scope());
        assert_eq!(*first, 1);
    }

    #[test]
    fn clone_allocates_a_fresh_scope() {
        let original = Scoped::new(7u8);
        let copy = original.clone();
        assert_ne!(copy.scope(), original.scope());
        assert_eq!(*copy, 7);
    }

    #[test]
    fn scope_serializes_as_number() {
        let s = ScopeId(42);
        assert_eq!(serde_json::to_string(&s).unwrap(), "42");
        assert_eq!(s.to_string(), "scope-42");
    }
}
