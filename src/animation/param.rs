use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::foundation::core::{FrameIndex, Rgb8};
use crate::foundation::error::FramefoldResult;

type Setter<T> = Arc<dyn Fn(FrameIndex) -> FramefoldResult<T> + Send + Sync>;
type Updater<T> = Arc<dyn Fn(T, FrameIndex) -> FramefoldResult<T> + Send + Sync>;

struct ParamState<T> {
    base: T,
    setter: Option<Setter<T>>,
    updaters: Vec<Updater<T>>,
}

/// A value resolved per frame from a base value, an optional setter, and a chain of updaters.
///
/// `DynamicValue` is a shared handle: cloning it (or converting an existing handle through
/// [`From`]) yields the same instance, so attributes that must move together can hold one
/// parameter and see every setter/updater attached to it.
///
/// Resolution for frame `f`:
/// 1. start from `setter(f)` when a setter is attached, otherwise from the base value
/// 2. apply every updater in registration order as `value = updater(value, f)`
///
/// Closures should be pure functions of their inputs and captured copies; resolution is expected
/// to be deterministic per frame index. They run without the parameter's lock held, so a closure
/// may read or even extend the handle it belongs to; changes apply from the next `get` on.
pub struct DynamicValue<T> {
    inner: Arc<RwLock<ParamState<T>>>,
}

impl<T> Clone for DynamicValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> DynamicValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap `base` with no setter and no updaters.
    pub fn new(base: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ParamState {
                base,
                setter: None,
                updaters: Vec::new(),
            })),
        }
    }

    /// Return `value` as a parameter, reusing it when it already is one.
    pub fn coerce(value: impl Into<Self>) -> Self {
        value.into()
    }

    /// Return `true` when both handles refer to the same parameter.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Current base value.
    pub fn base(&self) -> T {
        self.read().base.clone()
    }

    /// Replace the base value.
    pub fn set_base(&self, base: T) {
        self.write().base = base;
    }

    /// Replace the base value with a per-frame function.
    pub fn add_setter<F>(&self, setter: F)
    where
        F: Fn(FrameIndex) -> T + Send + Sync + 'static,
    {
        self.try_add_setter(move |f| Ok(setter(f)));
    }

    /// Fallible variant of [`DynamicValue::add_setter`]; errors propagate out of [`DynamicValue::get`].
    pub fn try_add_setter<F>(&self, setter: F)
    where
        F: Fn(FrameIndex) -> FramefoldResult<T> + Send + Sync + 'static,
    {
        self.write().setter = Some(Arc::new(setter));
    }

    /// Drop the setter so resolution starts from the base value again.
    pub fn clear_setter(&self) {
        self.write().setter = None;
    }

    /// Append an updater to the end of the chain.
    pub fn add_updater<F>(&self, updater: F)
    where
        F: Fn(T, FrameIndex) -> T + Send + Sync + 'static,
    {
        self.try_add_updater(move |v, f| Ok(updater(v, f)));
    }

    /// Fallible variant of [`DynamicValue::add_updater`]; errors propagate out of [`DynamicValue::get`].
    pub fn try_add_updater<F>(&self, updater: F)
    where
        F: Fn(T, FrameIndex) -> FramefoldResult<T> + Send + Sync + 'static,
    {
        self.write().updaters.push(Arc::new(updater));
    }

    /// Whether a setter is attached.
    pub fn has_setter(&self) -> bool {
        self.read().setter.is_some()
    }

    /// Number of registered updaters.
    pub fn updater_count(&self) -> usize {
        self.read().updaters.len()
    }

    /// Resolve the value for `frame`.
    pub fn get(&self, frame: FrameIndex) -> FramefoldResult<T> {
        let (base, setter, updaters) = {
            let state = self.read();
            (
                state.base.clone(),
                state.setter.clone(),
                state.updaters.clone(),
            )
        };
        let mut value = match setter {
            Some(setter) => setter(frame)?,
            None => base,
        };
        for updater in &updaters {
            value = updater(value, frame)?;
        }
        Ok(value)
    }

    fn read(&self) -> RwLockReadGuard<'_, ParamState<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ParamState<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> From<T> for DynamicValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl From<(u8, u8, u8)> for DynamicValue<Rgb8> {
    fn from(rgb: (u8, u8, u8)) -> Self {
        Self::new(Rgb8::from(rgb))
    }
}

impl<T> fmt::Debug for DynamicValue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("DynamicValue")
            .field("base", &state.base)
            .field("setter", &state.setter.is_some())
            .field("updaters", &state.updaters.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/param.rs"]
mod tests;
