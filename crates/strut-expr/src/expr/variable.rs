//! Shared variable handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
struct VariableData {
    name: String,
    context: RwLock<Option<serde_json::Value>>,
    // f64 bits; written by the engine after a solve pass
    value: AtomicU64,
}

/// A named numeric unknown.
///
/// `Variable` is a cheap handle: cloning it shares the same underlying
/// unknown, and every [`Term`](crate::Term) naming it holds one such clone.
/// Equality and hashing are by identity, so two variables created with the
/// same name are still distinct unknowns.
#[derive(Clone)]
pub struct Variable {
    inner: Arc<VariableData>,
}

impl Variable {
    /// Create a variable with the given name and a value of zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), None)
    }

    /// Create a variable carrying an opaque context value.
    pub fn with_context(name: impl Into<String>, context: serde_json::Value) -> Self {
        Self::build(name.into(), Some(context))
    }

    fn build(name: String, context: Option<serde_json::Value>) -> Self {
        Self {
            inner: Arc::new(VariableData {
                name,
                context: RwLock::new(context),
                value: AtomicU64::new(0f64.to_bits()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Copy of the attached context, if any.
    pub fn context(&self) -> Option<serde_json::Value> {
        self.inner
            .context
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the attached context; `None` clears it. Every handle sees the change.
    pub fn set_context(&self, context: Option<serde_json::Value>) {
        *self
            .inner
            .context
            .write()
            .unwrap_or_else(PoisonError::into_inner) = context;
    }

    /// Current value as last written by the solving engine.
    pub fn value(&self) -> f64 {
        f64::from_bits(self.inner.value.load(Ordering::Acquire))
    }

    /// Store a solved value. Only the engine driving the solve should call this.
    pub fn set_value(&self, value: f64) {
        self.inner.value.store(value.to_bits(), Ordering::Release);
    }

    /// True when both handles refer to the same unknown.
    pub fn same_as(&self, other: &Variable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this unknown, including `self`.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    pub(crate) fn key(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.inner.name)
            .field("value", &self.value())
            .finish()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::Variable;

    #[test]
    fn new_variable_starts_at_zero() {
        let x = Variable::new("x");
        assert_eq!(x.name(), "x");
        assert_eq!(x.value(), 0.0);
        assert!(x.context().is_none());
    }

    #[test]
    fn default_variable_has_empty_name() {
        assert_eq!(Variable::default().name(), "");
    }

    #[test]
    fn clones_share_value() {
        let x = Variable::new("x");
        let alias = x.clone();
        alias.set_value(4.5);
        assert_eq!(x.value(), 4.5);
        assert!(x.same_as(&alias));
        assert_eq!(x.handle_count(), 2);
    }

    #[test]
    fn identity_not_name_decides_equality() {
        let a = Variable::new("x");
        let b = Variable::new("x");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn context_is_kept() {
        let ctx = serde_json::json!({"widget": "button", "edge": "left"});
        let x = Variable::with_context("left", ctx.clone());
        assert_eq!(x.context(), Some(ctx));
    }

    #[test]
    fn context_can_be_replaced_and_cleared() {
        let x = Variable::with_context("left", serde_json::json!(1));
        let alias = x.clone();
        alias.set_context(Some(serde_json::json!({"edge": "right"})));
        assert_eq!(x.context(), Some(serde_json::json!({"edge": "right"})));
        x.set_context(None);
        assert!(alias.context().is_none());
        assert_eq!(x.name(), "left");
    }

    #[test]
    fn display_is_name() {
        assert_eq!(Variable::new("width").to_string(), "width");
    }
}
