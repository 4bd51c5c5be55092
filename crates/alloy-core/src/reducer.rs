//! [`Reducer`] — the plugin-supplied fold function for epic-scope replay.

use serde_json::Value;

/// Folds one epic-scope delta into accumulated state.
///
/// Treated as a first-class value passed into [`ContextFactory::bind`]
/// (spec §9: "Per-plugin reducers supplied at runtime… In a language
/// without closures-as-values, use a small polymorphic interface with a
/// single `apply` method"). A blanket impl covers plain closures so plugin
/// authors rarely need to name a type for this.
///
/// [`ContextFactory::bind`]: ../../alloy_framework/factory/struct.ContextFactory.html#method.bind
pub trait Reducer: Send + Sync {
    /// Folds `delta` into `state`, returning the new state.
    ///
    /// `state` is `None` before the first event is applied (spec §4.3 step
    /// 4: "starting from `null`").
    fn apply(&self, state: Option<Value>, delta: &Value) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(Option<Value>, &Value) -> Value + Send + Sync,
{
    fn apply(&self, state: Option<Value>, delta: &Value) -> Value {
        self(state, delta)
    }
}
