//! FILENAME: core/template-engine/src/context.rs
//! PURPOSE: Layered variable scopes used while rendering.
//! CONTEXT: A `Context` is an ordered list of shared layers, outermost first.
//! Lookups walk the layers from innermost to outermost, so a loop scope pushed
//! with `with_layer` shadows the variables below it without copying them.
//!
//! Layers are reference counted. Two contexts derived from the same parent
//! share their leading layers, which `overlay` relies on to merge a stored
//! column context with the live row context without duplicating the root.
//!
//! The evaluator sees a context as a map object (`to_value`) that resolves
//! names through the same layered lookup.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use minijinja::context;
use minijinja::value::{Enumerator, Object};

use crate::value::{from_json, Value};

/// One layer of variables.
pub type Scope = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct Context {
    layers: Vec<Arc<Scope>>,
}

impl Context {
    /// Creates a context with a single root layer.
    pub fn new(root: Scope) -> Self {
        Context {
            layers: vec![Arc::new(root)],
        }
    }

    /// Builds a root context from a JSON object.
    /// Non-object values produce an empty context.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Context::new(
                map.iter()
                    .map(|(name, value)| (name.clone(), from_json(value)))
                    .collect(),
            ),
            _ => Context::new(Scope::new()),
        }
    }

    /// Looks a name up, innermost layer first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.layers.iter().rev().find_map(|layer| layer.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns a new context with `scope` as the innermost layer.
    pub fn with_layer(&self, scope: Scope) -> Context {
        let mut layers = self.layers.clone();
        layers.push(Arc::new(scope));
        Context { layers }
    }

    /// Returns a new context binding a single variable.
    pub fn with_var(&self, name: impl Into<String>, value: Value) -> Context {
        let mut scope = Scope::new();
        scope.insert(name.into(), value);
        self.with_layer(scope)
    }

    /// Stacks `top` above `self`: the result holds every layer of `self`
    /// followed by the layers of `top` that `self` does not already share.
    /// Names defined in `top` win.
    pub fn overlay(&self, top: &Context) -> Context {
        let shared = self
            .layers
            .iter()
            .zip(top.layers.iter())
            .take_while(|(a, b)| Arc::ptr_eq(a, b))
            .count();

        let mut layers = self.layers.clone();
        layers.extend(top.layers[shared..].iter().cloned());
        Context { layers }
    }

    /// The context as an evaluator value. Layers are shared, not copied.
    pub fn to_value(&self) -> Value {
        Value::from_object(self.clone())
    }
}

impl Object for Context {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        self.get(key.as_str()?).cloned()
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        let names: BTreeSet<&str> = self
            .layers
            .iter()
            .flat_map(|layer| layer.keys().map(String::as_str))
            .collect();
        Enumerator::Values(names.into_iter().map(Value::from).collect())
    }
}

impl From<Scope> for Context {
    fn from(root: Scope) -> Self {
        Context::new(root)
    }
}

/// Builds the `loop` record for iteration `index0` of `length`.
pub fn loop_record(index0: usize, length: usize) -> Value {
    let (index0, length) = (index0 as i64, length as i64);
    context! {
        index => index0 + 1,
        index0 => index0,
        first => index0 == 0,
        last => index0 + 1 == length,
        length => length,
        revindex => length - index0,
        revindex0 => length - index0 - 1,
    }
}
