use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// Shared handle to a scope. Closures and call frames hold these, so one
/// scope can outlive the call that created it.
pub type Env = Rc<RefCell<Environment>>;

/// Name bindings for one scope, plus the scope enclosing it.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// A fresh scope whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, obj: Object) {
        self.store.insert(name.into(), obj);
    }

    /// Every name visible from this scope starting with `prefix`, sorted and
    /// without duplicates.
    pub fn names_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .store
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect();
        if let Some(outer) = &self.outer {
            names.extend(outer.borrow().names_with_prefix(prefix));
        }
        names.sort();
        names.dedup();
        names
    }
}
