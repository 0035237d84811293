use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::prelude::Value;

pub type ScopeRef = Rc<RefCell<Scope>>;

/// A lexical binding environment. Scopes only point at their parent, so a
/// chain of them is always a tree.
#[derive(Default, Debug)]
pub struct Scope {
    store: HashMap<String, Value>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            parent: None
        }
    }

    /// A fresh root scope. Every independent evaluation should get its own.
    pub fn global() -> ScopeRef {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            parent: Some(parent.clone())
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref()
                .and_then(|parent| parent.borrow().get(name))
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Binds `name` in this scope, replacing any earlier binding here.
    pub fn define(&mut self, name: String, value: Value) {
        self.store.insert(name, value);
    }

    /// Rebinds `name` in the nearest scope of the chain that already binds it.
    /// Hands the value back when no scope does.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), Value> {
        if let Some(slot) = self.store.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(value)
        }
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    pub fn names(&self) -> Vec<&String> {
        let mut names = self.store.keys().collect::<Vec<&String>>();
        names.sort();
        names
    }
}
