use std::{cell::RefCell, collections::HashMap, rc::Rc};

use log::debug;

use crate::types::Object;

#[derive(Debug, Default)]
pub struct Env {
    values: HashMap<String, Object>,
    parent: Option<Rc<RefCell<Env>>>,
}

impl Env {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn with_parent(parent: Rc<RefCell<Env>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            parent: Some(parent),
            ..Default::default()
        }))
    }

    /// Binds `name` in this scope only, replacing any previous binding.
    pub fn set(&mut self, name: &str, value: Object) {
        debug!("Set {name} -> {value:?}");
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        debug!("Get {name}");
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            debug!("Get {name} from parent");
            return parent.borrow().get(name);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_and_get() {
        let env = Env::new();
        env.borrow_mut().set("x", Object::Integer(5));
        assert_eq!(env.borrow().get("x"), Some(Object::Integer(5)));
        assert_eq!(env.borrow().get("y"), None);
    }

    #[test]
    fn overwrite() {
        let env = Env::new();
        env.borrow_mut().set("x", Object::Integer(5));
        env.borrow_mut().set("x", Object::Boolean(true));
        assert_eq!(env.borrow().get("x"), Some(Object::Boolean(true)));
    }

    #[test]
    fn parent_lookup() {
        let parent = Env::new();
        parent.borrow_mut().set("x", Object::Integer(1));
        let child = Env::with_parent(Rc::clone(&parent));
        child.borrow_mut().set("y", Object::Integer(2));
        assert_eq!(child.borrow().get("x"), Some(Object::Integer(1)));
        assert_eq!(child.borrow().get("y"), Some(Object::Integer(2)));
        assert_eq!(parent.borrow().get("y"), None);
    }

    #[test]
    fn shadowing() {
        let parent = Env::new();
        parent.borrow_mut().set("x", Object::Integer(1));
        let child = Env::with_parent(Rc::clone(&parent));
        child.borrow_mut().set("x", Object::Integer(2));
        assert_eq!(child.borrow().get("x"), Some(Object::Integer(2)));
        assert_eq!(parent.borrow().get("x"), Some(Object::Integer(1)));
    }

    #[test]
    fn shared_parent() {
        let parent = Env::new();
        let first = Env::with_parent(Rc::clone(&parent));
        let second = Env::with_parent(Rc::clone(&parent));
        parent.borrow_mut().set("x", Object::Integer(3));
        assert_eq!(first.borrow().get("x"), Some(Object::Integer(3)));
        assert_eq!(second.borrow().get("x"), Some(Object::Integer(3)));
    }
}
