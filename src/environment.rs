use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::io::Write;
use std::rc::Rc;

pub type Env = Rc<RefCell<Environment>>;

/// Where `puts` writes. Shared with the front end that prints results.
pub type Output = Rc<RefCell<dyn Write>>;

/// One lexical scope. Lookups fall through to the enclosing scope; `set`
/// only ever binds in this one.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
    output: Option<Output>,
}

impl Environment {
    /// A root scope whose `puts` output goes to stdout.
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }
    /// A root scope whose `puts` output goes to `output`.
    pub fn with_output(output: Output) -> Env {
        Rc::new(RefCell::new(Environment {
            output: Some(output),
            ..Environment::default()
        }))
    }
    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
            output: None,
        }))
    }
    /// The sink of the nearest scope that has one.
    pub fn output(&self) -> Option<Output> {
        match &self.output {
            Some(output) => Some(Rc::clone(output)),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().output()),
        }
    }
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.store.insert(name.into(), value);
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("store", &self.store)
            .field("outer", &self.outer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::{Environment, Output};
    use crate::object::Object;
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    fn int(value: i64) -> Object {
        Object::Integer { value }
    }

    #[test]
    fn test_get_falls_through_to_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", int(1));
        let inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.borrow_mut().set("b", int(2));

        assert_eq!(Some(int(1)), inner.borrow().get("a"));
        assert_eq!(Some(int(2)), inner.borrow().get("b"));
        assert_eq!(None, outer.borrow().get("b"));
        assert_eq!(None, inner.borrow().get("c"));
    }

    #[test]
    fn test_set_shadows_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", int(1));
        let inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.borrow_mut().set("a", int(10));

        assert_eq!(Some(int(10)), inner.borrow().get("a"));
        assert_eq!(Some(int(1)), outer.borrow().get("a"));
    }

    #[test]
    fn test_outer_updates_are_visible() {
        let outer = Environment::new();
        let inner = Environment::new_enclosed(Rc::clone(&outer));
        outer.borrow_mut().set("late", int(7));
        assert_eq!(Some(int(7)), inner.borrow().get("late"));
    }

    #[test]
    fn test_output_is_inherited_by_enclosed_scopes() {
        let buf = Rc::new(RefCell::new(Vec::<u8>::new()));
        let sink: Output = buf.clone();
        let root = Environment::with_output(sink);
        let inner = Environment::new_enclosed(Environment::new_enclosed(root));

        let output = inner.borrow().output();
        assert!(output.is_some());
        if let Some(output) = output {
            write!(output.borrow_mut(), "hi").unwrap();
        }
        assert_eq!(b"hi".to_vec(), *buf.borrow());
        assert!(Environment::new().borrow().output().is_none());
    }
}
