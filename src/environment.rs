use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::literal::Literal;
use crate::object::Object;
use crate::token::Token;

/// A single frame of name bindings plus a pointer to its enclosing frame.
///
/// Frames form a tree rooted at the global environment. Closures keep their
/// defining frame alive through the shared `Rc` handle, so mutations made
/// through an outer frame stay visible to every closure that captured it.
///
/// A name can be declared without being initialized; the `initialized` map
/// tracks that separately so reading such a slot can be rejected.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Object>,
    initialized: HashMap<String, bool>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            values: HashMap::new(),
            initialized: HashMap::new(),
        }
    }

    /// Binds a name as declared but not yet initialized.
    pub fn define(&mut self, name: &str) {
        self.values.insert(name.to_string(), Object::Literal(Literal::Nil));
        self.initialized.insert(name.to_string(), false);
    }

    /// Binds a name to a value and marks it initialized.
    pub fn define_init(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_string(), value);
        self.initialized.insert(name.to_string(), true);
    }

    /// Returns the frame `distance` hops up the enclosing chain.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let parent = self.enclosing.clone()
            .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", 1));
        let mut environment = Rc::clone(&parent);

        for i in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", i));
            environment = Rc::clone(&parent);
        }

        environment
    }

    /// Reads a slot in this frame, rejecting uninitialized reads.
    fn read(&self, name: &Token) -> Result<Object, RuntimeError> {
        match self.values.get(&name.lexeme) {
            Some(_) if !self.initialized.get(&name.lexeme).copied().unwrap_or(false) => {
                Err(RuntimeError {
                    token: name.clone(),
                    message: format!("variable '{}' must be initialized before use", name.lexeme),
                })
            },
            Some(value) => Ok(value.clone()),
            None => Err(RuntimeError {
                token: name.clone(),
                message: format!("undefined variable '{}'", name.lexeme),
            }),
        }
    }

    /// Looks a name up through the enclosing chain.
    /// This is the fallback path for names the resolver left unbound.
    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            return self.read(name);
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("undefined variable '{}'", name.lexeme),
        })
    }

    /// Reads the slot in the frame `distance` hops up the chain.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        if distance > 0 {
            self.ancestor(distance).borrow().read(name)
        } else {
            self.read(name)
        }
    }

    /// Assigns to a name through the enclosing chain, marking it
    /// initialized. This is the fallback path for unresolved names.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            self.initialized.insert(name.lexeme.clone(), true);
            return Ok(());
        }

        if let Some(enclosing) = &mut self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("undefined variable '{}'", name.lexeme),
        })
    }

    /// Writes the slot in the frame `distance` hops up the chain.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            let ancestor = self.ancestor(distance);
            let mut ancestor = ancestor.borrow_mut();
            ancestor.values.insert(name.lexeme.clone(), value);
            ancestor.initialized.insert(name.lexeme.clone(), true);
        } else {
            self.values.insert(name.lexeme.clone(), value);
            self.initialized.insert(name.lexeme.clone(), true);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn wrap(environment: Environment) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(environment))
    }

    #[test]
    fn define_and_get() {
        let mut environment = Environment::default();
        environment.define_init("a", Object::from(1.0));

        assert_eq!(environment.get(&Token::from("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn get_uninitialized_is_an_error() {
        let mut environment = Environment::default();
        environment.define("a");

        assert!(environment.get(&Token::from("a")).is_err());
    }

    #[test]
    fn assign_marks_initialized() {
        let mut environment = Environment::default();
        environment.define("a");
        environment.assign(&Token::from("a"), Object::from(2.0)).unwrap();

        assert_eq!(environment.get(&Token::from("a")).unwrap(), Object::from(2.0));
    }

    #[test]
    fn assign_undefined_is_an_error() {
        let mut environment = Environment::default();

        assert!(environment.assign(&Token::from("a"), Object::from(2.0)).is_err());
    }

    #[test]
    fn get_walks_the_enclosing_chain() {
        let mut global = Environment::default();
        global.define_init("a", Object::from("outer"));

        let inner = Environment::new(Some(wrap(global)));

        assert_eq!(inner.get(&Token::from("a")).unwrap(), Object::from("outer"));
    }

    #[test]
    fn get_at_reads_the_exact_frame() {
        let mut global = Environment::default();
        global.define_init("a", Object::from("global"));

        let global = wrap(global);
        let mut middle = Environment::new(Some(Rc::clone(&global)));
        middle.define_init("a", Object::from("middle"));

        let inner = Environment::new(Some(wrap(middle)));

        assert_eq!(inner.get_at(1, &Token::from("a")).unwrap(), Object::from("middle"));
        assert_eq!(inner.get_at(2, &Token::from("a")).unwrap(), Object::from("global"));
    }

    #[test]
    fn assign_at_writes_the_exact_frame() {
        let mut global = Environment::default();
        global.define_init("a", Object::from("global"));

        let global = wrap(global);
        let mut inner = Environment::new(Some(Rc::clone(&global)));

        inner.assign_at(1, &Token::from("a"), Object::from("changed"));

        assert_eq!(global.borrow().get(&Token::from("a")).unwrap(), Object::from("changed"));
    }
}
