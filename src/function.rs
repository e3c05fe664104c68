use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{Interrupt, RuntimeError};
use crate::expr::LambdaData;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{FunctionData, Stmt};
use crate::token::Token;

/// A named user function. The declaration is shared behind `Rc` so cloning
/// the value does not copy its body, and two clones of the same function
/// stay equal by identity.
#[derive(Clone)]
pub struct Function {
    pub name: Token,
    params: Rc<Vec<Token>>,
    body: Rc<Vec<Stmt>>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl Function {
    pub fn new(declaration: &FunctionData, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function {
            name: declaration.name.clone(),
            params: Rc::new(declaration.params.clone()),
            body: Rc::new(declaration.body.clone()),
            closure,
            is_initializer,
        }
    }

    /// Returns a copy of this method with `this` bound to the instance.
    /// The binding lives in a fresh frame slotted between the method body
    /// and its original closure.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define_init("this", instance);

        Function {
            name: self.name.clone(),
            params: Rc::clone(&self.params),
            body: Rc::clone(&self.body),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    /// Reads the bound instance out of the closure. Only valid on bound
    /// initializers, whose closure holds `this` at distance zero.
    fn this(&self) -> Result<Object, RuntimeError> {
        self.closure.borrow().get_at(0, &Token::from("this"))
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, argument) in self.params.iter().zip(arguments) {
            environment.define_init(&param.lexeme, argument);
        }

        let result = interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment)));
        match result {
            Ok(()) if self.is_initializer => self.this(),
            Ok(()) => Ok(Object::from(Literal::Nil)),
            Err(Interrupt::Return(_)) if self.is_initializer => self.this(),
            Err(Interrupt::Return(value)) => Ok(value),
            Err(Interrupt::Error(error)) => Err(error),
            Err(Interrupt::Break(token)) => Err(RuntimeError {
                token,
                message: "no enclosing loop to break out of".to_string(),
            }),
            Err(Interrupt::Continue(token)) => Err(RuntimeError {
                token,
                message: "no enclosing loop to continue".to_string(),
            }),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

/// An anonymous function. Identical to a named function except for its
/// rendering and the absence of initializer semantics.
#[derive(Clone)]
pub struct Lambda {
    params: Rc<Vec<Token>>,
    body: Rc<Vec<Stmt>>,
    closure: Rc<RefCell<Environment>>,
}

impl Lambda {
    pub fn new(declaration: &LambdaData, closure: Rc<RefCell<Environment>>) -> Self {
        Lambda {
            params: Rc::new(declaration.params.clone()),
            body: Rc::new(declaration.body.clone()),
            closure,
        }
    }
}

impl Callable for Lambda {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, argument) in self.params.iter().zip(arguments) {
            environment.define_init(&param.lexeme, argument);
        }

        let result = interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment)));
        match result {
            Ok(()) => Ok(Object::from(Literal::Nil)),
            Err(Interrupt::Return(value)) => Ok(value),
            Err(Interrupt::Error(error)) => Err(error),
            Err(Interrupt::Break(token)) => Err(RuntimeError {
                token,
                message: "no enclosing loop to break out of".to_string(),
            }),
            Err(Interrupt::Continue(token)) => Err(RuntimeError {
                token,
                message: "no enclosing loop to continue".to_string(),
            }),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params.iter()
            .map(|param| param.lexeme.as_str())
            .collect::<Vec<&str>>()
            .join(",");

        write!(f, "<lambda ({params})>")
    }
}

impl Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub function: fn(&mut Interpreter<'_>, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        0
    }
}

impl NativeFunction {
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::from("clock"),
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .expect("system clock to be set past the unix epoch")
                        .as_nanos();
                    Ok(Object::from(now as f64))
                },
            },
        ]
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name.lexeme == other.name.lexeme && self.function == other.function
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}
