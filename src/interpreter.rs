use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, Interrupt, RuntimeError};
use crate::expr::{self, Expr, ExprVisitor};
use crate::function::{Function, Lambda, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{self, Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Walks the AST and evaluates it against a chain of environments.
///
/// The locals map produced by the resolver pins every resolved variable use
/// to the exact ancestor frame; anything else falls back to the global
/// environment. Printed output goes to the injected writer so callers can
/// capture it.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    out: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define_init(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Records the scope distance of a resolved expression.
    /// Called by the resolver, consumed by the variable access paths.
    pub fn resolve(&mut self, id: usize, distance: usize) {
        self.locals.insert(id, distance);
    }

    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => (),
                Err(Interrupt::Error(error)) => {
                    error.throw();
                    return;
                },
                // Break, continue and return cannot reach the top level; the
                // parser and the resolver reject them there.
                Err(interrupt) => unreachable!("unexpected top-level {interrupt:?}"),
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Interrupt> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    /// Executes statements with the given environment as the current frame,
    /// restoring the previous frame afterwards.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Interrupt> {
        let previous = mem::replace(&mut self.environment, environment);
        let result = statements.iter().try_for_each(|statement| self.execute(statement));
        self.environment = previous;

        result
    }

    fn look_up_variable(&self, id: usize, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn number_operands(operator: &Token, left: Object, right: Object) -> Result<(f64, f64), RuntimeError> {
        match (left, right) {
            (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => Ok((left, right)),
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "operands must be numbers".to_string(),
            }),
        }
    }
}

impl<'a> ExprVisitor<Result<Object, RuntimeError>> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> Result<Object, RuntimeError> {
        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, grouping: &expr::GroupingData) -> Result<Object, RuntimeError> {
        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &expr::UnaryData) -> Result<Object, RuntimeError> {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => match right {
                Object::Literal(Literal::Number(value)) => Ok(Object::from(-value)),
                _ => Err(RuntimeError {
                    token: unary.operator.clone(),
                    message: "operand must be a number".to_string(),
                }),
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &expr::BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let operator = &binary.operator;

        match operator.r#type {
            Type::Plus => match (left, right) {
                (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
                    Ok(Object::from(left + right))
                },
                (Object::Literal(Literal::String(left)), Object::Literal(Literal::String(right))) => {
                    Ok(Object::from(left + &right))
                },
                _ => Err(RuntimeError {
                    token: operator.clone(),
                    message: "operands must be two numbers or two strings".to_string(),
                }),
            },
            Type::Minus => {
                let (left, right) = Self::number_operands(operator, left, right)?;
                Ok(Object::from(left - right))
            },
            Type::Star => {
                let (left, right) = Self::number_operands(operator, left, right)?;
                Ok(Object::from(left * right))
            },
            Type::Slash => {
                let (left, right) = Self::number_operands(operator, left, right)?;
                if right == 0.0 {
                    return Err(RuntimeError {
                        token: operator.clone(),
                        message: "division by zero".to_string(),
                    });
                }
                Ok(Object::from(left / right))
            },
            Type::Greater => {
                let (left, right) = Self::number_operands(operator, left, right)?;
                Ok(Object::from(left > right))
            },
            Type::GreaterEqual => {
                let (left, right) = Self::number_operands(operator, left, right)?;
                Ok(Object::from(left >= right))
            },
            Type::Less => {
                let (left, right) = Self::number_operands(operator, left, right)?;
                Ok(Object::from(left < right))
            },
            Type::LessEqual => {
                let (left, right) = Self::number_operands(operator, left, right)?;
                Ok(Object::from(left <= right))
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, logical: &expr::LogicalData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&logical.left)?;

        // Short-circuit: the untouched operand value is returned as is,
        // not coerced into a boolean.
        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_variable_expr(&mut self, variable: &expr::VariableData) -> Result<Object, RuntimeError> {
        self.look_up_variable(variable.id, &variable.name)
    }

    fn visit_assign_expr(&mut self, assign: &expr::AssignData) -> Result<Object, RuntimeError> {
        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &expr::CallData) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::Lambda(lambda) => lambda,
            Object::NativeFunction(native) => native,
            Object::Class(class) => class,
            _ => return Err(RuntimeError {
                token: call.paren.clone(),
                message: "can only call functions and classes".to_string(),
            }),
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("expected {} arguments but got {}", callable.arity(), arguments.len()),
            });
        }

        callable.call(self, arguments)
    }

    fn visit_lambda_expr(&mut self, lambda: &expr::LambdaData) -> Result<Object, RuntimeError> {
        Ok(Object::from(Lambda::new(lambda, Rc::clone(&self.environment))))
    }

    fn visit_get_expr(&mut self, get: &expr::GetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&get.name, &object),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "only instances have properties".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, set: &expr::SetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "only instances have fields".to_string(),
            });
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, this: &expr::ThisData) -> Result<Object, RuntimeError> {
        self.look_up_variable(this.id, &this.keyword)
    }
}

impl<'a> StmtVisitor<Result<(), Interrupt>> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &stmt::ExpressionData) -> Result<(), Interrupt> {
        self.evaluate(&stmt.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::PrintData) -> Result<(), Interrupt> {
        let value = self.evaluate(&stmt.expr)?;
        writeln!(self.out, "{value}").expect("output stream to be writable");
        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::VarData) -> Result<(), Interrupt> {
        match &stmt.initializer {
            Some(initializer) => {
                let value = self.evaluate(initializer)?;
                self.environment.borrow_mut().define_init(&stmt.name.lexeme, value);
            },
            None => {
                self.environment.borrow_mut().define(&stmt.name.lexeme);
            },
        }

        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &stmt::BlockData) -> Result<(), Interrupt> {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&stmt.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::IfData) -> Result<(), Interrupt> {
        if self.evaluate(&stmt.condition)?.is_truthy() {
            self.execute(&stmt.then_branch)
        } else if let Some(else_branch) = &stmt.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::WhileData) -> Result<(), Interrupt> {
        while self.evaluate(&stmt.condition)?.is_truthy() {
            match self.execute(&stmt.body) {
                Ok(()) => (),
                Err(Interrupt::Break(_)) => break,
                // A continued iteration still runs the for-loop increment.
                Err(Interrupt::Continue(_)) => (),
                Err(interrupt) => return Err(interrupt),
            }

            if let Some(increment) = &stmt.increment {
                self.evaluate(increment)?;
            }
        }

        Ok(())
    }

    fn visit_break_stmt(&mut self, stmt: &stmt::BreakData) -> Result<(), Interrupt> {
        Err(Interrupt::Break(stmt.keyword.clone()))
    }

    fn visit_continue_stmt(&mut self, stmt: &stmt::ContinueData) -> Result<(), Interrupt> {
        Err(Interrupt::Continue(stmt.keyword.clone()))
    }

    fn visit_return_stmt(&mut self, stmt: &stmt::ReturnData) -> Result<(), Interrupt> {
        let value = match &stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Err(Interrupt::Return(value))
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::FunctionData) -> Result<(), Interrupt> {
        let function = Function::new(stmt, Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define_init(&stmt.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_class_stmt(&mut self, stmt: &stmt::ClassData) -> Result<(), Interrupt> {
        self.environment.borrow_mut().define(&stmt.name.lexeme);

        let mut methods = HashMap::new();
        for method in &stmt.methods {
            let Stmt::Function(declaration) = method else { unreachable!() };

            let is_initializer = declaration.name.lexeme.eq("init");
            let function = Function::new(declaration, Rc::clone(&self.environment), is_initializer);
            methods.insert(declaration.name.lexeme.clone(), function);
        }

        let class = Object::from(Rc::new(Class::new(stmt.name.lexeme.clone(), methods)));
        self.environment.borrow_mut().assign(&stmt.name, class)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn token(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, 1)
    }

    fn binary(left: Literal, operator: Token, right: Literal) -> Expr {
        Expr::Binary(expr::BinaryData {
            left: Box::new(Expr::Literal(left)),
            operator,
            right: Box::new(Expr::Literal(right)),
        })
    }

    #[test]
    fn evaluate_literal() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Literal(Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_unary_minus() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Unary(expr::UnaryData {
            operator: token(Type::Minus, "-"),
            expr: Box::new(Expr::Literal(Literal::Number(12.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(-12.0));
    }

    #[test]
    fn evaluate_unary_minus_on_string_is_an_error() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Unary(expr::UnaryData {
            operator: token(Type::Minus, "-"),
            expr: Box::new(Expr::Literal(Literal::from("a"))),
        });
        assert!(interpreter.evaluate(&expr).is_err());
    }

    #[test]
    fn evaluate_bang_uses_truthiness() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = Expr::Unary(expr::UnaryData {
            operator: token(Type::Bang, "!"),
            expr: Box::new(Expr::Literal(Literal::Number(0.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_addition() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = binary(Literal::Number(6.0), token(Type::Plus, "+"), Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(18.0));
    }

    #[test]
    fn evaluate_string_concatenation() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = binary(Literal::from("Hello"), token(Type::Plus, "+"), Literal::from("World"));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("HelloWorld"));
    }

    #[test]
    fn evaluate_mixed_addition_is_an_error() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = binary(Literal::from("Hello"), token(Type::Plus, "+"), Literal::Number(12.0));

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "operands must be two numbers or two strings");
    }

    #[test]
    fn evaluate_division_by_zero_is_an_error() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = binary(Literal::Number(1.0), token(Type::Slash, "/"), Literal::Number(0.0));

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "division by zero");
    }

    #[test]
    fn evaluate_comparison() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = binary(Literal::Number(12.0), token(Type::Greater, ">"), Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));

        let expr = binary(Literal::Number(12.0), token(Type::GreaterEqual, ">="), Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));
    }

    #[test]
    fn evaluate_comparison_on_strings_is_an_error() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = binary(Literal::from("a"), token(Type::Less, "<"), Literal::from("b"));
        assert!(interpreter.evaluate(&expr).is_err());
    }

    #[test]
    fn evaluate_equality_across_types() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = binary(Literal::Nil, token(Type::EqualEqual, "=="), Literal::Nil);
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));

        let expr = binary(Literal::Nil, token(Type::EqualEqual, "=="), Literal::Number(0.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));

        let expr = binary(Literal::Number(12.0), token(Type::BangEqual, "!="), Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn clock_is_defined_in_globals() {
        let mut out = Vec::new();
        let interpreter = Interpreter::new(&mut out);
        let clock = interpreter.globals.borrow().get(&Token::from("clock")).unwrap();
        assert_eq!(clock.type_str(), "native function");
    }
}
