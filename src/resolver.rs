use std::collections::HashMap;
use std::mem;

use crate::error::{Error, ResolveError};
use crate::expr::{self, Expr, ExprVisitor};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::stmt::{self, Stmt, StmtVisitor};
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
}

/// Walks the AST before evaluation and binds every variable use to the
/// scope that declares it, writing `expression id -> distance` entries into
/// the interpreter's locals map. Names the resolver cannot find in any
/// lexical scope are left for the global environment at runtime.
pub struct Resolver<'a, 'out> {
    interpreter: &'a mut Interpreter<'out>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'out> Resolver<'a, 'out> {
    pub fn new(interpreter: &'a mut Interpreter<'out>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement)
        }
    }

    /// Resolves a function body: parameters and body share one scope, the
    /// same way they share one environment frame at runtime.
    fn resolve_function(&mut self, function: &stmt::FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Adds the name to the innermost scope as declared but not defined.
    /// Redeclaration is only allowed at the global scope.
    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        let scope = self.scopes.last_mut().expect("scope stack to be non-empty");
        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: format!("already a variable with name '{}' in this scope", name.lexeme),
            }.throw();
        }
        scope.insert(name.lexeme.to_owned(), false);
    }

    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        self.scopes
            .last_mut()
            .expect("scope stack to be non-empty")
            .insert(name.lexeme.to_owned(), true);
    }

    /// Records the distance from the innermost scope to the scope that
    /// holds the name. Unfound names fall back to globals at runtime.
    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }
}

impl<'a, 'out> ExprVisitor<()> for Resolver<'a, 'out> {
    fn visit_literal_expr(&mut self, _literal: &Literal) {}

    fn visit_grouping_expr(&mut self, grouping: &expr::GroupingData) {
        self.resolve_expr(&grouping.expr);
    }

    fn visit_unary_expr(&mut self, unary: &expr::UnaryData) {
        self.resolve_expr(&unary.expr);
    }

    fn visit_binary_expr(&mut self, binary: &expr::BinaryData) {
        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_logical_expr(&mut self, logical: &expr::LogicalData) {
        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_variable_expr(&mut self, variable: &expr::VariableData) {
        if let Some(scope) = self.scopes.last() {
            if let Some(defined) = scope.get(&variable.name.lexeme) {
                if !defined {
                    ResolveError {
                        token: variable.name.to_owned(),
                        message: "cannot read local variable in its own initializer".to_string(),
                    }.throw();
                }
            }
        }

        self.resolve_local(variable.id, &variable.name);
    }

    fn visit_assign_expr(&mut self, assign: &expr::AssignData) {
        self.resolve_expr(&assign.value);
        self.resolve_local(assign.id, &assign.name);
    }

    fn visit_call_expr(&mut self, call: &expr::CallData) {
        self.resolve_expr(&call.callee);

        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_lambda_expr(&mut self, lambda: &expr::LambdaData) {
        let enclosing_function = mem::replace(&mut self.current_function, FunctionType::Function);

        self.begin_scope();
        for param in &lambda.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&lambda.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn visit_get_expr(&mut self, get: &expr::GetData) {
        self.resolve_expr(&get.object);
    }

    fn visit_set_expr(&mut self, set: &expr::SetData) {
        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
    }

    fn visit_this_expr(&mut self, this: &expr::ThisData) {
        if let ClassType::None = self.current_class {
            ResolveError {
                token: this.keyword.clone(),
                message: "cannot use 'this' outside of a class".to_string(),
            }.throw();

            return;
        }

        self.resolve_local(this.id, &this.keyword);
    }
}

impl<'a, 'out> StmtVisitor<()> for Resolver<'a, 'out> {
    fn visit_expression_stmt(&mut self, stmt: &stmt::ExpressionData) {
        self.resolve_expr(&stmt.expr);
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::PrintData) {
        self.resolve_expr(&stmt.expr);
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::VarData) {
        self.declare(&stmt.name);
        if let Some(initializer) = &stmt.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&stmt.name);
    }

    fn visit_block_stmt(&mut self, stmt: &stmt::BlockData) {
        self.begin_scope();
        self.resolve(&stmt.statements);
        self.end_scope();
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::IfData) {
        self.resolve_expr(&stmt.condition);
        self.resolve_stmt(&stmt.then_branch);
        if let Some(else_branch) = &stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::WhileData) {
        self.resolve_expr(&stmt.condition);
        self.resolve_stmt(&stmt.body);
        if let Some(increment) = &stmt.increment {
            self.resolve_expr(increment);
        }
    }

    fn visit_break_stmt(&mut self, _stmt: &stmt::BreakData) {}

    fn visit_continue_stmt(&mut self, _stmt: &stmt::ContinueData) {}

    fn visit_return_stmt(&mut self, stmt: &stmt::ReturnData) {
        if let FunctionType::None = self.current_function {
            ResolveError {
                token: stmt.keyword.clone(),
                message: "cannot return from top-level code".to_string(),
            }.throw();
        }

        if let Some(value) = &stmt.value {
            if let FunctionType::Initializer = self.current_function {
                ResolveError {
                    token: stmt.keyword.clone(),
                    message: "cannot return a value from an initializer".to_string(),
                }.throw();
                return;
            }

            self.resolve_expr(value);
        }
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::FunctionData) {
        // The name goes into the enclosing scope first so the function can
        // call itself.
        self.declare(&stmt.name);
        self.define(&stmt.name);

        self.resolve_function(stmt, FunctionType::Function);
    }

    fn visit_class_stmt(&mut self, stmt: &stmt::ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&stmt.name);
        self.define(&stmt.name);

        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope stack to be non-empty")
            .insert("this".to_string(), true);

        for method in &stmt.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let declaration = if function.name.lexeme.eq("init") {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(function, declaration);
        }

        self.end_scope();

        self.current_class = enclosing_class;
    }
}
