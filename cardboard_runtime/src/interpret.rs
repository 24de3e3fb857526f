use std::{cell::RefCell, mem, rc::Rc};

use crate::{
    environment::Env,
    error::{make, ErrorMsg, Exception},
    types::{Callable, Func, Object},
};
use cardboard_syntax::ast::{BinOp, Expr, Ident, Program, Stmt, UnaryOp};

#[derive(Debug)]
pub struct Interpreter {
    env: Rc<RefCell<Env>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Interpreter {
    pub fn new(env: Option<Rc<RefCell<Env>>>) -> Self {
        Self {
            env: env.unwrap_or_else(Env::new),
        }
    }

    pub fn env(&self) -> Rc<RefCell<Env>> {
        Rc::clone(&self.env)
    }

    /// Evaluates the program against the interpreter's environment and
    /// returns the value of the last statement. Errors surface as
    /// `Object::Error`; an `unbox` outside any call surfaces as
    /// `Object::Return`, since only a call absorbs it.
    pub fn interpret_all(&mut self, program: &Program) -> Object {
        match self.interpret_block(&program.stmts) {
            Ok(value) => value,
            Err(Exception::Return(value)) => Object::Return(Box::new(value)),
            Err(Exception::Error(e)) => Object::Error(e),
        }
    }

    fn interpret_block(&mut self, stmts: &[Stmt]) -> Result<Object, Exception> {
        let mut result = Object::Null;
        for stmt in stmts {
            result = self.interpret_stmt(stmt)?;
        }
        Ok(result)
    }

    fn interpret_stmt(&mut self, stmt: &Stmt) -> Result<Object, Exception> {
        match stmt {
            Stmt::Put { ident, value } => self.interpret_put_stmt(ident, value),
            Stmt::Unbox(expr) => self.interpret_unbox_stmt(expr),
            Stmt::Expr(expr) => self.interpret_expr(expr),
        }
    }

    fn interpret_put_stmt(&mut self, ident: &Ident, expr: &Expr) -> Result<Object, Exception> {
        let value = self.interpret_expr(expr)?;
        self.env.borrow_mut().set(&ident.name, value);
        Ok(Object::Null)
    }

    fn interpret_unbox_stmt(&mut self, expr: &Expr) -> Result<Object, Exception> {
        Err(Exception::Return(self.interpret_expr(expr)?))
    }

    fn interpret_expr(&mut self, expr: &Expr) -> Result<Object, Exception> {
        match expr {
            Expr::Ident(ident) => self.interpret_ident(ident),
            Expr::Integer(n) => Ok(Object::Integer(*n)),
            Expr::Unary { op, expr } => {
                let value = self.interpret_expr(expr)?;
                self.interpret_unary(op, value)
            }
            Expr::Binary { lhs, op, rhs } => {
                let left = self.interpret_expr(lhs)?;
                let right = self.interpret_expr(rhs)?;
                self.interpret_binary(left, op, right)
            }
            Expr::Function { params, body } => Ok(Object::Func(Func {
                params: params.iter().map(|p| p.name.clone()).collect(),
                body: Rc::clone(body),
                env: Rc::clone(&self.env),
            })),
            Expr::Call { func, args } => self.interpret_func_call(func, args),
        }
    }

    fn interpret_ident(&self, ident: &Ident) -> Result<Object, Exception> {
        self.env
            .borrow()
            .get(&ident.name)
            .ok_or_else(|| make(ErrorMsg::UndefinedVar, &ident.name))
    }

    fn interpret_unary(&self, op: &UnaryOp, value: Object) -> Result<Object, Exception> {
        match op {
            UnaryOp::Minus => match value {
                Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
                _ => Err(make(
                    ErrorMsg::TypeMismatch,
                    format!("{op}{}", value.type_name()),
                )),
            },
            UnaryOp::Bang => Ok(Object::Boolean(!self.to_bool(&value))),
        }
    }

    /// Zero and `null` are falsy, booleans are themselves,
    /// and everything else is truthy.
    fn to_bool(&self, value: &Object) -> bool {
        match value {
            Object::Null => false,
            Object::Boolean(b) => *b,
            Object::Integer(n) => *n != 0,
            _ => true,
        }
    }

    fn interpret_binary(&self, left: Object, op: &BinOp, right: Object) -> Result<Object, Exception> {
        match (&left, &right) {
            (Object::Integer(l), Object::Integer(r)) => self.interpret_integer_binary(*l, op, *r),
            (Object::Boolean(l), Object::Boolean(r)) => match op {
                BinOp::EqualEqual => Ok(Object::Boolean(l == r)),
                BinOp::BangEqual => Ok(Object::Boolean(l != r)),
                _ => Err(make(
                    ErrorMsg::UnknownOperator,
                    format!("{} {op} {}", left.type_name(), right.type_name()),
                )),
            },
            _ => {
                let msg = if left.type_name() == right.type_name() {
                    ErrorMsg::UnknownOperator
                } else {
                    ErrorMsg::TypeMismatch
                };
                Err(make(
                    msg,
                    format!("{} {op} {}", left.type_name(), right.type_name()),
                ))
            }
        }
    }

    fn interpret_integer_binary(&self, l: i64, op: &BinOp, r: i64) -> Result<Object, Exception> {
        Ok(match op {
            BinOp::Plus => Object::Integer(l.wrapping_add(r)),
            BinOp::Minus => Object::Integer(l.wrapping_sub(r)),
            BinOp::Star => Object::Integer(l.wrapping_mul(r)),
            BinOp::Slash => {
                if r == 0 {
                    return Err(make(ErrorMsg::DivisionByZero, format!("{l} / {r}")));
                }
                Object::Integer(l.wrapping_div(r))
            }
            BinOp::Less => Object::Boolean(l < r),
            BinOp::Greater => Object::Boolean(l > r),
            BinOp::EqualEqual => Object::Boolean(l == r),
            BinOp::BangEqual => Object::Boolean(l != r),
        })
    }

    fn interpret_func_call(&mut self, fn_expr: &Expr, arg_exprs: &[Expr]) -> Result<Object, Exception> {
        let func = match self.interpret_expr(fn_expr)? {
            Object::Func(f) => f,
            value => return Err(make(ErrorMsg::NotCallable, value.type_name())),
        };
        let mut args = vec![];
        for arg in arg_exprs {
            args.push(self.interpret_expr(arg)?);
        }
        // Ensure the number of arguments matches the function definition
        if func.arity() != args.len() {
            return Err(make(
                ErrorMsg::WrongArgCount,
                format!("expected {}, found {}", func.arity(), args.len()),
            ));
        }

        func.call(self, args)
    }

    pub(crate) fn call_func(&mut self, func: &Func, args: Vec<Object>) -> Result<Object, Exception> {
        // Calls are scoped under the captured environment, not the caller's
        let func_env = Env::with_parent(Rc::clone(&func.env));
        for (param, value) in func.params.iter().zip(args) {
            func_env.borrow_mut().set(param, value);
        }
        let old_env = mem::replace(&mut self.env, func_env);
        let res = self.interpret_block(&func.body);
        // Restore the env
        self.env = old_env;
        match res {
            Err(Exception::Return(value)) => Ok(value),
            res => res,
        }
    }
}
