use std::{
    cell::RefCell,
    fmt::{Debug, Display},
    rc::Rc,
};

use cardboard_syntax::ast::Stmt;

use crate::{environment::Env, error::Exception, interpret::Interpreter};

#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Func(Func),
    Error(String),
    Return(Box<Object>),
    Null,
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Func(func) => write!(f, "{func}"),
            Self::Error(e) => write!(f, "Runtime error: {e}"),
            Self::Return(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::Func(_) => "FUNCTION",
            Self::Error(_) => "ERROR",
            Self::Return(_) => "RETURN",
            Self::Null => "NULL",
        }
    }
}

pub trait Callable {
    fn arity(&self) -> usize;
    fn call(&self, interpreter: &mut Interpreter, args: Vec<Object>) -> Result<Object, Exception>;
}

/// A closure created by evaluating a `box` literal. The captured
/// environment is shared, so later bindings in it are visible to calls.
#[derive(Clone)]
pub struct Func {
    pub params: Vec<String>,
    pub body: Rc<Vec<Stmt>>,
    pub env: Rc<RefCell<Env>>,
}

impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
            && self.body == other.body
            && Rc::ptr_eq(&self.env, &other.env)
    }
}

// The captured environment usually holds the function itself
impl Debug for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Func")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "box({})", self.params.join(", "))
    }
}

impl Callable for Func {
    fn arity(&self) -> usize {
        self.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, args: Vec<Object>) -> Result<Object, Exception> {
        interpreter.call_func(self, args)
    }
}
