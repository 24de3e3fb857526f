use std::fmt::Display;

use crate::types::Object;

/// Early exit from the statement being evaluated. `Return` is
/// absorbed by the nearest enclosing call, `Error` by nothing.
#[derive(Debug, PartialEq)]
pub enum Exception {
    Error(String),
    Return(Object),
}

impl Display for Exception {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&match self {
            Self::Return(val) => val.to_string(),
            Self::Error(e) => e.to_owned(),
        })
    }
}

#[derive(Debug)]
pub enum ErrorMsg {
    // Runtime errors
    TypeMismatch,
    UnknownOperator,
    DivisionByZero,
    NotCallable,
    WrongArgCount,
    // Memory errors
    UndefinedVar,
}

impl Display for ErrorMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::TypeMismatch => "type mismatch",
            Self::UnknownOperator => "unknown operator",
            Self::DivisionByZero => "division by zero",
            Self::NotCallable => "not a function",
            Self::WrongArgCount => "wrong number of arguments",
            Self::UndefinedVar => "identifier not found",
        })
    }
}

pub fn make(msg: ErrorMsg, ctx: impl Display) -> Exception {
    Exception::Error(format!("{msg}: {ctx}"))
}
