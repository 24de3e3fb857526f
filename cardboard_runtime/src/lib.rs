pub mod environment;
pub mod error;
pub mod interpret;
pub mod types;

use cardboard_syntax::{error::Error, lex::Lexer, parse::Parser};
use interpret::Interpreter;
use log::trace;
use types::Object;

/// Runs `source` against the interpreter's environment. Syntax errors
/// are returned in the order they were found and nothing is evaluated;
/// runtime errors are part of the returned value.
pub fn run(source: &str, interpreter: &mut Interpreter) -> Result<Object, Vec<Error>> {
    trace!("Lexing {source}");
    let tokens = Lexer::new(source).lex_all();
    trace!("Parsing {tokens:#?}");
    let program = Parser::new(tokens).parse_all()?;
    trace!("Interpreting {program:#?}");
    Ok(interpreter.interpret_all(&program))
}
