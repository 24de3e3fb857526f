use cardboard_runtime::{interpret::Interpreter, run, types::Object};
use cardboard_syntax::error::Error;
use std::{
    env, fs,
    io::{self, Write},
    process::ExitCode,
};

const QUIT_COMMAND: &str = ":q";

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    let res = match args.as_slice() {
        [] => run_repl().map(|()| ExitCode::SUCCESS),
        [path] => run_file(path),
        _ => {
            eprintln!("Usage: cardboard [script]");
            return ExitCode::FAILURE;
        }
    };
    match res {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_repl() -> io::Result<()> {
    let (stdin, mut stdout) = (io::stdin(), io::stdout());
    // One interpreter for the whole session, so bindings persist across lines
    let mut interpreter = Interpreter::default();
    loop {
        let mut line = String::default();
        print!(">>> ");
        stdout.flush()?;
        // If zero bytes are read, then exit (usually triggered by Ctrl-D)
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "" => continue,
            QUIT_COMMAND => break,
            input => {
                report(run(input, &mut interpreter));
            }
        }
    }
    Ok(())
}

/// Runs a script and fails the process when it does not parse or
/// when it ends in a runtime error.
fn run_file(file_path: &str) -> io::Result<ExitCode> {
    let source = fs::read_to_string(file_path)
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to read {file_path}: {e}")))?;
    let code = if report(run(&source, &mut Interpreter::default())) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };
    Ok(code)
}

/// Prints the outcome of a run. Returns `false` if it failed.
fn report(result: Result<Object, Vec<Error>>) -> bool {
    match result {
        Ok(Object::Null) => true,
        Ok(value) => {
            println!("{value}");
            !matches!(value, Object::Error(_))
        }
        Err(errors) => {
            errors.iter().for_each(|e| eprintln!("{e}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_fails_on_parse_errors() {
        assert!(!report(run("put - = 1;", &mut Interpreter::default())));
        assert!(!report(run("box(a) {", &mut Interpreter::default())));
    }

    #[test]
    fn report_fails_on_runtime_errors() {
        assert!(!report(run("1 / 0", &mut Interpreter::default())));
    }

    #[test]
    fn report_succeeds_on_values() {
        assert!(report(run("put x = 1;", &mut Interpreter::default())));
        assert!(report(run("1 + 2", &mut Interpreter::default())));
    }
}
