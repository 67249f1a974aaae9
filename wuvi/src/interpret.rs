//! Statement interpreter.
//!
//! To run Wuvi code, construct an [ExecEnv], which owns the variables
//! and function definitions of a program along with the streams it
//! reads from and prints to, then hand it source text with
//! [ExecEnv::execute] or already classified statements with
//! [ExecEnv::eval_stmts].

#![deny(missing_docs)]
use std::{
    collections::HashMap,
    io::{self, stdin, stdout, BufRead, Stdout, Write},
};

use crate::{
    ast::{Builtin, Stmt, StmtKind, Word},
    consts,
    error::Error,
    parser::Parser,
    variables::{Function, Value},
};

/// A source of input lines for the input builtin.
pub trait ReadLine {
    /// Append the next line, line ending included, to `buf`. Returns
    /// the number of bytes read, zero at the end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<T: BufRead> ReadLine for T {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Standard input, locked only for the duration of each read so that
/// other readers of stdin (such as a line editor) are never blocked by
/// an idle environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinInput;

impl ReadLine for StdinInput {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        stdin().read_line(buf)
    }
}

/// An environment for executing Wuvi code.
///
/// The environment is single-threaded state; sharing one between
/// threads needs outside synchronization.
pub struct ExecEnv<R = StdinInput, W = Stdout> {
    /// The variable store. Assigning a name replaces whatever was
    /// there, type included.
    variables: HashMap<String, Value>,

    /// Captured function definitions. A separate namespace from
    /// `variables`.
    functions: HashMap<String, Function>,

    /// Where the input builtin reads lines from.
    input: R,

    /// Where the print and math builtins write to.
    output: W,
}

impl ExecEnv {
    /// Create an environment reading standard input and printing to
    /// standard output, with no variables or functions defined.
    pub fn new() -> Self {
        Self::with_io(StdinInput, stdout())
    }
}

impl Default for ExecEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ReadLine, W: Write> ExecEnv<R, W> {
    /// Create an empty environment on top of the given streams.
    pub fn with_io(input: R, output: W) -> Self {
        Self {
            variables: HashMap::new(),
            functions: HashMap::new(),
            input,
            output,
        }
    }

    /// Run a piece of source text, one statement at a time. Stops at
    /// the first error; whatever ran before it keeps its effect.
    pub fn execute(&mut self, source: &str) -> Result<(), Error> {
        for stmt in Parser::new(source) {
            self.eval_stmt(&stmt)?;
        }

        Ok(())
    }

    /// Execute a set of statements in order, stopping at the first
    /// one that fails.
    pub fn eval_stmts(&mut self, stmts: &[Stmt]) -> Result<(), Error> {
        for stmt in stmts {
            self.eval_stmt(stmt)?;
        }

        Ok(())
    }

    /// Perform the action indicated by a statement.
    fn eval_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        tracing::trace!(line = stmt.line, "executing {:?}", stmt.kind);

        match &stmt.kind {
            StmtKind::Define {
                ident,
                body,
                terminated,
            } => {
                if !terminated {
                    tracing::warn!(
                        line = stmt.line,
                        "function `{}` has no terminator line, its body runs to the end of input",
                        ident.text
                    );
                }
                tracing::debug!(
                    line = stmt.line,
                    "defining function `{}` ({} lines)",
                    ident.text,
                    body.len()
                );

                self.functions.insert(
                    ident.text.to_owned(),
                    Function {
                        body: body.to_owned(),
                        line: stmt.line,
                        terminated: *terminated,
                    },
                );
            }
            StmtKind::Assign {
                ident,
                tag,
                literal,
            } => {
                let value = match literal {
                    Some(literal) => Value::coerce(*tag, &literal.text)
                        .map_err(|kind| Error::new(kind, stmt.line, literal.span.clone()))?,
                    None => Value::empty(*tag),
                };

                tracing::debug!(line = stmt.line, "{} = {:?}", ident.text, value);
                self.variables.insert(ident.text.to_owned(), value);
            }
            StmtKind::Call { builtin, arg } => {
                self.call(*builtin, arg, stmt.line)?;
            }
        }

        Ok(())
    }

    /// Run a builtin with its single argument.
    fn call(&mut self, builtin: Builtin, arg: &Word, line: usize) -> Result<(), Error> {
        match builtin {
            Builtin::Print => {
                let written = match self.variables.get(&arg.text) {
                    Some(value) => writeln!(self.output, "{}", value),
                    None => writeln!(self.output, "{}", arg.text),
                };
                written.map_err(|e| Error::from(e).at_line(line))?;
            }
            Builtin::Input => {
                let input = self.read_line().map_err(|e| e.at_line(line))?;
                self.variables.insert(arg.text.to_owned(), Value::Str(input));
            }
            Builtin::Math(op) => {
                tracing::debug!(line = line, "`{}` on `{}` is not implemented", op, arg.text);
                writeln!(self.output, "{}", consts::MATH_NOTICE)
                    .map_err(|e| Error::from(e).at_line(line))?;
            }
            Builtin::Unknown(opcode) => {
                tracing::debug!(line = line, "ignoring unknown opcode {}", opcode);
            }
        }

        Ok(())
    }

    /// Read a single line of input, without its line ending.
    fn read_line(&mut self) -> Result<String, Error> {
        // Prompts written without a newline have to show up before we
        // block on input.
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::unexpected_eof(0));
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(line)
    }

    /// Get the value of a variable, if it has been assigned.
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Get a captured function definition.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// The stream this environment prints to.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Give up the environment, keeping its output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;
    use crate::{error::ErrorKind, variables::Tag};

    type TestEnv = ExecEnv<Cursor<Vec<u8>>, Vec<u8>>;

    fn env_with_input(input: &str) -> TestEnv {
        ExecEnv::with_io(Cursor::new(input.as_bytes().to_vec()), vec![])
    }

    // Run a program with no input, returning the environment and
    // everything it printed.
    fn run(source: &str) -> (TestEnv, String) {
        let mut env = env_with_input("");
        env.execute(source).unwrap();
        let output = String::from_utf8(env.output().clone()).unwrap();
        (env, output)
    }

    #[test]
    fn print_string_variable() {
        let (_, output) = run("msg = >>+> Hello_World!\n58 msg");
        assert_eq!(output, "Hello_World!\n");
    }

    #[test]
    fn print_integer_variable() {
        let (env, output) = run("x = <<- 42\n58 x");
        assert_eq!(output, "42\n");
        assert_eq!(env.get_var("x"), Some(&Value::Int(42)));
    }

    #[test]
    fn print_bool_echoes_marker() {
        let (_, output) = run("flag = <<>> <<>>\n58 flag\noff = >> nope\n58 off");
        assert_eq!(output, "<<>>\n>>\n");
    }

    #[test]
    fn print_unknown_name_echoes_argument() {
        let (_, output) = run("58 hello");
        assert_eq!(output, "hello\n");
    }

    #[test]
    fn assignment_without_literal() {
        let (env, output) = run("s = >>+>\nn = _-_ ignored\nq = ???\n58 s\n58 n\n58 q");
        assert_eq!(output, "\n_-_\n_-_\n");
        assert_eq!(env.get_var("s"), Some(&Value::Str(String::new())));
        assert_eq!(env.get_var("q").map(Value::tag), Some(Tag::Null));
    }

    #[test]
    fn reassignment_replaces_type() {
        let (env, output) = run("v = <<- 1\n58 v\nv = >>+>> 2.5\n58 v");
        assert_eq!(output, "1\n2.5\n");
        assert_eq!(env.get_var("v"), Some(&Value::Float(2.5)));
    }

    #[test]
    fn bad_integer_is_fatal() {
        let mut env = env_with_input("");
        let err = env
            .execute("58 before\nn = <<- abc\n58 after")
            .unwrap_err();

        assert_eq!(err.line, 2);
        assert_eq!(err.span, 8..11);
        match err.kind {
            ErrorKind::ParseError { token, expected } => {
                assert_eq!(token, "abc");
                assert_eq!(expected, Tag::Integer);
            }
            kind => panic!("expected a parse error, got {:?}", kind),
        }

        // Nothing after the failing line ran, nothing was bound.
        assert_eq!(env.output(), b"before\n");
        assert_eq!(env.get_var("n"), None);
    }

    #[test]
    fn math_opcodes_only_print_notice() {
        for opcode in [24, 32, 15, 45, 40, 0] {
            let (env, output) = run(&format!("x = <<- 2\n{} x", opcode));
            assert_eq!(output, format!("{}\n", consts::MATH_NOTICE));
            assert_eq!(env.get_var("x"), Some(&Value::Int(2)));
        }
    }

    #[test]
    fn unknown_opcode_does_nothing() {
        let (env, output) = run("x = <<- 2\n999 x\n999 y");
        assert_eq!(output, "");
        assert_eq!(env.get_var("x"), Some(&Value::Int(2)));
        assert_eq!(env.get_var("y"), None);
    }

    #[test]
    fn input_binds_string() {
        let mut env = env_with_input("first line\r\n42\n");
        env.execute("67 a\n67 b\n58 a\n58 b").unwrap();

        assert_eq!(env.get_var("a"), Some(&Value::Str("first line".to_owned())));
        // Input is always text, even when it looks like a number.
        assert_eq!(env.get_var("b"), Some(&Value::Str("42".to_owned())));
        assert_eq!(env.output(), b"first line\n42\n");
    }

    #[test]
    fn input_without_trailing_newline() {
        let mut env = env_with_input("last");
        env.execute("67 a").unwrap();
        assert_eq!(env.get_var("a"), Some(&Value::Str("last".to_owned())));
    }

    #[test]
    fn input_at_end_of_stream() {
        let mut env = env_with_input("");
        env.execute("x = <<- 1").unwrap();
        let err = env.execute("\n67 x").unwrap_err();

        assert_eq!(err.line, 2);
        assert!(matches!(
            err.kind,
            ErrorKind::IoError(ref e) if e.kind() == io::ErrorKind::UnexpectedEof
        ));
        // The previous binding survives.
        assert_eq!(env.get_var("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn functions_are_captured_not_run() {
        let (env, output) = run("init greet a b c\n58 inside\nend\n58 outside");
        assert_eq!(output, "outside\n");

        let function = env.function("greet").unwrap();
        assert_eq!(function.body, &["58 inside"]);
        assert_eq!(function.line, 1);
        assert!(function.terminated);

        // Separate namespace from variables.
        assert_eq!(env.get_var("greet"), None);
    }

    #[test]
    fn redefinition_overwrites() {
        let (env, _) = run("init f a b c\none\nend\ninit f x y z\ntwo\nthree\nend");
        let function = env.function("f").unwrap();
        assert_eq!(function.body, &["two", "three"]);
        assert_eq!(function.line, 4);
    }

    /// Hands out canned lines, like an interactive user would.
    struct Typist(Vec<&'static str>);

    impl ReadLine for Typist {
        fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
            if self.0.is_empty() {
                return Ok(0);
            }
            let line = self.0.remove(0);
            buf.push_str(line);
            Ok(line.len())
        }
    }

    #[test]
    fn custom_line_source() {
        let mut env = ExecEnv::with_io(Typist(vec!["yes\n", "no"]), vec![]);
        env.execute("67 a\n67 b\n58 a\n58 b").unwrap();
        assert_eq!(env.output(), b"yes\nno\n");

        let err = env.execute("67 c").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::IoError(ref e) if e.kind() == io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn state_survives_between_runs() {
        let mut env = env_with_input("");
        env.execute("x = <<- 7").unwrap();
        env.execute("58 x").unwrap();
        assert_eq!(env.into_output(), b"7\n");
    }
}
