pub mod ast;
pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod token;

use ast::Program;
use environment::Env;
use lexer::Lexer;
use object::Object;
use parser::Parser;

pub use environment::Environment;

/// Lexes and parses `input`. The error list is empty on success; a non-empty
/// list comes with whatever statements could still be parsed.
pub fn parse(input: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// Evaluates `program` against `env`. Bindings made by `let` persist in `env`.
pub fn eval(program: &Program, env: &Env) -> Option<Object> {
    evaluator::eval_program(program, env)
}
