pub mod builtin;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
mod report;
pub mod string;
pub mod value;

pub use error::InterpretError;
use interpreter::{SystemContext, TreeWalkInterpreter};
use lexer::Lexer;
use parser::Parser;

/// Lexes, parses and runs `source` against `context`, handing the context back once the
/// program completes.
pub fn interpret<C: SystemContext>(source: &str, context: C) -> Result<C, InterpretError> {
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse()?;
    tracing::info!(statements = program.len(), "running program");
    let context = TreeWalkInterpreter::new(context).run(&program)?;
    tracing::info!("program completed");
    Ok(context)
}
