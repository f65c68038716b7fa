pub mod context;
mod tree;

pub use tree::TreeWalkInterpreter;

/// Console collaborator used by `print` and `read()`.
pub trait SystemContext {
    fn writeln(&mut self, text: &str);
    /// Reads the next input line without its terminator. `None` at end of input.
    fn readln(&mut self) -> std::io::Result<Option<String>>;
}
