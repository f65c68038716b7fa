use super::SystemContext;
use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock};

pub struct StdioContext {
    lines: io::Lines<StdinLock<'static>>,
}

impl StdioContext {
    pub fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }
}

impl Default for StdioContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemContext for StdioContext {
    fn writeln(&mut self, text: &str) {
        println!("{text}");
    }

    fn readln(&mut self) -> io::Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                let mut line = line?;
                if line.ends_with('\r') {
                    line.pop();
                }
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }
}

/// Captures output in memory and serves input from a fixed list of lines.
#[derive(Debug, Default)]
pub struct BufferedContext {
    input: VecDeque<String>,
    buffer: String,
}

impl BufferedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            buffer: String::new(),
        }
    }

    pub fn get_data(&self) -> &str {
        &self.buffer
    }

    pub fn into_data(self) -> String {
        self.buffer
    }
}

impl SystemContext for BufferedContext {
    fn writeln(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn readln(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}
