use crate::string::IdentName;
use crate::value::Value;
use std::collections::HashMap;

/// The single global scope. Binding an existing name replaces its value.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    values: HashMap<IdentName, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn declare(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.into(), value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
