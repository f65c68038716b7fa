use crate::interpreter::SystemContext;
use crate::value::{error::RuntimeErrorKind, Value};
use compact_str::{CompactString, ToCompactString};

/// Functions callable from a program. Names are resolved when the call is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Read,
    Len,
    Substring,
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_name())
    }
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "read" => Some(Self::Read),
            "len" => Some(Self::Len),
            "substring" | "substr" => Some(Self::Substring),
            _ => None,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Len => "len",
            Self::Substring => "substring",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Self::Read => 0,
            Self::Len => 1,
            Self::Substring => 3,
        }
    }

    /// Calls the builtin on already evaluated arguments. The caller checks the arity.
    pub fn call<C: SystemContext>(
        &self,
        arguments: &[Value],
        context: &mut C,
    ) -> Result<Value, RuntimeErrorKind> {
        match self {
            Self::Read => Self::read(context),
            Self::Len => self.len(arguments),
            Self::Substring => self.substring(arguments),
        }
    }
}

impl Builtin {
    fn read<C: SystemContext>(context: &mut C) -> Result<Value, RuntimeErrorKind> {
        let line = context
            .readln()
            .map_err(|e| RuntimeErrorKind::InputFailure(e.to_compact_string()))?
            .ok_or(RuntimeErrorKind::EndOfInput)?;

        if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
            line.parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| RuntimeErrorKind::InvalidInteger(line.into()))
        } else {
            Ok(Value::Text(line.into()))
        }
    }

    fn len(&self, arguments: &[Value]) -> Result<Value, RuntimeErrorKind> {
        let text = self.text_argument(arguments, 0)?;
        Ok(Value::Integer(text.chars().count() as i64))
    }

    fn substring(&self, arguments: &[Value]) -> Result<Value, RuntimeErrorKind> {
        let text = self.text_argument(arguments, 0)?;
        let start = self.integer_argument(arguments, 1)?;
        let count = self.integer_argument(arguments, 2)?;

        let length = text.chars().count();
        if start < 0 || start as usize > length || count < 0 {
            return Err(RuntimeErrorKind::OutOfRange {
                builtin: *self,
                start,
                count,
                length,
            });
        }

        let start = start as usize;
        let count = (count as u64).min((length - start) as u64) as usize;
        let result: CompactString = text.chars().skip(start).take(count).collect();
        Ok(Value::Text(result))
    }

    fn text_argument<'a>(
        &self,
        arguments: &'a [Value],
        position: usize,
    ) -> Result<&'a CompactString, RuntimeErrorKind> {
        match &arguments[position] {
            Value::Text(text) => Ok(text),
            other => Err(self.invalid_argument(position, "Text", other)),
        }
    }

    fn integer_argument(&self, arguments: &[Value], position: usize) -> Result<i64, RuntimeErrorKind> {
        match &arguments[position] {
            Value::Integer(value) => Ok(*value),
            other => Err(self.invalid_argument(position, "Integer", other)),
        }
    }

    fn invalid_argument(&self, position: usize, expected: &'static str, actual: &Value) -> RuntimeErrorKind {
        RuntimeErrorKind::InvalidArgument {
            builtin: *self,
            position: position + 1,
            expected,
            actual: actual.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::context::BufferedContext;

    fn substring(text: &str, start: i64, count: i64) -> Result<Value, RuntimeErrorKind> {
        let mut context = BufferedContext::new();
        Builtin::Substring.call(
            &[Value::from(text), Value::Integer(start), Value::Integer(count)],
            &mut context,
        )
    }

    #[test]
    fn substr_is_an_alias() {
        assert_eq!(Builtin::from_name("substr"), Some(Builtin::Substring));
        assert_eq!(Builtin::from_name("substring"), Some(Builtin::Substring));
        assert_eq!(Builtin::from_name("Len"), None);
    }

    #[test]
    fn substring_clamps_count() {
        assert_eq!(substring("hello", 1, 3), Ok(Value::from("ell")));
        assert_eq!(substring("hello", 3, 10), Ok(Value::from("lo")));
        assert_eq!(substring("hello", 5, 1), Ok(Value::from("")));
        assert_eq!(substring("hello", 0, 0), Ok(Value::from("")));
    }

    #[test]
    fn substring_rejects_bad_bounds() {
        assert!(matches!(
            substring("hello", 6, 1),
            Err(RuntimeErrorKind::OutOfRange { length: 5, .. })
        ));
        assert!(matches!(
            substring("hello", -1, 1),
            Err(RuntimeErrorKind::OutOfRange { .. })
        ));
        assert!(matches!(
            substring("hello", 0, -1),
            Err(RuntimeErrorKind::OutOfRange { .. })
        ));
    }

    #[test]
    fn substring_counts_characters() {
        assert_eq!(substring("héllo", 1, 2), Ok(Value::from("él")));
    }

    #[test]
    fn len_rejects_integers() {
        let mut context = BufferedContext::new();
        assert_eq!(
            Builtin::Len.call(&[Value::Integer(3)], &mut context),
            Err(RuntimeErrorKind::InvalidArgument {
                builtin: Builtin::Len,
                position: 1,
                expected: "Text",
                actual: Value::Integer(3),
            })
        );
    }

    #[test]
    fn read_classifies_lines() {
        let mut context = BufferedContext::with_input(["42", "-5", "", "abc", "99999999999999999999"]);
        let mut read = || Builtin::Read.call(&[], &mut context);
        assert_eq!(read(), Ok(Value::Integer(42)));
        assert_eq!(read(), Ok(Value::from("-5")));
        assert_eq!(read(), Ok(Value::from("")));
        assert_eq!(read(), Ok(Value::from("abc")));
        assert!(matches!(read(), Err(RuntimeErrorKind::InvalidInteger(_))));
        assert_eq!(read(), Err(RuntimeErrorKind::EndOfInput));
    }
}
