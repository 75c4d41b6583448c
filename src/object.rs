use crate::ast::BlockStatement;
use crate::environment::Env;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::io::Write;
use std::rc::Rc;

pub const TRUE: Object = Object::Boolean { value: true };
pub const FALSE: Object = Object::Boolean { value: false };
pub const NULL: Object = Object::Null;

/// Builtins receive the evaluated arguments and the sink `puts` writes to.
pub type BuiltinFunction = fn(Vec<Object>, &mut dyn Write) -> Object;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer { value: i64 },
    Boolean { value: bool },
    String { value: String },
    Null,
    Array { elements: Vec<Object> },
    Hash { pairs: BTreeMap<HashKey, Object> },
    Function(Rc<Function>),
    Builtin(Builtin),
    ReturnValue { value: Box<Object> },
    Error { message: String },
}

impl Object {
    pub fn r#type(&self) -> &'static str {
        use Object::*;
        match self {
            Integer { .. } => "INTEGER",
            Boolean { .. } => "BOOLEAN",
            String { .. } => "STRING",
            Null => "NULL",
            Array { .. } => "ARRAY",
            Hash { .. } => "HASH",
            Function(..) => "FUNCTION",
            Builtin(..) => "BUILTIN",
            ReturnValue { .. } => "RETURN_VALUE",
            Error { .. } => "ERROR",
        }
    }
    pub fn error(message: impl Into<std::string::String>) -> Self {
        Object::Error {
            message: message.into(),
        }
    }
    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error { .. })
    }
    pub fn native_bool(value: bool) -> Self {
        if value {
            TRUE
        } else {
            FALSE
        }
    }
    /// Only `null` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean { value: false })
    }
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer { value } => Some(HashKey::Integer(*value)),
            Object::Boolean { value } => Some(HashKey::Boolean(*value)),
            Object::String { value } => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }
    pub fn inspect(&self) -> std::string::String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Object::*;
        match self {
            Integer { value } => write!(f, "{}", value),
            Boolean { value } => write!(f, "{}", value),
            String { value } => write!(f, "\"{}\"", value),
            Null => write!(f, "null"),
            Array { elements } => {
                let elements = elements.iter().map(|e| e.to_string()).collect::<Vec<_>>();
                write!(f, "[{}]", elements.join(", "))
            }
            Hash { pairs } => {
                let pairs = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect::<Vec<_>>();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Function(func) => write!(f, "fn({}) {}", func.parameters.join(", "), func.body),
            Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            ReturnValue { value } => write!(f, "{}", value),
            Error { message } => write!(f, "{}", message),
        }
    }
}

/// The subset of values usable as hash keys. Equality and ordering are by
/// value; hashes render integers first, then booleans, then strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl Display for HashKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HashKey::Integer(value) => write!(f, "{}", value),
            HashKey::Boolean(value) => write!(f, "{}", value),
            HashKey::String(value) => write!(f, "\"{}\"", value),
        }
    }
}

pub struct Function {
    parameters: Vec<String>,
    body: BlockStatement,
    env: Env,
}

impl Function {
    pub fn new(parameters: Vec<String>, body: BlockStatement, env: Env) -> Self {
        Self {
            parameters,
            body,
            env,
        }
    }
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
    pub fn body(&self) -> &BlockStatement {
        &self.body
    }
    pub fn env(&self) -> Env {
        Rc::clone(&self.env)
    }
}

// The captured environment may contain this function, so it is left out.
impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFunction,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use crate::object::{HashKey, Object, FALSE, NULL, TRUE};
    use std::collections::BTreeMap;

    fn string(value: &str) -> Object {
        Object::String {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_string_hash_key() {
        let hello1 = string("Hello World");
        let hello2 = string("Hello World");
        let diff1 = string("My name is johnny");
        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_ne!(hello1.hash_key(), diff1.hash_key());
    }

    #[test]
    fn test_hash_keys_are_typed() {
        let one = Object::Integer { value: 1 };
        assert_eq!(Some(HashKey::Integer(1)), one.hash_key());
        assert_ne!(one.hash_key(), string("1").hash_key());
        assert_eq!(Some(HashKey::Boolean(true)), TRUE.hash_key());
        assert_eq!(None, NULL.hash_key());
        assert_eq!(None, Object::Array { elements: vec![] }.hash_key());
    }

    #[test]
    fn test_fresh_booleans_equal_singletons() {
        assert_eq!(TRUE, Object::Boolean { value: true });
        assert_eq!(FALSE, Object::native_bool(false));
        assert_eq!(NULL, Object::Null);
    }

    #[test]
    fn test_truthiness() {
        assert!(!NULL.is_truthy());
        assert!(!FALSE.is_truthy());
        assert!(TRUE.is_truthy());
        assert!(Object::Integer { value: 0 }.is_truthy());
        assert!(string("").is_truthy());
    }

    #[test]
    fn test_inspect() {
        let mut pairs = BTreeMap::new();
        pairs.insert(HashKey::String("b".to_string()), Object::Integer { value: 2 });
        pairs.insert(HashKey::String("a".to_string()), Object::Integer { value: 1 });
        pairs.insert(HashKey::Boolean(true), Object::Integer { value: 3 });
        pairs.insert(HashKey::Integer(7), Object::Integer { value: 4 });
        let tests = vec![
            (Object::Integer { value: -3 }, "-3"),
            (TRUE, "true"),
            (string("hi"), "\"hi\""),
            (NULL, "null"),
            (
                Object::Array {
                    elements: vec![Object::Integer { value: 1 }, string("x")],
                },
                "[1, \"x\"]",
            ),
            (
                Object::Hash { pairs },
                "{7: 4, true: 3, \"a\": 1, \"b\": 2}",
            ),
            (Object::error("boom"), "boom"),
        ];
        for (obj, expected) in tests {
            assert_eq!(expected, obj.inspect());
        }
    }
}
