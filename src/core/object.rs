//

use std::fmt::{Display, Formatter, Result as FmtResult};

use indexmap::IndexMap;

use crate::core::error::{Error, Result};
use crate::core::memory::Addr;
use crate::objects::function::NativeFunction;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Object(Addr),
}

impl Value {
    /// `Undefined` and `Null`, the values member access fails on.
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => true,
            _ => false,
        }
    }

    pub fn is_undefined(&self) -> bool {
        *self == Value::Undefined
    }

    pub fn as_object(&self) -> Option<Addr> {
        match self {
            Value::Object(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "{}", s),
            Value::Object(addr) => write!(f, "[object {:?}]", addr),
            absent => write!(f, "{}", absent.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Addr> for Value {
    fn from(addr: Addr) -> Self {
        Value::Object(addr)
    }
}

/// Own member descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum Prop {
    Data { value: Value, writable: bool },
    // halves are addresses of callable objects
    Accessor { get: Option<Addr>, set: Option<Addr> },
}

impl Prop {
    pub fn data(value: Value, writable: bool) -> Self {
        Prop::Data { value, writable }
    }

    pub fn getter(&self) -> Option<Addr> {
        match self {
            Prop::Accessor { get, .. } => *get,
            Prop::Data { .. } => None,
        }
    }

    pub fn setter(&self) -> Option<Addr> {
        match self {
            Prop::Accessor { set, .. } => *set,
            Prop::Data { .. } => None,
        }
    }

    fn references(&self) -> impl Iterator<Item = Addr> {
        let (first, second) = match self {
            Prop::Data { value, .. } => (value.as_object(), None),
            Prop::Accessor { get, set } => (*get, *set),
        };
        first.into_iter().chain(second)
    }
}

/// Checks that `name` can be used as a member key.
pub fn check_key(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_control) {
        return Err(Error::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub struct Object {
    props: IndexMap<String, Prop>,
    proto: Option<Addr>,
    call: Option<NativeFunction>,
}

impl Object {
    pub fn new(proto: Option<Addr>) -> Self {
        Object {
            props: IndexMap::new(),
            proto,
            call: None,
        }
    }

    pub fn with_call(call: NativeFunction) -> Self {
        Object {
            call: Some(call),
            ..Object::new(None)
        }
    }

    pub fn proto(&self) -> Option<Addr> {
        self.proto
    }

    pub fn set_proto(&mut self, proto: Option<Addr>) {
        self.proto = proto;
    }

    pub fn call(&self) -> Option<&NativeFunction> {
        self.call.as_ref()
    }

    pub fn get_own(&self, key: &str) -> Option<&Prop> {
        self.props.get(key)
    }

    /// Replaces the member in place, so a redefined key keeps its position.
    pub fn define_own(&mut self, key: &str, prop: Prop) {
        if let Some(slot) = self.props.get_mut(key) {
            *slot = prop;
        } else {
            self.props.insert(key.to_string(), prop);
        }
    }

    pub fn own_keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    pub(crate) fn references(&self) -> impl Iterator<Item = Addr> + '_ {
        self.proto
            .into_iter()
            .chain(self.props.values().flat_map(|prop| prop.references()))
    }
}
