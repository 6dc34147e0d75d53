use crate::dispatcher::Listener;
use crate::heap::Handle;

/// A script value.
///
/// Immediates and strings are held by value. `Object` refers into the heap and
/// is what the collector traces; `Proc` is a callable that is not traced.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    Object(Handle),
    Proc(Listener),
}

impl Value {
    /// `nil` and `false` are falsy, everything else is truthy.
    #[inline]
    pub fn truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            Value::Object(h) => Some(*h),
            _ => None,
        }
    }

    /// Integers as-is, floats truncated toward zero.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            _ => None,
        }
    }

    /// Floats as-is, integers widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_proc(&self) -> Option<&Listener> {
        match self {
            Value::Proc(l) => Some(l),
            _ => None,
        }
    }

    /// Builtin kind name. Objects report `Object`; use
    /// [`crate::heap::Heap::kind_of_value`] for their class name.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(true) => "true",
            Value::Bool(false) => "false",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Proc(_) => "Proc",
        }
    }

    /// Calls `f` for every heap handle reachable from this value without
    /// going through another object.
    pub(crate) fn for_each_handle(&self, f: &mut impl FnMut(Handle)) {
        match self {
            Value::Object(h) => f(*h),
            Value::Array(items) => items.iter().for_each(|v| v.for_each_handle(f)),
            _ => {}
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Handle> for Value {
    fn from(v: Handle) -> Self {
        Value::Object(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Listener> for Value {
    fn from(v: Listener) -> Self {
        Value::Proc(v)
    }
}
