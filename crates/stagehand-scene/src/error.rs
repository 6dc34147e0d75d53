use thiserror::Error;

/// Errors raised into script code by native methods and the object space.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    /// A value of the wrong kind reached a native operation.
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    /// The receiver carries no native data of the requested kind.
    #[error("no native {expected} attached to object")]
    MissingNativeObject { expected: String },

    /// The handle refers to an object the collector already reclaimed.
    #[error("object has been collected")]
    Collected,

    #[error("undefined method '{method}' for {class}")]
    NoMethod { method: String, class: String },

    #[error("wrong number of arguments for '{method}' (given {given}, expected {expected})")]
    ArgumentCount {
        method: String,
        given: usize,
        expected: String,
    },

    #[error("argument error: {0}")]
    ArgumentError(String),

    #[error("uninitialized constant {0}")]
    UnknownClass(String),

    #[error("a stage is already installed in this object space")]
    StageAlreadyInstalled,

    /// Raised explicitly by script code, e.g. from inside a listener.
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl ScriptError {
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn argument(msg: impl Into<String>) -> Self {
        Self::ArgumentError(msg.into())
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

pub type ScriptResult<T> = Result<T, ScriptError>;
