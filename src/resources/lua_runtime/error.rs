//! Script error taxonomy.
//!
//! [`ScriptError`] is what the bridge reports when loading a module or
//! invoking a script callback fails. When raised from `require`, the error
//! travels through Lua as a native error, so scripts catch it with `pcall`
//! like any other fault; [`script_error`] recovers the structured kind on
//! the host side.

use mlua::Error as LuaError;
use thiserror::Error;

/// Failures produced by module loading and callback invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The resource provider returned nothing for the module name.
    #[error("Require: Script not found: {module}")]
    ModuleNotFound { module: String },
    /// The module source could not be read or compiled.
    #[error("require:{module}: {message}")]
    Load { module: String, message: String },
    /// A compiled chunk or callback raised while executing.
    #[error("{0}")]
    Runtime(String),
    /// The callback's owning environment has been destroyed.
    #[error("script handle used after its environment was destroyed")]
    InvalidHandle,
}

impl ScriptError {
    /// Wraps the error so it can be raised inside the interpreter.
    pub fn into_lua_err(self) -> LuaError {
        LuaError::external(self)
    }
}

/// Finds the [`ScriptError`] carried by an interpreter error, if any.
///
/// Errors raised by host functions reach the host wrapped in one or more
/// callback/context layers; this walks through them.
pub fn script_error(err: &LuaError) -> Option<&ScriptError> {
    match err {
        LuaError::ExternalError(inner) => inner.downcast_ref::<ScriptError>(),
        LuaError::CallbackError { cause, .. } => script_error(cause),
        LuaError::WithContext { cause, .. } => script_error(cause),
        _ => None,
    }
}
