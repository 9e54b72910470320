//! Script callbacks invocable from host code.
//!
//! A [`ScriptCallback`] is created whenever a host function accepts a Lua
//! function (GM buttons, event hooks, comms replies). It is bound to the
//! lifetime of the environment that produced it: once that environment is
//! dropped, every invocation fails with [`ScriptError::InvalidHandle`].
//!
//! Invocation re-enters the owning interpreter. Errors raised by the script
//! are caught at this boundary and returned as [`ScriptError::Runtime`];
//! they never propagate as a host fault.

use super::error::ScriptError;
use super::services::BridgeData;
use mlua::prelude::*;
use std::fmt;
use std::rc::Weak;

/// Lifetime-bound handle to a script function.
///
/// Clones share identity; equality compares the underlying function.
#[derive(Clone)]
pub struct ScriptCallback {
    function: LuaFunction,
    alive: Weak<()>,
    identity: (usize, usize),
}

impl ScriptCallback {
    /// Wraps a function owned by the environment running on `lua`.
    pub fn new(lua: &Lua, function: LuaFunction) -> LuaResult<Self> {
        let alive = BridgeData::liveness(lua)?;
        let identity = (alive.as_ptr() as usize, function.to_pointer() as usize);
        Ok(Self {
            function,
            alive,
            identity,
        })
    }

    /// `false` once the owning environment has been destroyed.
    pub fn is_valid(&self) -> bool {
        self.alive.strong_count() > 0
    }

    /// Calls the script function with `args`.
    ///
    /// # Errors
    ///
    /// [`ScriptError::InvalidHandle`] if the environment is gone,
    /// [`ScriptError::Runtime`] if the script raised.
    pub fn call<A, R>(&self, args: A) -> Result<R, ScriptError>
    where
        A: IntoLuaMulti,
        R: FromLuaMulti,
    {
        let Some(_alive) = self.alive.upgrade() else {
            return Err(ScriptError::InvalidHandle);
        };
        self.function
            .call::<R>(args)
            .map_err(|e| ScriptError::Runtime(e.to_string()))
    }
}

impl FromLua for ScriptCallback {
    fn from_lua(value: LuaValue, lua: &Lua) -> LuaResult<Self> {
        let function = LuaFunction::from_lua(value, lua)?;
        Self::new(lua, function)
    }
}

impl PartialEq for ScriptCallback {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for ScriptCallback {}

impl fmt::Debug for ScriptCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptCallback")
            .field("function", &format_args!("{:#x}", self.identity.1))
            .field("valid", &self.is_valid())
            .finish()
    }
}
