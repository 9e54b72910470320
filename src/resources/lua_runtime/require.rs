//! The script-side `require(filename)`.
//!
//! Runs another module inside the calling environment, so the module sees
//! and can modify the caller's globals. The module's localization overlay
//! is loaded as a side effect.
//!
//! Loading happens in two phases:
//!
//! 1. Open the module stream, load the overlay, read the whole source and
//!    release the stream. Nothing can raise into Lua while the stream is
//!    open.
//! 2. Compile the buffered source as a chunk named `@<filename>` and call
//!    it. All of the chunk's return values become `require`'s results.
//!
//! Modules are not cached: every `require` re-executes the module.

use super::error::ScriptError;
use super::services::BridgeData;
use mlua::prelude::*;

/// Loads and runs `filename` in the environment running on `lua`.
pub(super) fn load_module(lua: &Lua, filename: &str) -> Result<LuaMultiValue, ScriptError> {
    let services = BridgeData::services(lua).map_err(|e| ScriptError::Runtime(e.to_string()))?;

    let source = {
        let Some(mut module) = services.resolver.open(filename) else {
            return Err(ScriptError::ModuleNotFound {
                module: filename.to_string(),
            });
        };
        // Best effort: a missing overlay is not an error.
        services.localizer.load_overlay(&module.overlay);
        let contents = module.stream.read_all();
        drop(module);
        contents.map_err(|e| ScriptError::Load {
            module: filename.to_string(),
            message: e.to_string(),
        })?
    };

    let chunk = lua
        .load(source)
        .set_name(format!("@{filename}"))
        .into_function()
        .map_err(|e| ScriptError::Load {
            module: filename.to_string(),
            message: e.to_string(),
        })?;

    chunk
        .call::<LuaMultiValue>(())
        .map_err(|e| ScriptError::Runtime(format!("require:{e}")))
}

/// Registers the global `require` function.
pub(super) fn register_require(lua: &Lua) -> LuaResult<()> {
    lua.globals().set(
        "require",
        lua.create_function(|lua, filename: String| {
            load_module(lua, &filename).map_err(ScriptError::into_lua_err)
        })?,
    )
}
