//! Generator for `.luarc.json`, the Lua Language Server configuration.
//!
//! Declares every host API function as a known global and points the
//! language server at the generated stubs file.

use crate::resources::lua_runtime::{HOST_API_DOCS, ScriptEnvironment};
use std::path::Path;

/// Generate `.luarc.json` content for the API registered in `env`.
pub fn generate_luarc(env: &ScriptEnvironment, stubs_filename: &str) -> Result<String, String> {
    let mut globals: Vec<&str> = HOST_API_DOCS
        .iter()
        .map(|doc| doc.name)
        .filter(|name| env.has_function(name))
        .collect();
    globals.sort_unstable();

    let content = serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/LuaLS/vscode-lua/master/setting/schema.json",
        "runtime.version": "LuaJIT",
        "diagnostics.globals": globals,
        "workspace.library": [stubs_filename],
        "completion.autoRequire": false
    });

    serde_json::to_string_pretty(&content)
        .map_err(|e| format!("Failed to serialize .luarc.json: {e}"))
}

/// Write the generated `.luarc.json` content to a file.
pub fn write_luarc(path: &Path, content: &str) -> Result<(), String> {
    std::fs::write(path, content)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
