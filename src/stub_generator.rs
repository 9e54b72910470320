//! Lua stub generator for EmmyLua / lua-language-server.
//!
//! Renders the documented host API as a deterministic `scriptbridge.lua`
//! stub file with `---@param` and `---@return` annotations. Generation fails
//! if a documented function is not actually registered in the environment.

use crate::resources::lua_runtime::{API_CATEGORIES, ApiFunctionDoc, HOST_API_DOCS, ScriptEnvironment};
use std::fmt::{self, Write as FmtWrite};
use std::path::Path;

/// Entry points the host calls on a scenario script, if defined.
const SCENARIO_CALLBACKS: &[(&str, &[(&str, &str)], &str)] = &[
    ("init", &[], "Called once after the scenario script has been loaded."),
    (
        "update",
        &[("delta", "number")],
        "Called every tick with the elapsed seconds since the previous tick.",
    ),
];

/// Maps a documented type to the EmmyLua annotation type.
fn lua_type_annotation(doc_type: &str) -> String {
    match doc_type {
        "any" => "any".into(),
        s if s.ends_with('?') => format!("{}|nil", &s[..s.len() - 1]),
        other => other.into(),
    }
}

/// Generates the stub file content for the API registered in `env`.
pub fn generate_stubs(env: &ScriptEnvironment) -> Result<String, String> {
    let missing: Vec<&str> = HOST_API_DOCS
        .iter()
        .filter(|doc| !env.has_function(doc.name))
        .map(|doc| doc.name)
        .collect();
    if !missing.is_empty() {
        return Err(format!(
            "Documented functions are not registered: {}",
            missing.join(", ")
        ));
    }

    let mut out = String::with_capacity(16 * 1024);
    render_stubs(&mut out).map_err(|e| format!("Failed to render stubs: {e}"))?;
    Ok(out)
}

/// Write the generated stubs to a file.
pub fn write_stubs(path: &Path, content: &str) -> Result<(), String> {
    std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn render_stubs(out: &mut String) -> fmt::Result {
    writeln!(out, "---@meta")?;
    writeln!(out)?;
    writeln!(
        out,
        "-- THIS FILE IS AUTO-GENERATED by `scriptbridge --create-lua-stubs`."
    )?;
    writeln!(out, "-- DO NOT EDIT MANUALLY.")?;
    writeln!(out)?;

    render_callbacks(out)?;
    for (category, title) in API_CATEGORIES {
        let functions: Vec<&ApiFunctionDoc> = HOST_API_DOCS
            .iter()
            .filter(|doc| doc.category == *category)
            .collect();
        if functions.is_empty() {
            continue;
        }
        writeln!(out, "-- ==================== {} ====================", title)?;
        writeln!(out)?;
        for doc in functions {
            render_function(out, doc)?;
        }
    }
    render_script_class(out)
}

fn render_callbacks(out: &mut String) -> fmt::Result {
    writeln!(
        out,
        "-- ==================== Callback Signatures ===================="
    )?;
    writeln!(out, "-- Define these in the scenario script; the host calls them.")?;
    writeln!(out)?;

    for (name, params, description) in SCENARIO_CALLBACKS {
        writeln!(out, "---{}", description)?;
        for (pname, ptype) in params.iter() {
            writeln!(out, "---@param {} {}", pname, lua_type_annotation(ptype))?;
        }
        let names: Vec<&str> = params.iter().map(|(n, _)| *n).collect();
        writeln!(out, "function {}({}) end", name, names.join(", "))?;
        writeln!(out)?;
    }
    Ok(())
}

fn render_function(out: &mut String, doc: &ApiFunctionDoc) -> fmt::Result {
    for line in doc.description.lines() {
        writeln!(out, "---{}", line)?;
    }
    for (pname, ptype) in doc.params {
        writeln!(out, "---@param {} {}", pname, lua_type_annotation(ptype))?;
    }
    if let Some(returns) = doc.returns {
        for ret in returns.split(", ") {
            writeln!(out, "---@return {}", lua_type_annotation(ret))?;
        }
    }
    let names: Vec<&str> = doc.params.iter().map(|(n, _)| *n).collect();
    writeln!(out, "function {}({}) end", doc.name, names.join(", "))?;
    writeln!(out)
}

fn render_script_class(out: &mut String) -> fmt::Result {
    writeln!(out, "-- ==================== Script ====================")?;
    writeln!(out)?;
    writeln!(out, "---@class Script")?;
    writeln!(out, "---Handle to a separate script environment created with Script().")?;
    writeln!(out, "local Script = {{}}")?;
    writeln!(out)?;
    writeln!(out, "---Runs a script file in the environment. Failures go to the console.")?;
    writeln!(out, "---@param filename string")?;
    writeln!(out, "---@return boolean")?;
    writeln!(out, "function Script:run(filename) end")?;
    writeln!(out)?;
    writeln!(out, "---Sets a string global in the environment.")?;
    writeln!(out, "---@param name string")?;
    writeln!(out, "---@param value string")?;
    writeln!(out, "function Script:setVariable(name, value) end")
}
