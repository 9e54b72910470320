mod common;

use common::harness;
use scriptbridge::resources::lua_runtime::HOST_API_DOCS;
use scriptbridge::{luarc_generator, stub_generator};

#[test]
fn generate_stubs_produces_valid_output() {
    let h = harness(&[]);
    let env = h.env();
    let content = stub_generator::generate_stubs(&env).unwrap();

    assert!(content.starts_with("---@meta"), "Should start with ---@meta");
    assert!(content.contains("---@class Script"), "Should declare Script class");
}

#[test]
fn generated_stubs_contain_representative_signatures() {
    let h = harness(&[]);
    let env = h.env();
    let content = stub_generator::generate_stubs(&env).unwrap();

    assert!(content.contains("function random(min, max) end"));
    assert!(content.contains("function require(filename) end"));
    assert!(content.contains("function addGMFunction(label, callback) end"));
    assert!(content.contains("---@param timeout number|nil\nfunction globalMessage(text, timeout) end"));
    assert!(content.contains("---@return number\n---@return number\nfunction sectorToXY(sector) end"));
    assert!(content.contains("function Script:run(filename) end"));
    assert!(content.contains("function update(delta) end"));

    for doc in HOST_API_DOCS {
        assert!(
            content.contains(&format!("function {}(", doc.name)),
            "Missing stub for {}",
            doc.name
        );
    }
}

#[test]
fn stubs_are_deterministic() {
    let h = harness(&[]);
    let a = stub_generator::generate_stubs(&h.env()).unwrap();
    let b = stub_generator::generate_stubs(&h.env()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn stubs_fail_when_a_documented_function_is_missing() {
    let h = harness(&[]);
    let env = h.env();
    env.set_global("victory", mlua::Value::Nil).unwrap();

    let err = stub_generator::generate_stubs(&env).unwrap_err();
    assert!(err.contains("victory"), "{err}");
}

#[test]
fn luarc_lists_the_api_globals() {
    let h = harness(&[]);
    let env = h.env();
    let content = luarc_generator::generate_luarc(&env, "scriptbridge.lua").unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    let globals = json["diagnostics.globals"].as_array().unwrap();
    assert_eq!(globals.len(), HOST_API_DOCS.len());
    assert!(globals.iter().any(|g| g == "getSectorName"));
    assert_eq!(json["workspace.library"][0], "scriptbridge.lua");
}

#[test]
fn generated_files_can_be_written() {
    let h = harness(&[]);
    let env = h.env();
    let dir = tempfile::tempdir().unwrap();

    let stubs = stub_generator::generate_stubs(&env).unwrap();
    let stubs_path = dir.path().join("scriptbridge.lua");
    stub_generator::write_stubs(&stubs_path, &stubs).unwrap();
    assert_eq!(std::fs::read_to_string(&stubs_path).unwrap(), stubs);

    let luarc = luarc_generator::generate_luarc(&env, "scriptbridge.lua").unwrap();
    let luarc_path = dir.path().join(".luarc.json");
    luarc_generator::write_luarc(&luarc_path, &luarc).unwrap();
    assert!(luarc_path.exists());
}
