//! Global functions installed into every script environment.
//!
//! Registration is split by concern. All host state is reached through
//! [`BridgeData`] in the interpreter's app data.

use super::class_factory::create_class;
use super::callback::ScriptCallback;
use super::require::register_require;
use super::script_object::create_script;
use super::services::BridgeData;
use crate::resources::console::format_print_args;
use crate::resources::hooks::EventHook;
use crate::sectors::{sector_name, sector_to_xy};
use log::warn;
use mlua::prelude::*;

/// Registry key of the shared entity function table.
const ENTITY_FUNCTION_TABLE: &str = "EFT";

/// Installs the full host API into `lua`.
pub(super) fn register_host_api(lua: &Lua) -> LuaResult<()> {
    register_base_api(lua)?;
    register_require(lua)?;
    register_entity_api(lua)?;
    register_scenario_api(lua)?;
    register_sector_api(lua)?;
    register_gm_api(lua)?;
    register_comms_api(lua)?;
    Ok(())
}

/// Engine version as `major * 10000 + minor * 100 + patch`.
pub fn version_number() -> i64 {
    let part = |s: &str| s.parse::<i64>().unwrap_or(0);
    part(env!("CARGO_PKG_VERSION_MAJOR")) * 10000
        + part(env!("CARGO_PKG_VERSION_MINOR")) * 100
        + part(env!("CARGO_PKG_VERSION_PATCH"))
}

fn register_base_api(lua: &Lua) -> LuaResult<()> {
    let globals = lua.globals();

    // random(min, max)
    globals.set(
        "random",
        lua.create_function(|_, (min, max): (f32, f32)| Ok(min + (max - min) * fastrand::f32()))?,
    )?;

    // irandom(min, max), inclusive on both ends
    globals.set(
        "irandom",
        lua.create_function(|_, (min, max): (f64, f64)| {
            let (mut min, mut max) = (min as i64, max as i64);
            if min > max {
                std::mem::swap(&mut min, &mut max);
            }
            Ok(fastrand::i64(min..=max))
        })?,
    )?;

    globals.set(
        "print",
        lua.create_function(|lua, args: LuaMultiValue| {
            BridgeData::services(lua)?
                .console
                .add_log(format_print_args(&args));
            Ok(())
        })?,
    )?;

    // _(text) or _(context, text)
    globals.set(
        "_",
        lua.create_function(|lua, (first, second): (String, Option<String>)| {
            let localizer = BridgeData::services(lua)?.localizer.clone();
            Ok(match second {
                Some(text) => localizer.translate_in(&first, &text),
                None => localizer.translate(&first),
            })
        })?,
    )?;

    globals.set(
        "getEEVersion",
        lua.create_function(|_, ()| Ok(version_number()))?,
    )?;

    Ok(())
}

fn register_entity_api(lua: &Lua) -> LuaResult<()> {
    let globals = lua.globals();

    globals.set(
        "createEntity",
        lua.create_function(|lua, ()| Ok(BridgeData::services(lua)?.entities.create_entity()))?,
    )?;

    globals.set(
        "getLuaEntityFunctionTable",
        lua.create_function(|lua, ()| {
            if let Ok(table) = lua.named_registry_value::<LuaTable>(ENTITY_FUNCTION_TABLE) {
                return Ok(table);
            }
            let table = lua.create_table()?;
            lua.set_named_registry_value(ENTITY_FUNCTION_TABLE, table.clone())?;
            Ok(table)
        })?,
    )?;

    globals.set(
        "createClass",
        lua.create_function(|lua, ()| create_class(lua))?,
    )?;

    Ok(())
}

fn register_scenario_api(lua: &Lua) -> LuaResult<()> {
    let globals = lua.globals();

    globals.set(
        "getScenarioSetting",
        lua.create_function(|lua, key: String| {
            Ok(BridgeData::session(lua)?.scenario_setting(&key))
        })?,
    )?;

    globals.set(
        "getScenarioVariation",
        lua.create_function(|lua, ()| {
            warn!(target: "lua", "getScenarioVariation() is deprecated, use getScenarioSetting(\"variation\")");
            Ok(BridgeData::session(lua)?.scenario_variation())
        })?,
    )?;

    globals.set(
        "onNewPlayerShip",
        lua.create_function(|lua, callback: ScriptCallback| {
            BridgeData::session(lua)?.set_hook(EventHook::NewPlayerShip, callback);
            Ok(())
        })?,
    )?;

    globals.set(
        "globalMessage",
        lua.create_function(|lua, (text, timeout): (String, Option<f32>)| {
            BridgeData::session(lua)?.show_global_message(text, timeout);
            Ok(())
        })?,
    )?;

    globals.set(
        "victory",
        lua.create_function(|lua, faction: String| {
            BridgeData::session(lua)?.declare_victory(faction);
            Ok(())
        })?,
    )?;

    globals.set(
        "setBanner",
        lua.create_function(|lua, text: String| {
            BridgeData::session(lua)?.set_banner(text);
            Ok(())
        })?,
    )?;

    globals.set(
        "getScenarioTime",
        lua.create_function(|lua, ()| Ok(BridgeData::session(lua)?.elapsed_time()))?,
    )?;

    Ok(())
}

fn register_sector_api(lua: &Lua) -> LuaResult<()> {
    let globals = lua.globals();

    globals.set(
        "getSectorName",
        lua.create_function(|_, (x, y): (f32, f32)| Ok(sector_name(x, y)))?,
    )?;

    globals.set(
        "sectorToXY",
        lua.create_function(|_, sector: String| Ok(sector_to_xy(&sector)))?,
    )?;

    Ok(())
}

fn register_gm_api(lua: &Lua) -> LuaResult<()> {
    let globals = lua.globals();

    globals.set(
        "addGMFunction",
        lua.create_function(|lua, (label, callback): (String, ScriptCallback)| {
            BridgeData::session(lua)?.add_gm_function(label, callback);
            Ok(())
        })?,
    )?;

    globals.set(
        "clearGMFunctions",
        lua.create_function(|lua, ()| {
            BridgeData::session(lua)?.clear_gm_functions();
            Ok(())
        })?,
    )?;

    globals.set("Script", lua.create_function(|lua, ()| create_script(lua))?)?;

    Ok(())
}

fn register_comms_api(lua: &Lua) -> LuaResult<()> {
    let globals = lua.globals();

    globals.set(
        "setCommsMessage",
        lua.create_function(|lua, text: String| {
            BridgeData::session(lua)?.set_comms_message(text);
            Ok(())
        })?,
    )?;

    globals.set(
        "addCommsReply",
        lua.create_function(|lua, (label, callback): (String, ScriptCallback)| {
            BridgeData::session(lua)?.add_comms_reply(label, callback);
            Ok(())
        })?,
    )?;

    globals.set(
        "commsSwitchToGM",
        lua.create_function(|lua, ()| {
            BridgeData::session(lua)?.request_gm_comms();
            Ok(())
        })?,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_number_matches_package_version() {
        let expected: Vec<i64> = env!("CARGO_PKG_VERSION")
            .split('.')
            .map(|p| p.parse().unwrap())
            .collect();
        assert_eq!(
            version_number(),
            expected[0] * 10000 + expected[1] * 100 + expected[2]
        );
    }
}
