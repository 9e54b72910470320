//! `Script()` sub-script handles.
//!
//! Each `Script()` call builds a fresh [`ScriptEnvironment`] sharing the
//! caller's services and session but with its own globals. The session owns
//! the new environment; scripts only get a weak [`ScriptObject`] handle.

use super::environment::ScriptEnvironment;
use super::error::ScriptError;
use super::services::BridgeData;
use mlua::prelude::*;
use std::rc::{Rc, Weak};

/// Script-side handle to a sub-script environment.
#[derive(Clone)]
pub struct ScriptObject {
    env: Weak<ScriptEnvironment>,
}

impl ScriptObject {
    fn environment(&self) -> LuaResult<Rc<ScriptEnvironment>> {
        self.env
            .upgrade()
            .ok_or_else(|| ScriptError::InvalidHandle.into_lua_err())
    }
}

impl LuaUserData for ScriptObject {
    fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
        // script:run(filename) -> boolean
        methods.add_method("run", |_, this, filename: String| {
            let env = this.environment()?;
            let result = env.run_localized(&filename);
            Ok(env.services().console.check_result(&result))
        });

        // script:setVariable(name, value)
        methods.add_method("setVariable", |_, this, (name, value): (String, String)| {
            this.environment()?.set_global(&name, value)
        });

        methods.add_meta_method(LuaMetaMethod::ToString, |_, _, ()| Ok("Script"));
    }
}

/// Creates a sub-script environment for the session `lua` belongs to.
pub(super) fn create_script(lua: &Lua) -> LuaResult<ScriptObject> {
    let session = BridgeData::session(lua)?;
    let env = Rc::new(ScriptEnvironment::create(&session).map_err(LuaError::runtime)?);
    let handle = ScriptObject {
        env: Rc::downgrade(&env),
    };
    session.add_additional_script(env);
    Ok(handle)
}
