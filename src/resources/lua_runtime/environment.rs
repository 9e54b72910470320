//! Script environments.
//!
//! A [`ScriptEnvironment`] owns one Lua interpreter and its global
//! namespace. Creating it installs the full host API and runs the
//! configured bootstrap modules; an environment is only handed out once all
//! of that succeeded.
//!
//! Dropping the environment destroys the interpreter and invalidates every
//! [`ScriptCallback`](super::ScriptCallback) it produced.

use super::error::ScriptError;
use super::host_api::register_host_api;
use super::require::load_module;
use super::services::{BridgeData, HostServices};
use crate::resources::session::ScenarioSession;
use log::debug;
use mlua::prelude::*;
use std::rc::Rc;

/// One isolated interpreter with the host API registered.
///
/// This is `!Send`: the Lua state is not thread-safe and must stay on the
/// thread that owns the scenario.
pub struct ScriptEnvironment {
    lua: Lua,
    /// Callbacks hold weak references to this token.
    _alive: Rc<()>,
    services: Rc<HostServices>,
}

impl ScriptEnvironment {
    /// Creates a fully registered environment attached to `session`.
    ///
    /// # Errors
    ///
    /// Returns the diagnostic message if registration or a bootstrap module
    /// fails. Bootstrap failures are also written to the console.
    pub fn create(session: &Rc<ScenarioSession>) -> Result<Self, String> {
        let services = session.services().clone();
        let lua = Lua::new();
        let alive = Rc::new(());

        lua.set_app_data(BridgeData {
            services: services.clone(),
            session: Rc::downgrade(session),
            alive: Rc::downgrade(&alive),
        });
        register_host_api(&lua).map_err(|e| format!("Failed to register host API: {e}"))?;

        let environment = Self {
            lua,
            _alive: alive,
            services,
        };
        for module in &environment.services.config.bootstrap {
            let result = environment.run_file::<()>(module);
            if !environment.services.console.check_result(&result) {
                return Err(format!("Bootstrap module {module} failed"));
            }
        }
        debug!("Created script environment");
        Ok(environment)
    }

    /// Binds `value` to a global name, replacing any previous binding.
    pub fn set_global(&self, name: &str, value: impl IntoLua) -> LuaResult<()> {
        self.lua.globals().set(name, value)
    }

    /// Binds a host function with a fixed signature to a global name.
    pub fn define_global<A, R, F>(&self, name: &str, func: F) -> LuaResult<()>
    where
        A: FromLuaMulti,
        R: IntoLuaMulti,
        F: Fn(&Lua, A) -> LuaResult<R> + 'static,
    {
        self.lua
            .globals()
            .set(name, self.lua.create_function(func)?)
    }

    /// Reads a global value.
    pub fn get_global<T: FromLua>(&self, name: &str) -> LuaResult<T> {
        self.lua.globals().get(name)
    }

    /// Resolves, compiles and runs a module, converting its results to `T`.
    ///
    /// Missing modules, compile errors and runtime errors are all reported
    /// as the interpreter's diagnostic message.
    pub fn run_file<T: FromLuaMulti>(&self, path: &str) -> Result<T, String> {
        let source = {
            let Some(mut module) = self.services.resolver.open(path) else {
                return Err(format!("Script not found: {path}"));
            };
            let contents = module.stream.read_all();
            drop(module);
            contents.map_err(|e| format!("Failed to read {path}: {e}"))?
        };
        self.lua
            .load(source)
            .set_name(format!("@{path}"))
            .call::<T>(())
            .map_err(|e| e.to_string())
    }

    /// Loads the module's localization overlay, then runs it.
    pub fn run_localized(&self, path: &str) -> Result<(), String> {
        let overlay = self.services.resolver.overlay_name(path);
        self.services.localizer.load_overlay(&overlay);
        self.run_file::<()>(path)
    }

    /// Loads a module exactly as the script-side `require` would.
    pub fn require_module(&self, name: &str) -> Result<LuaMultiValue, ScriptError> {
        load_module(&self.lua, name)
    }

    /// Checks if a global function exists.
    pub fn has_function(&self, name: &str) -> bool {
        self.lua.globals().get::<LuaFunction>(name).is_ok()
    }

    /// Calls a global Lua function by name with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the function doesn't exist or execution fails.
    pub fn call_function<A, R>(&self, name: &str, args: A) -> LuaResult<R>
    where
        A: IntoLuaMulti,
        R: FromLuaMulti,
    {
        let func: LuaFunction = self.lua.globals().get(name)?;
        func.call(args)
    }

    /// Returns a reference to the underlying Lua state.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    pub fn services(&self) -> &Rc<HostServices> {
        &self.services
    }
}

impl Drop for ScriptEnvironment {
    fn drop(&mut self) {
        debug!("Destroying script environment");
    }
}
