//! Host services shared by every script environment of a session.
//!
//! [`HostServices`] bundles the collaborators the bridge talks to (resource
//! resolution, localization, entity creation, console). [`BridgeData`] is the
//! per-interpreter app data through which host functions reach them.

use super::module_resolver::ModuleResolver;
use crate::resources::config::BridgeConfig;
use crate::resources::console::ConsoleSink;
use crate::resources::entities::EntityFactory;
use crate::resources::localization::Localizer;
use crate::resources::resource_stream::ResourceProvider;
use crate::resources::session::ScenarioSession;
use mlua::prelude::*;
use std::rc::{Rc, Weak};

/// Collaborators injected into the bridge by the host engine.
pub struct HostServices {
    pub config: BridgeConfig,
    pub resolver: ModuleResolver,
    pub localizer: Rc<dyn Localizer>,
    pub entities: Rc<dyn EntityFactory>,
    pub console: Rc<ConsoleSink>,
}

impl HostServices {
    pub fn new(
        config: BridgeConfig,
        provider: Rc<dyn ResourceProvider>,
        localizer: Rc<dyn Localizer>,
        entities: Rc<dyn EntityFactory>,
    ) -> Rc<Self> {
        let resolver = ModuleResolver::new(provider, config.language.clone());
        let console = Rc::new(ConsoleSink::new(config.console_capacity));
        Rc::new(Self {
            config,
            resolver,
            localizer,
            entities,
            console,
        })
    }
}

/// State stored in each interpreter's app data.
///
/// The session link is weak: the session owns sub-script environments, and
/// those environments must not keep the session alive.
pub(super) struct BridgeData {
    pub(super) services: Rc<HostServices>,
    pub(super) session: Weak<ScenarioSession>,
    /// Liveness token of the owning [`ScriptEnvironment`](super::ScriptEnvironment).
    pub(super) alive: Weak<()>,
}

impl BridgeData {
    fn with<R>(lua: &Lua, f: impl FnOnce(&BridgeData) -> R) -> LuaResult<R> {
        let data = lua
            .app_data_ref::<BridgeData>()
            .ok_or_else(|| LuaError::runtime("BridgeData not found"))?;
        Ok(f(&data))
    }

    pub(super) fn services(lua: &Lua) -> LuaResult<Rc<HostServices>> {
        Self::with(lua, |data| data.services.clone())
    }

    pub(super) fn session(lua: &Lua) -> LuaResult<Rc<ScenarioSession>> {
        Self::with(lua, |data| data.session.upgrade())?
            .ok_or_else(|| LuaError::runtime("scenario session has ended"))
    }

    pub(super) fn liveness(lua: &Lua) -> LuaResult<Weak<()>> {
        Self::with(lua, |data| data.alive.clone())
    }
}
