//! Scenario session state.
//!
//! The [`ScenarioSession`] is the single coordinating object for everything
//! scripts change outside their own globals: scenario settings, victory,
//! banner and global message, elapsed time, GM functions, event hooks, comms
//! state and the sub-script environments created with `Script()`.
//!
//! Script environments reach the session through a weak link, so dropping
//! the session (or calling [`ScenarioSession::clear_additional_scripts`])
//! releases every sub-script and invalidates the callbacks they registered.
//!
//! Host-side invocation of script callbacks happens here. A callback is
//! always cloned out of its registry before being called, so a script that
//! re-registers or clears callbacks while running never hits a borrowed
//! registry.

use crate::resources::console::ConsoleSink;
use crate::resources::hooks::{CommsReply, CommsState, EventHook, EventHooks, GmFunctionRegistry};
use crate::resources::lua_runtime::{HostServices, ScriptCallback, ScriptEnvironment, ScriptError};
use log::info;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// A message shown on every main screen until its timeout runs out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalMessage {
    pub text: String,
    /// Seconds left before the message disappears.
    pub timeout: f32,
}

/// Serializable summary of the session, used for reports.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSnapshot {
    pub victory: Option<String>,
    pub paused: bool,
    pub banner: String,
    pub global_message: Option<GlobalMessage>,
    pub elapsed_time: f32,
    pub gm_functions: Vec<String>,
    pub comms_message: Option<String>,
    pub comms_replies: Vec<String>,
    pub comms_gm_requested: bool,
    pub settings: BTreeMap<String, String>,
    pub additional_scripts: usize,
}

/// Session-scoped host state shared by all script environments.
pub struct ScenarioSession {
    services: Rc<HostServices>,
    settings: RefCell<FxHashMap<String, String>>,
    victory: RefCell<Option<String>>,
    paused: Cell<bool>,
    banner: RefCell<String>,
    global_message: RefCell<Option<GlobalMessage>>,
    elapsed_time: Cell<f32>,
    gm_functions: RefCell<GmFunctionRegistry>,
    hooks: RefCell<EventHooks>,
    comms: RefCell<CommsState>,
    additional_scripts: RefCell<Vec<Rc<ScriptEnvironment>>>,
}

impl ScenarioSession {
    pub fn new(services: Rc<HostServices>) -> Rc<Self> {
        Rc::new(Self {
            services,
            settings: RefCell::new(FxHashMap::default()),
            victory: RefCell::new(None),
            paused: Cell::new(false),
            banner: RefCell::new(String::new()),
            global_message: RefCell::new(None),
            elapsed_time: Cell::new(0.0),
            gm_functions: RefCell::new(GmFunctionRegistry::default()),
            hooks: RefCell::new(EventHooks::default()),
            comms: RefCell::new(CommsState::default()),
            additional_scripts: RefCell::new(Vec::new()),
        })
    }

    pub fn services(&self) -> &Rc<HostServices> {
        &self.services
    }

    pub fn console(&self) -> &ConsoleSink {
        &self.services.console
    }

    // ===== Settings =====

    pub fn set_setting(&self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.borrow_mut().insert(key.into(), value.into());
    }

    pub fn setting(&self, key: &str) -> Option<String> {
        self.settings.borrow().get(key).cloned()
    }

    /// Value of a scenario setting, or an empty string when it is not set.
    pub fn scenario_setting(&self, key: &str) -> String {
        self.setting(key).unwrap_or_default()
    }

    /// The `variation` setting, or `"None"`.
    pub fn scenario_variation(&self) -> String {
        self.setting("variation").unwrap_or_else(|| "None".to_string())
    }

    // ===== Scenario flow =====

    /// Records the winning faction and pauses the scenario.
    pub fn declare_victory(&self, faction: impl Into<String>) {
        let faction = faction.into();
        info!("Scenario ended, victory for {}", faction);
        *self.victory.borrow_mut() = Some(faction);
        self.paused.set(true);
    }

    pub fn victory(&self) -> Option<String> {
        self.victory.borrow().clone()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    pub fn set_banner(&self, banner: impl Into<String>) {
        *self.banner.borrow_mut() = banner.into();
    }

    pub fn banner(&self) -> String {
        self.banner.borrow().clone()
    }

    /// Shows a global message; `None` uses the configured default timeout.
    pub fn show_global_message(&self, text: impl Into<String>, timeout: Option<f32>) {
        let timeout = timeout.unwrap_or(self.services.config.global_message_timeout);
        *self.global_message.borrow_mut() = Some(GlobalMessage {
            text: text.into(),
            timeout,
        });
    }

    pub fn global_message(&self) -> Option<GlobalMessage> {
        self.global_message.borrow().clone()
    }

    /// Advances scenario time. Nothing advances while paused.
    pub fn advance_time(&self, delta: f32) {
        if self.paused.get() || delta <= 0.0 {
            return;
        }
        self.elapsed_time.set(self.elapsed_time.get() + delta);
        let mut message = self.global_message.borrow_mut();
        if let Some(current) = message.as_mut() {
            current.timeout -= delta;
            if current.timeout <= 0.0 {
                *message = None;
            }
        }
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time.get()
    }

    // ===== GM functions =====

    pub fn add_gm_function(&self, label: impl Into<String>, callback: ScriptCallback) {
        self.gm_functions.borrow_mut().push(label, callback);
    }

    pub fn clear_gm_functions(&self) {
        self.gm_functions.borrow_mut().clear();
    }

    /// GM function labels in registration order.
    pub fn gm_functions(&self) -> Vec<String> {
        self.gm_functions.borrow().labels()
    }

    /// Runs the GM function at `index`.
    ///
    /// Returns `Ok(false)` when there is no such entry. Failures are also
    /// written to the console.
    pub fn run_gm_function(&self, index: usize) -> Result<bool, ScriptError> {
        let Some(entry) = self.gm_functions.borrow().get(index).cloned() else {
            return Ok(false);
        };
        self.report(&entry.label, entry.callback.call::<_, ()>(()))?;
        Ok(true)
    }

    // ===== Event hooks =====

    pub fn set_hook(&self, hook: EventHook, callback: ScriptCallback) {
        self.hooks.borrow_mut().set(hook, callback);
    }

    /// Notifies the `onNewPlayerShip` hook. Returns `Ok(false)` if none is installed.
    pub fn fire_new_player_ship(&self, entity_id: u64) -> Result<bool, ScriptError> {
        let hook = EventHook::NewPlayerShip;
        let Some(callback) = self.hooks.borrow().get(hook).cloned() else {
            return Ok(false);
        };
        self.report(hook.installer(), callback.call::<_, ()>(entity_id))?;
        Ok(true)
    }

    // ===== Comms =====

    pub fn set_comms_message(&self, message: impl Into<String>) {
        self.comms.borrow_mut().message = Some(message.into());
    }

    pub fn add_comms_reply(&self, label: impl Into<String>, callback: ScriptCallback) {
        self.comms.borrow_mut().replies.push(CommsReply {
            label: label.into(),
            callback,
        });
    }

    pub fn request_gm_comms(&self) {
        self.comms.borrow_mut().gm_requested = true;
    }

    pub fn comms_message(&self) -> Option<String> {
        self.comms.borrow().message.clone()
    }

    pub fn comms_replies(&self) -> Vec<String> {
        self.comms
            .borrow()
            .replies
            .iter()
            .map(|r| r.label.clone())
            .collect()
    }

    pub fn gm_comms_requested(&self) -> bool {
        self.comms.borrow().gm_requested
    }

    pub fn reset_comms(&self) {
        self.comms.borrow_mut().reset();
    }

    /// Selects a comms reply.
    ///
    /// The current message and replies are cleared first, so the callback
    /// can set up the next step of the conversation. Returns `Ok(false)`
    /// when there is no such reply.
    pub fn select_comms_reply(
        &self,
        index: usize,
        source: u64,
        target: u64,
    ) -> Result<bool, ScriptError> {
        let reply = {
            let mut comms = self.comms.borrow_mut();
            let Some(reply) = comms.replies.get(index).cloned() else {
                return Ok(false);
            };
            comms.message = None;
            comms.replies.clear();
            reply
        };
        self.report(&reply.label, reply.callback.call::<_, ()>((source, target)))?;
        Ok(true)
    }

    // ===== Additional scripts =====

    pub fn add_additional_script(&self, environment: Rc<ScriptEnvironment>) {
        self.additional_scripts.borrow_mut().push(environment);
    }

    pub fn additional_script_count(&self) -> usize {
        self.additional_scripts.borrow().len()
    }

    /// Releases every sub-script environment.
    pub fn clear_additional_scripts(&self) {
        let released = std::mem::take(&mut *self.additional_scripts.borrow_mut());
        drop(released);
    }

    pub fn snapshot(&self) -> ScenarioSnapshot {
        let comms = self.comms.borrow();
        ScenarioSnapshot {
            victory: self.victory(),
            paused: self.is_paused(),
            banner: self.banner(),
            global_message: self.global_message(),
            elapsed_time: self.elapsed_time(),
            gm_functions: self.gm_functions(),
            comms_message: comms.message.clone(),
            comms_replies: comms.replies.iter().map(|r| r.label.clone()).collect(),
            comms_gm_requested: comms.gm_requested,
            settings: self
                .settings
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            additional_scripts: self.additional_script_count(),
        }
    }

    fn report(&self, label: &str, result: Result<(), ScriptError>) -> Result<(), ScriptError> {
        if let Err(e) = &result {
            self.console().add_error(format!("{}: {}", label, e));
        }
        result
    }
}
