//! Script-registered callback registries.
//!
//! - [`GmFunctionRegistry`] – labelled buttons for the game master's control screen
//! - [`EventHooks`] – named single-slot hooks (e.g. "new player ship spawned")
//! - [`CommsState`] – the current comms message and its reply options
//!
//! These are plain containers; [`ScenarioSession`](crate::resources::session::ScenarioSession)
//! owns them and handles invocation.

use crate::resources::lua_runtime::ScriptCallback;
use rustc_hash::FxHashMap;

/// One labelled GM callback.
#[derive(Debug, Clone)]
pub struct GmFunction {
    pub label: String,
    pub callback: ScriptCallback,
}

/// Insertion-ordered list of GM functions.
///
/// Duplicate labels are legal; every entry is kept.
#[derive(Debug, Default)]
pub struct GmFunctionRegistry {
    entries: Vec<GmFunction>,
}

impl GmFunctionRegistry {
    pub fn push(&mut self, label: impl Into<String>, callback: ScriptCallback) {
        self.entries.push(GmFunction {
            label: label.into(),
            callback,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&GmFunction> {
        self.entries.get(index)
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }
}

/// Hooks a script can install. Each hook holds at most one callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventHook {
    /// Fired with the new ship's entity id when a player ship is created.
    NewPlayerShip,
}

impl EventHook {
    /// Name of the script function that installs the hook.
    pub fn installer(&self) -> &'static str {
        match self {
            EventHook::NewPlayerShip => "onNewPlayerShip",
        }
    }
}

/// Single-slot callback storage keyed by [`EventHook`].
#[derive(Debug, Default)]
pub struct EventHooks {
    slots: FxHashMap<EventHook, ScriptCallback>,
}

impl EventHooks {
    /// Installs `callback`, returning the one it replaced.
    pub fn set(&mut self, hook: EventHook, callback: ScriptCallback) -> Option<ScriptCallback> {
        self.slots.insert(hook, callback)
    }

    pub fn get(&self, hook: EventHook) -> Option<&ScriptCallback> {
        self.slots.get(&hook)
    }
}

/// One reply option offered on the comms screen.
#[derive(Debug, Clone)]
pub struct CommsReply {
    pub label: String,
    pub callback: ScriptCallback,
}

/// Comms screen state driven by scripts.
#[derive(Debug, Default)]
pub struct CommsState {
    pub message: Option<String>,
    pub replies: Vec<CommsReply>,
    /// Set when a script hands the conversation to the game master.
    pub gm_requested: bool,
}

impl CommsState {
    pub fn reset(&mut self) {
        self.message = None;
        self.replies.clear();
        self.gm_requested = false;
    }
}
