//! Scenario script bridge.
//!
//! Embeds Lua for scenario scripting: script environments with a fixed host
//! API, module loading with localization overlays, script callbacks invoked
//! by the host, and the sector grid naming used by scripts.

pub mod luarc_generator;
pub mod resources;
pub mod sectors;
pub mod stub_generator;
