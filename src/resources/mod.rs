//! Host-side state and services used by the script bridge.
//!
//! Overview
//! - `config` – INI-backed bridge configuration
//! - `console` – bounded console buffer fed by script `print` and faults
//! - `entities` – entity creation backed by an ECS world
//! - `hooks` – GM functions, event hooks and comms replies registered by scripts
//! - `localization` – translation lookup and per-module overlays
//! - `lua_runtime` – the Lua environments and their global API
//! - `resource_stream` – named resource lookup for script modules
//! - `session` – scenario state shared by all environments of a session
pub mod config;
pub mod console;
pub mod entities;
pub mod hooks;
pub mod localization;
pub mod lua_runtime;
pub mod resource_stream;
pub mod session;
