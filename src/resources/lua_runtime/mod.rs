//! Lua scripting bridge.
//!
//! Embeds Lua interpreters and exposes the host engine to scenario scripts
//! through a fixed set of global functions.
//!
//! # Architecture
//!
//! - [`environment`] - one interpreter with the host API installed
//! - [`require`] - script-side module loading with localization overlays
//! - [`class_factory`] - `createClass()` table-based classes
//! - [`callback`] - lifetime-bound handles to script functions
//! - [`script_object`] - `Script()` sub-script environments
//! - [`host_api`] - registration of every global function
//! - [`api_docs`] - documentation of the global API for tooling
//!
//! # Example
//!
//! ```lua
//! -- From a scenario script
//! require("utils.lua")
//!
//! function init()
//!     print("Starting in", getSectorName(0, 0))
//!     addGMFunction(_("Win"), function() victory("Human Navy") end)
//! end
//! ```

mod api_docs;
mod callback;
mod class_factory;
mod environment;
mod error;
mod host_api;
mod module_resolver;
mod require;
mod script_object;
mod services;

pub use api_docs::{API_CATEGORIES, ApiFunctionDoc, HOST_API_DOCS};
pub use callback::ScriptCallback;
pub use class_factory::create_class;
pub use environment::ScriptEnvironment;
pub use error::{ScriptError, script_error};
pub use host_api::version_number;
pub use module_resolver::{ModuleResolver, OpenModule, normalize_module_name, overlay_name};
pub use script_object::ScriptObject;
pub use services::HostServices;
