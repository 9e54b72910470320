//! Shared setup for the script bridge integration tests.
#![allow(dead_code)]

use scriptbridge::resources::config::BridgeConfig;
use scriptbridge::resources::entities::WorldEntityFactory;
use scriptbridge::resources::localization::MemoryCatalog;
use scriptbridge::resources::lua_runtime::{HostServices, ScriptEnvironment};
use scriptbridge::resources::resource_stream::{MemoryProvider, ResourceProvider};
use scriptbridge::resources::session::ScenarioSession;
use std::rc::Rc;

pub struct Harness {
    pub provider: Rc<MemoryProvider>,
    pub catalog: Rc<MemoryCatalog>,
    pub entities: Rc<WorldEntityFactory>,
    pub session: Rc<ScenarioSession>,
}

impl Harness {
    pub fn env(&self) -> ScriptEnvironment {
        ScriptEnvironment::create(&self.session).expect("environment")
    }

    pub fn console_lines(&self) -> Vec<String> {
        self.session
            .console()
            .entries()
            .into_iter()
            .map(|e| e.message)
            .collect()
    }
}

/// Session whose modules are served from memory.
pub fn harness(files: &[(&str, &str)]) -> Harness {
    harness_with_config(files, BridgeConfig::new())
}

pub fn harness_with_config(files: &[(&str, &str)], config: BridgeConfig) -> Harness {
    let provider = Rc::new(MemoryProvider::new());
    for (name, source) in files {
        provider.insert(*name, *source);
    }
    let catalog = Rc::new(MemoryCatalog::new());
    let entities = Rc::new(WorldEntityFactory::new());
    let services = HostServices::new(
        config,
        provider.clone(),
        catalog.clone(),
        entities.clone(),
    );
    Harness {
        provider,
        catalog,
        entities,
        session: ScenarioSession::new(services),
    }
}

/// Session using a custom resource provider.
pub fn session_with_provider(provider: Rc<dyn ResourceProvider>) -> Rc<ScenarioSession> {
    let services = HostServices::new(
        BridgeConfig::new(),
        provider,
        Rc::new(MemoryCatalog::new()),
        Rc::new(WorldEntityFactory::new()),
    );
    ScenarioSession::new(services)
}
