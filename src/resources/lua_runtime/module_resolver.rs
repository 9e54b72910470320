//! Module name resolution.
//!
//! Maps a module name to an open resource stream plus the name of the
//! module's localization overlay. Overlay names are derived by replacing the
//! `.lua` extension with `.<language>.po` under `locale/`:
//!
//! ```text
//! missions/escort.lua  ->  locale/missions/escort.de.po
//! ```

use crate::resources::resource_stream::{ResourceProvider, ResourceStream};
use std::rc::Rc;

/// A module opened for loading. Dropping it releases the stream.
pub struct OpenModule {
    /// Normalized module name.
    pub name: String,
    /// Locale-qualified overlay resource for this module.
    pub overlay: String,
    pub stream: Box<dyn ResourceStream>,
}

/// Resolves module names against a resource provider.
#[derive(Clone)]
pub struct ModuleResolver {
    provider: Rc<dyn ResourceProvider>,
    language: String,
}

impl ModuleResolver {
    pub fn new(provider: Rc<dyn ResourceProvider>, language: impl Into<String>) -> Self {
        Self {
            provider,
            language: language.into(),
        }
    }

    /// Opens a module, or returns `None` if the provider does not know it.
    pub fn open(&self, name: &str) -> Option<OpenModule> {
        let name = normalize_module_name(name);
        let stream = self.provider.open(&name)?;
        Some(OpenModule {
            overlay: overlay_name(&name, &self.language),
            name,
            stream,
        })
    }

    /// Overlay resource name for `module` in the configured language.
    pub fn overlay_name(&self, module: &str) -> String {
        overlay_name(&normalize_module_name(module), &self.language)
    }
}

/// Uses `/` separators and drops leading `./` segments.
pub fn normalize_module_name(name: &str) -> String {
    let mut name = name.trim().replace('\\', "/");
    while let Some(rest) = name.strip_prefix("./") {
        name = rest.to_string();
    }
    name
}

/// Derives `locale/<module without .lua>.<language>.po`.
pub fn overlay_name(module: &str, language: &str) -> String {
    let stem = module.strip_suffix(".lua").unwrap_or(module);
    format!("locale/{stem}.{language}.po")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::resource_stream::MemoryProvider;

    #[test]
    fn test_overlay_name() {
        assert_eq!(overlay_name("scenario_00.lua", "en"), "locale/scenario_00.en.po");
        assert_eq!(
            overlay_name("missions/escort.lua", "de"),
            "locale/missions/escort.de.po"
        );
        assert_eq!(overlay_name("utils", "fr"), "locale/utils.fr.po");
        // Only the extension is replaced.
        assert_eq!(overlay_name("lua.lua.lua", "en"), "locale/lua.lua.en.po");
    }

    #[test]
    fn test_normalize_module_name() {
        assert_eq!(normalize_module_name("./a.lua"), "a.lua");
        assert_eq!(normalize_module_name("api\\all.lua"), "api/all.lua");
        assert_eq!(normalize_module_name("././x/y.lua"), "x/y.lua");
    }

    #[test]
    fn test_open_normalizes_and_derives_overlay() {
        let provider = Rc::new(MemoryProvider::new().with("api/all.lua", "-- all"));
        let resolver = ModuleResolver::new(provider, "es");
        let mut module = resolver.open("./api\\all.lua").unwrap();
        assert_eq!(module.name, "api/all.lua");
        assert_eq!(module.overlay, "locale/api/all.es.po");
        assert_eq!(module.stream.read_all().unwrap(), b"-- all");
        assert!(resolver.open("none.lua").is_none());
    }
}
