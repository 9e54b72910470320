//! Translation lookup and localization overlays.
//!
//! Scripts translate strings with `_("text")` or `_("context", "text")`.
//! Loading a module through `require` or `Script():run` also asks the
//! [`Localizer`] to load the module's overlay (`locale/<module>.<lang>.po`).
//! Overlay loading is best effort: a missing overlay is not an error.
//!
//! Parsing translation files is left to the host. [`MemoryCatalog`] keeps
//! entries in memory and records which overlays were requested.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// Translation collaborator used by the script bridge.
pub trait Localizer {
    /// Loads the overlay resource `name`. Returns `false` when it does not exist.
    fn load_overlay(&self, name: &str) -> bool;

    /// Translates `text`, returning it unchanged when no entry exists.
    fn translate(&self, text: &str) -> String;

    /// Translates `text` within a disambiguating `context`.
    fn translate_in(&self, context: &str, text: &str) -> String;
}

/// In-memory translation catalog.
///
/// Overlays registered with [`MemoryCatalog::add_overlay`] merge their
/// entries into the catalog when loaded.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    entries: RefCell<FxHashMap<(Option<String>, String), String>>,
    overlays: RefCell<FxHashMap<String, Vec<(Option<String>, String, String)>>>,
    requested: RefCell<Vec<String>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a translation without context.
    pub fn insert(&self, text: impl Into<String>, translated: impl Into<String>) {
        self.entries
            .borrow_mut()
            .insert((None, text.into()), translated.into());
    }

    /// Adds a translation within a context.
    pub fn insert_in(
        &self,
        context: impl Into<String>,
        text: impl Into<String>,
        translated: impl Into<String>,
    ) {
        self.entries
            .borrow_mut()
            .insert((Some(context.into()), text.into()), translated.into());
    }

    /// Registers an overlay that becomes available to [`Localizer::load_overlay`].
    pub fn add_overlay(&self, name: impl Into<String>, entries: &[(&str, &str)]) {
        let entries = entries
            .iter()
            .map(|(text, translated)| (None, text.to_string(), translated.to_string()))
            .collect();
        self.overlays.borrow_mut().insert(name.into(), entries);
    }

    /// Overlay names requested so far, in request order.
    pub fn requested_overlays(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Localizer for MemoryCatalog {
    fn load_overlay(&self, name: &str) -> bool {
        self.requested.borrow_mut().push(name.to_string());
        let overlays = self.overlays.borrow();
        let Some(entries) = overlays.get(name) else {
            return false;
        };
        let mut catalog = self.entries.borrow_mut();
        for (context, text, translated) in entries {
            catalog.insert((context.clone(), text.clone()), translated.clone());
        }
        true
    }

    fn translate(&self, text: &str) -> String {
        self.entries
            .borrow()
            .get(&(None, text.to_string()))
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }

    fn translate_in(&self, context: &str, text: &str) -> String {
        let entries = self.entries.borrow();
        entries
            .get(&(Some(context.to_string()), text.to_string()))
            .or_else(|| entries.get(&(None, text.to_string())))
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untranslated_text_is_returned_unchanged() {
        let catalog = MemoryCatalog::new();
        assert_eq!(catalog.translate("Hello"), "Hello");
        assert_eq!(catalog.translate_in("comms", "Hello"), "Hello");
    }

    #[test]
    fn test_context_falls_back_to_plain_entry() {
        let catalog = MemoryCatalog::new();
        catalog.insert("Dock", "Andocken");
        catalog.insert_in("button", "Dock", "Docken");
        assert_eq!(catalog.translate("Dock"), "Andocken");
        assert_eq!(catalog.translate_in("button", "Dock"), "Docken");
        assert_eq!(catalog.translate_in("title", "Dock"), "Andocken");
    }

    #[test]
    fn test_overlay_loading_is_recorded_and_merged() {
        let catalog = MemoryCatalog::new();
        catalog.add_overlay("locale/mission.de.po", &[("Attack", "Angriff")]);
        assert!(!catalog.load_overlay("locale/other.de.po"));
        assert_eq!(catalog.translate("Attack"), "Attack");
        assert!(catalog.load_overlay("locale/mission.de.po"));
        assert_eq!(catalog.translate("Attack"), "Angriff");
        assert_eq!(
            catalog.requested_overlays(),
            vec!["locale/other.de.po", "locale/mission.de.po"]
        );
    }
}
