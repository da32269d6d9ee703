use crate::field::{FieldOptions, ModuleField};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Constructor responsible for one field kind.
pub type FieldConstructor = Box<dyn Fn(&Value) -> ModuleField + Send + Sync>;

/// Maps kind discriminants to field constructors.
///
/// The registry is an explicit value: build it once at startup (usually
/// via [`FieldRegistry::with_builtins`]) and hand it to whatever needs to
/// reconstruct fields from untyped input. There is no process-global
/// registration and no teardown.
///
/// Registering a kind that already exists replaces the previous
/// constructor (last write wins); this is the supported way to override a
/// built-in kind. Callers must finish registering before sharing the
/// registry with concurrent readers.
pub struct FieldRegistry {
    constructors: HashMap<String, FieldConstructor>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Creates a registry preloaded with every built-in field kind.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        for kind in FieldOptions::KINDS {
            registry.register(kind, Box::new(move |raw| ModuleField::with_kind(kind, raw)));
        }

        registry
    }

    /// Records the constructor for a kind; last write wins on duplicates.
    pub fn register(&mut self, kind: impl Into<String>, constructor: FieldConstructor) {
        let kind = kind.into();

        if self.constructors.insert(kind.clone(), constructor).is_some() {
            tracing::debug!(kind = %kind, "field kind re-registered, previous constructor replaced");
        }
    }

    /// Looks up the constructor for a kind.
    #[must_use]
    pub fn resolve(&self, kind: &str) -> Option<&FieldConstructor> {
        self.constructors.get(kind)
    }

    /// The registered kind discriminants, in no particular order.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Reconstructs a field from raw input.
    ///
    /// Dispatches on `raw["kind"]`; unregistered (or absent) kinds fall
    /// back to the generic variant, carrying the discriminant as-is.
    /// Never fails.
    #[must_use]
    pub fn construct(&self, raw: &Value) -> ModuleField {
        let kind = raw.get("kind").and_then(Value::as_str).unwrap_or_default();

        match self.resolve(kind) {
            Some(constructor) => constructor(raw),
            None => {
                tracing::debug!(kind, "unregistered field kind, constructing generic fallback");
                ModuleField::with_kind(kind, raw)
            }
        }
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
