use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use crate::rules;
use crate::types::RuleBuilder;

/// Mapping from rule name to [`RuleBuilder`].
///
/// Later registrations win on a name collision, which is how callers
/// override built-ins. A clone is cheap: builders are shared behind
/// `Arc`.
#[derive(Clone, Default)]
pub struct Registry {
    builders: HashMap<String, Arc<dyn RuleBuilder>>,
}

impl Registry {
    /// Create an empty registry with no rules at all.
    ///
    /// Most callers want [`default_rules()`] instead, which starts from
    /// the built-in rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builder under `name`, replacing any existing one.
    pub fn register(&mut self, name: impl Into<String>, builder: impl RuleBuilder + 'static) {
        self.builders.insert(name.into(), Arc::new(builder));
    }

    /// Look up the builder registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn RuleBuilder>> {
        self.builders.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Registered rule names, sorted for stable output.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Overlay every rule from `other` onto this registry.
    /// Entries from `other` win on collision.
    pub fn merge(&mut self, other: &Registry) {
        for (name, builder) in &other.builders {
            self.builders.insert(name.clone(), Arc::clone(builder));
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.names())
            .finish()
    }
}

static DEFAULT_RULES: OnceLock<RwLock<Registry>> = OnceLock::new();

fn default_store() -> &'static RwLock<Registry> {
    DEFAULT_RULES.get_or_init(|| RwLock::new(rules::builtin()))
}

/// Snapshot of the process-wide default registry.
///
/// Seeded with the built-in rules on first touch; every
/// [`Validator`](crate::Validator) copies it at construction, so
/// changes made here affect only validators created afterwards.
#[must_use]
pub fn default_rules() -> Registry {
    match default_store().read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Register one rule in the process-wide default registry.
///
/// Intended for configuration time, before validation traffic starts;
/// the lock only serializes the rare late registration.
pub fn register_default_rule(name: impl Into<String>, builder: impl RuleBuilder + 'static) {
    let mut guard = match default_store().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.register(name, builder);
}

/// Overlay a whole registry of rules onto the process-wide defaults.
pub fn register_default_rules(rules: &Registry) {
    let mut guard = match default_store().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.merge(rules);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompileError, FieldRule, RuleCheck};
    use serde_json::{Map, Value};

    fn pass_rule(
        _args: &[Value],
        _registry: &Registry,
    ) -> Result<Box<dyn FieldRule>, CompileError> {
        Ok(Box::new(
            |_value: Option<&Value>, _record: &Map<String, Value>| -> RuleCheck { Ok(None) },
        ))
    }

    fn fail_rule(
        _args: &[Value],
        _registry: &Registry,
    ) -> Result<Box<dyn FieldRule>, CompileError> {
        Ok(Box::new(
            |_value: Option<&Value>, _record: &Map<String, Value>| -> RuleCheck {
                Err("ALWAYS".to_owned())
            },
        ))
    }

    #[test]
    fn register_and_get() {
        let mut registry = Registry::new();
        assert!(!registry.contains("pass"));
        registry.register("pass", pass_rule);
        assert!(registry.contains("pass"));
        assert!(registry.get("pass").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = Registry::new();
        registry.register("rule", pass_rule);
        registry.register("rule", fail_rule);

        let rule = registry
            .get("rule")
            .unwrap()
            .build(&[], &registry)
            .unwrap();
        assert_eq!(rule.check(None, &Map::new()), Err("ALWAYS".to_owned()));
    }

    #[test]
    fn merge_overlays_entries() {
        let mut base = Registry::new();
        base.register("a", pass_rule);
        base.register("b", pass_rule);

        let mut overlay = Registry::new();
        overlay.register("b", fail_rule);
        overlay.register("c", pass_rule);

        base.merge(&overlay);
        assert_eq!(base.names(), vec!["a", "b", "c"]);

        let rule = base.get("b").unwrap().build(&[], &base).unwrap();
        assert_eq!(rule.check(None, &Map::new()), Err("ALWAYS".to_owned()));
    }

    #[test]
    fn default_rules_contain_builtins() {
        let registry = default_rules();
        for name in [
            "required",
            "not_empty",
            "one_of",
            "min_length",
            "max_length",
            "length_equal",
            "length_between",
            "like",
        ] {
            assert!(registry.contains(name), "missing builtin '{name}'");
        }
    }

    #[test]
    fn default_snapshot_is_independent() {
        let mut snapshot = default_rules();
        snapshot.register("snapshot_only_rule", pass_rule);
        assert!(!default_rules().contains("snapshot_only_rule"));
    }

    #[test]
    fn debug_lists_rule_names() {
        let mut registry = Registry::new();
        registry.register("pass", pass_rule);
        let rendered = format!("{registry:?}");
        assert!(rendered.contains("pass"));
    }
}
