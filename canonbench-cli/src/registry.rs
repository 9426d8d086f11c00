//! Engine Registry
//!
//! Engines evaluated by the command line. The process engines are registered
//! by default; native engines are added by embedders that link a canonizer.

use crate::config::EnginesConfig;
use canonbench_core::{Engine, EngineError, ScottEngine, ScottMode};
use regex::Regex;
use std::sync::Arc;

/// Ordered set of engines
#[derive(Default, Clone)]
pub struct EngineRegistry {
    engines: Vec<Arc<dyn Engine>>,
}

impl EngineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the Scott process engines configured from `config`
    pub fn with_defaults(config: &EnginesConfig) -> Self {
        let mut registry = Self::new();
        for mode in [ScottMode::Directed, ScottMode::Undirected] {
            registry.register(Arc::new(ScottEngine::new(
                mode,
                config.python.clone(),
                config.scott_dir.clone(),
            )));
        }
        registry
    }

    /// Add an engine. An engine with the same name replaces the earlier one.
    pub fn register(&mut self, engine: Arc<dyn Engine>) {
        match self.engines.iter().position(|e| e.id() == engine.id()) {
            Some(index) => self.engines[index] = engine,
            None => self.engines.push(engine),
        }
    }

    /// Registered engines in registration order
    pub fn engines(&self) -> &[Arc<dyn Engine>] {
        &self.engines
    }

    /// Number of registered engines
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether no engine is registered
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Engines whose name matches `filter` and, when `enabled` is non-empty,
    /// appears in `enabled`
    pub fn select(&self, filter: &Regex, enabled: &[String]) -> Vec<Arc<dyn Engine>> {
        self.engines
            .iter()
            .filter(|engine| filter.is_match(engine.id().as_str()))
            .filter(|engine| {
                enabled.is_empty() || enabled.iter().any(|name| name == engine.id().as_str())
            })
            .cloned()
            .collect()
    }

    /// Run every engine's availability check, returning all failures
    pub fn check_available(engines: &[Arc<dyn Engine>]) -> Vec<EngineError> {
        engines
            .iter()
            .filter_map(|engine| engine.check_available().err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonbench_core::{EngineId, EngineTiming, QueryGraph};

    struct Named {
        id: EngineId,
        available: bool,
    }

    impl Engine for Named {
        fn id(&self) -> &EngineId {
            &self.id
        }

        fn check_available(&self) -> Result<(), EngineError> {
            if self.available {
                Ok(())
            } else {
                Err(EngineError::Unavailable {
                    engine: self.id.clone(),
                    reason: "not linked".to_string(),
                })
            }
        }

        fn canonize(&self, _graph: &QueryGraph) -> Result<EngineTiming, EngineError> {
            Ok(EngineTiming::default())
        }
    }

    fn named(name: &str, available: bool) -> Arc<dyn Engine> {
        Arc::new(Named {
            id: name.into(),
            available,
        })
    }

    #[test]
    fn test_defaults() {
        let registry = EngineRegistry::with_defaults(&EnginesConfig::default());
        let names: Vec<&str> = registry.engines().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(names, vec!["Scott (directed)", "Scott (undirected)"]);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = EngineRegistry::new();
        registry.register(named("Traces", false));
        registry.register(named("Bliss", true));
        registry.register(named("Traces", true));
        assert_eq!(registry.len(), 2);
        assert!(EngineRegistry::check_available(registry.engines()).is_empty());
    }

    #[test]
    fn test_select() {
        let mut registry = EngineRegistry::new();
        for name in ["Nauty (dense)", "Nauty (sparse)", "Traces"] {
            registry.register(named(name, true));
        }

        let all = Regex::new(".*").unwrap();
        assert_eq!(registry.select(&all, &[]).len(), 3);

        let nauty = Regex::new("^Nauty").unwrap();
        assert_eq!(registry.select(&nauty, &[]).len(), 2);

        let enabled = vec!["Traces".to_string(), "Nauty (sparse)".to_string()];
        let selected = registry.select(&nauty, &enabled);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id().as_str(), "Nauty (sparse)");
    }

    #[test]
    fn test_unavailable_reported() {
        let engines = vec![named("A", true), named("B", false)];
        let failures = EngineRegistry::check_available(&engines);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].to_string().contains("'B'"));
    }
}
