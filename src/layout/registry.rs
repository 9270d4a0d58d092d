//! Algorithm registry
//!
//! Ordered mapping from algorithm id to algorithm instance. The engine
//! owns a registry built by [`AlgorithmRegistry::with_builtins`]; a lazily
//! initialized process-wide instance is also available through
//! [`AlgorithmRegistry::global`] for UI enumeration. Built-in algorithms
//! are registered explicitly at construction in a fixed priority order so
//! the UI listing is deterministic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

use tracing::warn;

use super::bsp::BspAlgorithm;
use super::columns::ColumnsAlgorithm;
use super::fibonacci::FibonacciAlgorithm;
use super::master_stack::MasterStackAlgorithm;
use super::monocle::MonocleAlgorithm;
use super::rows::RowsAlgorithm;
use super::three_column::ThreeColumnAlgorithm;
use super::traits::TilingAlgorithm;

/// Registry of available tiling algorithms
#[derive(Default)]
pub struct AlgorithmRegistry {
    algorithms: HashMap<String, Box<dyn TilingAlgorithm>>,
    /// Registration order, preserved for UI display
    order: Vec<String>,
}

/// Built-in algorithms with their registration priorities (lower first)
fn builtins() -> Vec<(u32, Box<dyn TilingAlgorithm>)> {
    vec![
        (10, Box::new(MasterStackAlgorithm)),
        (20, Box::new(ColumnsAlgorithm)),
        (25, Box::new(RowsAlgorithm)),
        (30, Box::new(BspAlgorithm::new())),
        (35, Box::new(FibonacciAlgorithm)),
        (40, Box::new(MonocleAlgorithm)),
        (45, Box::new(ThreeColumnAlgorithm)),
    ]
}

impl AlgorithmRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry populated with every built-in algorithm
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.install_builtins();
        registry
    }

    /// The process-wide registry, created on first use
    pub fn global() -> &'static Mutex<AlgorithmRegistry> {
        static GLOBAL: OnceLock<Mutex<AlgorithmRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Mutex::new(AlgorithmRegistry::with_builtins()))
    }

    /// Locks the global registry, recovering from a poisoned lock
    pub fn global_lock() -> MutexGuard<'static, AlgorithmRegistry> {
        match Self::global().lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Registers `algorithm` under `id`, taking ownership
    ///
    /// A previously registered algorithm with the same id is dropped and
    /// replaced, and the id moves to the end of the display order.
    pub fn register(&mut self, id: &str, algorithm: Box<dyn TilingAlgorithm>) {
        if id.is_empty() {
            warn!("ignoring algorithm registration with empty id");
            return;
        }

        if self.algorithms.insert(id.to_string(), algorithm).is_some() {
            self.order.retain(|existing| existing != id);
        }
        self.order.push(id.to_string());
    }

    /// Removes and drops the algorithm registered under `id`
    pub fn unregister(&mut self, id: &str) -> bool {
        if self.algorithms.remove(id).is_none() {
            return false;
        }
        self.order.retain(|existing| existing != id);
        true
    }

    /// Looks up an algorithm by id
    pub fn algorithm(&self, id: &str) -> Option<&dyn TilingAlgorithm> {
        self.algorithms.get(id).map(|algo| algo.as_ref())
    }

    /// Looks up an algorithm by id for a layout pass
    pub fn algorithm_mut(&mut self, id: &str) -> Option<&mut (dyn TilingAlgorithm + 'static)> {
        self.algorithms.get_mut(id).map(|algo| algo.as_mut())
    }

    /// Whether an algorithm is registered under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.algorithms.contains_key(id)
    }

    /// All registered ids in registration order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// All registered algorithms in registration order
    pub fn algorithms(&self) -> Vec<&dyn TilingAlgorithm> {
        self.order
            .iter()
            .filter_map(|id| self.algorithm(id))
            .collect()
    }

    /// The id used when no algorithm (or an unknown one) is configured
    pub fn default_id() -> &'static str {
        "master-stack"
    }

    /// The default algorithm instance
    pub fn default_algorithm(&self) -> Option<&dyn TilingAlgorithm> {
        self.algorithm(Self::default_id())
    }

    /// Drops everything and re-registers the built-ins (test reset hook)
    pub fn reset_to_builtins(&mut self) {
        self.algorithms.clear();
        self.order.clear();
        self.install_builtins();
    }

    fn install_builtins(&mut self) {
        let mut pending = builtins();
        pending.sort_by_key(|(priority, _)| *priority);
        for (_, algorithm) in pending {
            let id = algorithm.id();
            self.register(id, algorithm);
        }
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layout::traits::LayoutParams;

    #[test]
    fn test_builtins_all_registered() {
        let registry = AlgorithmRegistry::with_builtins();
        for id in [
            "master-stack",
            "columns",
            "rows",
            "bsp",
            "fibonacci",
            "monocle",
            "three-column",
        ] {
            assert!(registry.contains(id), "missing builtin {id}");
        }
        assert_eq!(registry.ids().len(), 7);
    }

    #[test]
    fn test_registration_order_follows_priority() {
        let registry = AlgorithmRegistry::with_builtins();
        assert_eq!(
            registry.ids(),
            &[
                "master-stack",
                "columns",
                "rows",
                "bsp",
                "fibonacci",
                "monocle",
                "three-column"
            ]
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = AlgorithmRegistry::with_builtins();
        let mut ids = registry.ids().to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), registry.ids().len());
    }

    #[test]
    fn test_default_algorithm() {
        let registry = AlgorithmRegistry::with_builtins();
        assert_eq!(AlgorithmRegistry::default_id(), "master-stack");
        let default = registry.default_algorithm().map(|algo| algo.id());
        assert_eq!(default, Some("master-stack"));
    }

    #[test]
    fn test_unknown_lookup() {
        let registry = AlgorithmRegistry::with_builtins();
        assert!(registry.algorithm("spiral-galaxy").is_none());
        assert!(registry.algorithm("").is_none());
        assert!(!registry.contains("spiral-galaxy"));
    }

    #[test]
    fn test_unregister() {
        let mut registry = AlgorithmRegistry::with_builtins();
        assert!(registry.unregister("monocle"));
        assert!(!registry.contains("monocle"));
        assert_eq!(registry.ids().len(), 6);
        assert!(!registry.unregister("monocle"));
    }

    #[test]
    fn test_replacement_moves_to_end_of_order() {
        let mut registry = AlgorithmRegistry::with_builtins();
        registry.register("master-stack", Box::new(super::MasterStackAlgorithm));
        assert_eq!(registry.ids().len(), 7);
        assert_eq!(registry.ids().last().map(String::as_str), Some("master-stack"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut registry = AlgorithmRegistry::new();
        registry.register("", Box::new(super::MonocleAlgorithm));
        assert!(registry.ids().is_empty());
    }

    #[test]
    fn test_registered_algorithms_produce_zones() {
        let mut registry = AlgorithmRegistry::with_builtins();
        let screen = Rect::new(0, 0, 1920, 1080);
        let params = LayoutParams::default();
        let ids: Vec<String> = registry.ids().to_vec();
        for id in ids {
            let Some(algo) = registry.algorithm_mut(&id) else {
                panic!("{id} disappeared");
            };
            let zones = algo.calculate_zones(3, screen, &params);
            assert_eq!(zones.len(), 3, "algorithm {id}");
        }
    }

    #[test]
    fn test_global_is_shared_and_populated() {
        let registry = AlgorithmRegistry::global_lock();
        assert!(registry.contains("master-stack"));
        assert!(registry.contains("bsp"));
    }

    #[test]
    fn test_reset_to_builtins() {
        let mut registry = AlgorithmRegistry::with_builtins();
        registry.unregister("bsp");
        registry.register("custom", Box::new(super::ColumnsAlgorithm));
        registry.reset_to_builtins();
        assert!(registry.contains("bsp"));
        assert!(!registry.contains("custom"));
        assert_eq!(registry.ids().len(), 7);
    }
}
