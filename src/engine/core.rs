//! Core engine state, algorithm selection, and the retile pipeline

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::config::AutotileConfig;
use crate::geometry::Rect;
use crate::layout::{AlgorithmRegistry, apply_gaps};
use crate::state::TilingState;

/// Source of screen geometry, provided by the embedding shell
///
/// Returns the available working area for a screen (panels and struts
/// already subtracted), or `None` for unknown screens.
pub trait ScreenManager {
    fn available_rect(&self, screen_name: &str) -> Option<Rect>;
}

/// Event emitted by the engine for the embedding shell to act on
///
/// The engine never moves or focuses windows itself; it emits geometry
/// and focus requests and an external applier carries them out. Events
/// are queued in emission order and drained with
/// [`AutotileEngine::take_events`]. Within one retile all `WindowTiled`
/// events come first, followed by a single `TilingChanged`.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The set of screens with autotiling enabled was changed
    EnabledScreensChanged { screens: Vec<String> },
    /// The active algorithm was switched
    AlgorithmChanged { algorithm_id: String },
    /// A retile finished for a screen
    TilingChanged { screen: String },
    /// A window should be moved to a new geometry
    WindowTiled { window_id: String, rect: Rect },
    /// A window should be activated
    FocusWindowRequested { window_id: String },
}

/// Coordinates per-screen tiling state, algorithms, and the gap pass
///
/// The engine reacts to window lifecycle events, asks the active
/// algorithm for zone geometries, runs the gap pass, and emits one
/// `WindowTiled` event per tiled window. All state is mutated from one
/// control thread; there is no internal locking.
pub struct AutotileEngine<S: ScreenManager> {
    /// Screen geometry provider
    pub(super) screens: S,
    /// Global tiling configuration
    pub(super) config: AutotileConfig,
    /// Id of the active algorithm
    pub(super) algorithm_id: String,
    /// Algorithms available to this engine
    pub(super) registry: AlgorithmRegistry,
    /// Per-screen tiling state, created lazily and kept until teardown
    pub(super) screen_states: HashMap<String, TilingState>,
    /// Which screen each known window lives on
    pub(super) window_to_screen: HashMap<String, String>,
    /// Screens with autotiling enabled
    pub(super) autotile_screens: BTreeSet<String>,
    /// Most recently focused window, as reported by the tracker
    pub(super) focused_window: Option<String>,
    /// Policy hook deciding whether a window participates in tiling
    pub(super) tile_filter: Option<Box<dyn Fn(&str) -> bool>>,
    /// Queued events awaiting the embedder
    pub(super) events: Vec<EngineEvent>,
}

impl<S: ScreenManager> AutotileEngine<S> {
    /// Creates an engine with the default configuration
    pub fn new(screens: S) -> Self {
        Self::with_config(screens, AutotileConfig::default())
    }

    /// Creates an engine with an explicit configuration
    ///
    /// The built-in algorithms are registered here, in their fixed
    /// display order. An unknown configured algorithm id falls back to
    /// the default with a warning.
    pub fn with_config(screens: S, config: AutotileConfig) -> Self {
        let registry = AlgorithmRegistry::with_builtins();
        let algorithm_id = if registry.contains(&config.algorithm_id) {
            config.algorithm_id.clone()
        } else {
            warn!(
                algorithm_id = %config.algorithm_id,
                "unknown algorithm in config, falling back to default"
            );
            AlgorithmRegistry::default_id().to_string()
        };

        Self {
            screens,
            config,
            algorithm_id,
            registry,
            screen_states: HashMap::new(),
            window_to_screen: HashMap::new(),
            autotile_screens: BTreeSet::new(),
            focused_window: None,
            tile_filter: None,
            events: Vec::new(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &AutotileConfig {
        &self.config
    }

    /// Replaces the configuration and retiles enabled screens
    ///
    /// The configured algorithm id is validated against the registry the
    /// same way [`set_algorithm`](Self::set_algorithm) does.
    pub fn set_config(&mut self, config: AutotileConfig) {
        let previous_algorithm = self.algorithm_id.clone();
        let algorithm_id = config.algorithm_id.clone();
        self.config = config;
        self.set_algorithm(&algorithm_id);
        // An algorithm switch already retiled; otherwise do it for the
        // new gaps and insertion settings.
        if self.algorithm_id == previous_algorithm {
            self.retile(None);
        }
    }

    /// The algorithms available to this engine
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Mutable registry access for registering custom algorithms
    pub fn registry_mut(&mut self) -> &mut AlgorithmRegistry {
        &mut self.registry
    }

    /// Id of the active algorithm
    pub fn algorithm(&self) -> &str {
        &self.algorithm_id
    }

    /// Switches the active algorithm, falling back to the default for
    /// unknown ids, and retiles every enabled screen
    pub fn set_algorithm(&mut self, algorithm_id: &str) {
        let new_id = if self.registry.contains(algorithm_id) {
            algorithm_id.to_string()
        } else {
            warn!(algorithm_id, "unknown algorithm, falling back to default");
            AlgorithmRegistry::default_id().to_string()
        };

        if self.algorithm_id == new_id {
            return;
        }

        self.algorithm_id = new_id;
        self.config.algorithm_id = self.algorithm_id.clone();
        self.events.push(EngineEvent::AlgorithmChanged {
            algorithm_id: self.algorithm_id.clone(),
        });
        self.retile(None);
    }

    /// Installs the policy deciding which windows get tiled
    ///
    /// Windows rejected by the filter (dialogs, transients, excluded
    /// classes) are skipped entirely when they open.
    pub fn set_tile_filter(&mut self, filter: impl Fn(&str) -> bool + 'static) {
        self.tile_filter = Some(Box::new(filter));
    }

    /// Screens with autotiling enabled
    pub fn autotile_screens(&self) -> &BTreeSet<String> {
        &self.autotile_screens
    }

    /// Whether autotiling is enabled for a screen
    pub fn is_autotile_enabled(&self, screen_name: &str) -> bool {
        self.autotile_screens.contains(screen_name)
    }

    /// Replaces the set of autotiled screens
    ///
    /// Newly enabled screens are retiled immediately. Disabling a screen
    /// keeps its state so a reconnecting screen resumes where it left
    /// off; clearing the whole set releases all per-screen state.
    pub fn set_autotile_screens(&mut self, screens: BTreeSet<String>) {
        if screens == self.autotile_screens {
            return;
        }

        let newly_enabled: Vec<String> =
            screens.difference(&self.autotile_screens).cloned().collect();
        self.autotile_screens = screens;

        if self.autotile_screens.is_empty() {
            self.screen_states.clear();
        }

        self.events.push(EngineEvent::EnabledScreensChanged {
            screens: self.autotile_screens.iter().cloned().collect(),
        });

        for screen_name in newly_enabled {
            self.retile_screen(&screen_name);
        }
    }

    /// Tiling state for a screen, created lazily with config defaults
    pub fn state_for_screen(&mut self, screen_name: &str) -> Option<&mut TilingState> {
        if screen_name.is_empty() {
            warn!("refusing to create tiling state for empty screen name");
            return None;
        }
        self.ensure_state(screen_name);
        self.screen_states.get_mut(screen_name)
    }

    /// Drains the queued engine events
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recomputes the layout for one screen, or all enabled screens
    pub fn retile(&mut self, screen_name: Option<&str>) {
        match screen_name {
            Some(name) => self.retile_screen(name),
            None => {
                let screens: Vec<String> = self.autotile_screens.iter().cloned().collect();
                for name in screens {
                    self.retile_screen(&name);
                }
            }
        }
    }

    pub(super) fn ensure_state(&mut self, screen_name: &str) {
        if screen_name.is_empty() || self.screen_states.contains_key(screen_name) {
            return;
        }
        let mut state = TilingState::new(screen_name);
        state.set_master_count(self.config.master_count);
        state.set_split_ratio(self.config.split_ratio);
        state.take_changes();
        self.screen_states.insert(screen_name.to_string(), state);
    }

    /// Runs the full retile pipeline for one screen
    ///
    /// Pipeline: algorithm zones -> postcondition validation -> gap pass
    /// -> cache in state -> per-window geometry events -> tiling-changed.
    /// Any failure aborts the pass and keeps the previous layout.
    pub(super) fn retile_screen(&mut self, screen_name: &str) {
        if !self.autotile_screens.contains(screen_name) {
            return;
        }
        self.ensure_state(screen_name);

        let Some(screen_rect) = self.screens.available_rect(screen_name) else {
            warn!(screen = screen_name, "no geometry for screen, skipping retile");
            return;
        };
        if !screen_rect.is_valid() {
            warn!(screen = screen_name, "invalid screen geometry, skipping retile");
            return;
        }

        let Some(state) = self.screen_states.get_mut(screen_name) else {
            return;
        };

        let tiled = state.tiled_windows();
        if tiled.is_empty() {
            state.set_calculated_zones(Vec::new());
            self.events.push(EngineEvent::TilingChanged {
                screen: screen_name.to_string(),
            });
            return;
        }

        let params = state.layout_params();
        let Some(algorithm) = self.registry.algorithm_mut(&self.algorithm_id) else {
            warn!(algorithm_id = %self.algorithm_id, "active algorithm missing from registry");
            return;
        };

        let mut zones = algorithm.calculate_zones(tiled.len(), screen_rect, &params);

        // Postcondition check: exactly one valid in-bounds zone per window.
        // A violation keeps the previous layout rather than breaking it.
        if zones.len() != tiled.len() {
            warn!(
                algorithm_id = %self.algorithm_id,
                expected = tiled.len(),
                got = zones.len(),
                "algorithm returned wrong zone count"
            );
            return;
        }
        if let Some(bad) = zones
            .iter()
            .find(|zone| !zone.is_valid() || !screen_rect.contains_rect(zone))
        {
            warn!(
                algorithm_id = %self.algorithm_id,
                zone = ?bad,
                "algorithm returned an out-of-bounds zone"
            );
            return;
        }

        if self.config.inner_gap > 0 || self.config.outer_gap > 0 {
            apply_gaps(
                &mut zones,
                screen_rect,
                self.config.inner_gap,
                self.config.outer_gap,
            );
        }

        state.set_calculated_zones(zones.clone());

        for (window_id, rect) in tiled.iter().zip(&zones) {
            self.events.push(EngineEvent::WindowTiled {
                window_id: window_id.clone(),
                rect: *rect,
            });
        }
        self.events.push(EngineEvent::TilingChanged {
            screen: screen_name.to_string(),
        });
    }
}
