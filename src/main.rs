//! Autotile demo driver
//!
//! Runs a scripted tiling session against a fixed fake screen and logs
//! the geometries the engine emits. Useful for eyeballing algorithm
//! output without a compositor attached.

use std::collections::BTreeSet;

use anyhow::Result;
use autotile::config::AutotileConfig;
use autotile::engine::{AutotileEngine, EngineEvent, ScreenManager};
use autotile::geometry::Rect;
use tracing::info;

/// Single fixed screen standing in for the screen manager
struct DemoScreen {
    rect: Rect,
}

impl ScreenManager for DemoScreen {
    fn available_rect(&self, screen_name: &str) -> Option<Rect> {
        (screen_name == "demo-0").then_some(self.rect)
    }
}

fn drain(engine: &mut AutotileEngine<DemoScreen>) {
    for event in engine.take_events() {
        match event {
            EngineEvent::WindowTiled { window_id, rect } => {
                info!(
                    "  {window_id} -> {}x{} at ({}, {})",
                    rect.width, rect.height, rect.x, rect.y
                );
            }
            EngineEvent::TilingChanged { screen } => info!("retiled {screen}"),
            other => info!("event: {other:?}"),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = AutotileConfig::load()?;
    info!(
        "Loaded autotile config (algorithm: {}, gaps: {}/{})",
        config.algorithm_id, config.inner_gap, config.outer_gap
    );

    let screen = DemoScreen {
        rect: Rect::new(0, 0, 1920, 1080),
    };
    let mut engine = AutotileEngine::with_config(screen, config);
    engine.set_autotile_screens(BTreeSet::from(["demo-0".to_string()]));

    for window in ["editor", "terminal", "browser"] {
        info!("opening {window}");
        engine.window_opened(window, "demo-0");
        drain(&mut engine);
    }

    info!("promoting browser to master");
    engine.promote_to_master("browser");
    drain(&mut engine);

    for algorithm in ["bsp", "columns", "monocle"] {
        info!("switching to {algorithm}");
        engine.set_algorithm(algorithm);
        drain(&mut engine);
    }

    Ok(())
}
