//! Layout-related constants
//!
//! Centralizes the numeric limits shared by the configuration layer, the
//! tiling state, and the algorithms so clamping is consistent everywhere.

/// Master/stack split ratio bounds
pub mod ratio {
    /// Smallest allowed master share
    pub const MIN: f64 = 0.1;

    /// Largest allowed master share
    pub const MAX: f64 = 0.9;

    /// Default master share (60% master, 40% stack)
    pub const DEFAULT: f64 = 0.6;

    /// Tolerance for ratio equality checks
    pub const EPSILON: f64 = 1e-6;
}

/// Master window count bounds
pub mod master {
    /// At least one master window
    pub const MIN: i32 = 1;

    /// Upper bound regardless of how many windows are tiled
    pub const MAX: i32 = 5;

    /// Default master count
    pub const DEFAULT: i32 = 1;
}

/// Gap spacing bounds and edge detection
pub mod gap {
    /// Gaps cannot be negative
    pub const MIN: i32 = 0;

    /// Largest allowed gap in pixels
    pub const MAX: i32 = 50;

    /// Default inner and outer gap in pixels
    pub const DEFAULT: i32 = 8;

    /// A zone edge within this distance of the screen edge counts as outer
    pub const EDGE_THRESHOLD: i32 = 2;
}

/// Zone size floor enforced by the gap pass
pub mod zone {
    /// Minimum zone extent along either axis after gaps (pixels)
    pub const MIN_SIZE: i32 = 100;
}

/// Active-window border bounds
pub mod border {
    /// Thinnest visible border
    pub const MIN_WIDTH: i32 = 1;

    /// Thickest allowed border
    pub const MAX_WIDTH: i32 = 10;

    /// Default border width in pixels
    pub const DEFAULT_WIDTH: i32 = 2;
}
