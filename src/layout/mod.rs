//! Window tiling algorithms and the shared layout machinery
//!
//! Each algorithm lives in its own module and implements
//! [`TilingAlgorithm`]; the [`AlgorithmRegistry`] maps stable ids to
//! instances. Algorithms produce exactly-tiling zone rectangles; gap
//! spacing is applied afterwards by [`apply_gaps`].

// Re-export the main public interface
pub use bsp::BspAlgorithm;
pub use columns::ColumnsAlgorithm;
pub use fibonacci::FibonacciAlgorithm;
pub use gaps::apply_gaps;
pub use master_stack::MasterStackAlgorithm;
pub use monocle::MonocleAlgorithm;
pub use registry::AlgorithmRegistry;
pub use rows::RowsAlgorithm;
pub use three_column::ThreeColumnAlgorithm;
pub use traits::{LayoutParams, TilingAlgorithm, distribute_evenly};

// Public modules for direct access
pub mod bsp;
pub mod columns;
pub mod fibonacci;
pub mod gaps;
pub mod master_stack;
pub mod monocle;
pub mod registry;
pub mod rows;
pub mod three_column;
pub mod traits;

// Internal modules
pub(crate) mod constants;
