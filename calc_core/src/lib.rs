//! # calc_core - Footing Sizing Engine
//!
//! `calc_core` sizes spread footings from building loads and soil bearing
//! capacity, and computes the concrete volumes needed to pour them. All
//! inputs and outputs are JSON-serializable so the engine can sit behind a
//! web form, a cost-report service or the `footing` CLI.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Closed-world lookups**: Building and soil tables always carry an
//!   `other` fallback, so lookups never fail
//! - **Rich Errors**: Structured error types for the layers around the formulas
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::footing::{calculate_phase1_to_6, CalculatorInputs, FootingShape};
//!
//! let inputs = CalculatorInputs {
//!     blinding_length_m: 2.4,
//!     blinding_width_m: 2.0,
//!     blinding_height_m: 0.1,
//!     floors: 2,
//!     slab_area_m2: 100.0,
//!     soil_type: "clay".to_string(),
//!     building_type: "residential".to_string(),
//!     footing_height_m: 0.4,
//!     footing_shape: FootingShape::Rectangular,
//! };
//!
//! let results = calculate_phase1_to_6(&inputs);
//! let json = serde_json::to_string_pretty(&results).unwrap();
//! assert!(json.contains("footing_area_m2"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Footing sizing (phases 1-6) and concrete volumes (phase 8)
//! - [`tables`] - Building load and soil capacity lookup tables
//! - [`report`] - Concrete quantity takeoff and cost lines
//! - [`project`] - Project container, metadata, and settings
//! - [`file_io`] - File operations with atomic saves and locking
//! - [`config`] - TOML engine configuration
//! - [`units`] - Metric unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod report;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_phase1_to_6, calculate_phase8, CalculatorInputs, CalculatorResults, FootingVolumeInputs};
pub use config::EngineConfig;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use tables::LookupTables;
