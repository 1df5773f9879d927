//! # Footing Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Inputs` - Input parameters (JSON-serializable)
//! - `*Results` - Calculation results (JSON-serializable)
//! - `calculate_*(inputs) -> *Results` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`footing`] - Footing sizing from building loads (phases 1-6) and
//!   footing concrete volumes (phase 8)

pub mod footing;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use footing::{
    calculate_phase1_to_6, calculate_phase1_to_6_with, calculate_phase8, CalculatorInputs, CalculatorResults,
    FootingCalculation, FootingHeights, FootingOutcome, FootingShape, FootingVolumeInputs, FootingVolumeResult,
};

/// Enum wrapper for all calculation types stored in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Footing sizing + concrete volumes
    Footing(FootingCalculation),
    // Future: GradeBeam(GradeBeamCalculation),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Footing(f) => &f.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Footing(_) => "Footing",
        }
    }
}
