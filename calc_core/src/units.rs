//! # Unit Types
//!
//! Lightweight newtype wrappers for the metric quantities used in footing
//! takeoffs. They serialize as bare numbers.
//!
//! Input and result structs keep plain `f64` fields with a unit suffix in
//! the field name (`blinding_length_m`, `total_volume_m3`). Inside the
//! calculators and the quantity report, values are wrapped so that unit
//! changes go through typed methods: [`KnPerSqM::over`] and
//! [`KiloNewtons::required_area`] for sizing, [`Meters::by`] and
//! [`SqMeters::extrude`] for footing volumes, and the yd³ conversion for
//! ready-mix orders.
//!
//! ## Units
//!
//! - Length: meters (m)
//! - Area: square meters (m²)
//! - Volume: cubic meters (m³), cubic yards (yd³) for ready-mix ordering
//! - Force: kilonewtons (kN)
//! - Pressure / area load: kilonewtons per square meter (kN/m² = kPa)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{CubicMeters, CubicYards, Meters};
//!
//! let plan = Meters(2.2).by(Meters(1.8));
//! assert!((plan.value() - 3.96).abs() < 1e-9);
//!
//! let yd3: CubicYards = CubicMeters(1.0).into();
//! assert!((yd3.0 - 1.30795).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

/// Cubic yards in one cubic meter
const YD3_PER_M3: f64 = 1.307_950_619_314_392;

// ============================================================================
// Geometry
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

/// Volume in cubic yards
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

impl From<CubicMeters> for CubicYards {
    fn from(m3: CubicMeters) -> Self {
        CubicYards(m3.0 * YD3_PER_M3)
    }
}

impl From<CubicYards> for CubicMeters {
    fn from(yd3: CubicYards) -> Self {
        CubicMeters(yd3.0 / YD3_PER_M3)
    }
}

impl Meters {
    /// Plan area of a rectangle with this length and the given width
    pub fn by(self, width: Meters) -> SqMeters {
        SqMeters(self.0 * width.0)
    }
}

impl SqMeters {
    /// Prism volume with this plan area and the given height
    pub fn extrude(self, height: Meters) -> CubicMeters {
        CubicMeters(self.0 * height.0)
    }
}

// ============================================================================
// Loads
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Pressure or area load in kN/m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerSqM(pub f64);

impl KnPerSqM {
    /// Resultant force of this area load over `area`
    pub fn over(self, area: SqMeters) -> KiloNewtons {
        KiloNewtons(self.0 * area.0)
    }
}

impl KiloNewtons {
    /// Area needed to spread this force at the given allowable pressure
    pub fn required_area(self, allowable: KnPerSqM) -> SqMeters {
        SqMeters(self.0 / allowable.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SqMeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(CubicYards);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(KnPerSqM);
