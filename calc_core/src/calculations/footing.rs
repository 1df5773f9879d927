//! # Footing Sizing and Concrete Volumes
//!
//! Converts building geometry, soil type and building use into footing plan
//! dimensions and concrete volumes.
//!
//! The pipeline runs in two independent calls:
//!
//! - [`calculate_phase1_to_6`]: blinding volume, dead/live loads, total load
//!   on the footing, required bearing area and footing plan dimensions.
//! - [`calculate_phase8`]: concrete volume of one or many footings.
//!
//! ## Assumptions
//!
//! - Area loads (kN/m²) apply uniformly per floor over the whole slab area.
//! - Rectangular footings have a fixed 1.2 : 1 length to width ratio.
//! - The blinding slab extends 0.10 m past the footing on every side, so the
//!   footing plan used for volumes is the blinding plan minus 0.20 m in each
//!   direction. Phase 8 does not use the load-derived phase 6 dimensions.
//!
//! Neither formula validates its inputs. Zero or negative geometry flows
//! through to zero, negative or NaN results; callers that need checks use
//! [`CalculatorInputs::validate`], [`FootingVolumeInputs::validate`] and
//! [`CalculatorResults::is_valid`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::footing::{
//!     calculate_phase1_to_6, calculate_phase8, CalculatorInputs, FootingShape, FootingVolumeInputs,
//! };
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
//!     footing_shape: FootingShape::Square,
//! };
//!
//! let results = calculate_phase1_to_6(&inputs);
//! assert!((results.footing_area_m2 - 4.6667).abs() < 1e-3);
//!
//! let volumes = calculate_phase8(&inputs, &results, &FootingVolumeInputs::similar(&inputs, 3)).unwrap();
//! assert!((volumes.total_volume_m3 - 4.752).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::LookupTables;
use crate::units::{CubicMeters, KnPerSqM, Meters, SqMeters};

/// Length : width ratio of rectangular footings
pub const RECTANGULAR_ASPECT_RATIO: f64 = 1.2;

/// Blinding overhang on both sides combined (m), 0.10 m per side
pub const BLINDING_CLEARANCE_M: f64 = 0.20;

/// Plan shape of the footing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootingShape {
    #[default]
    Square,
    Rectangular,
}

impl FootingShape {
    pub const ALL: [FootingShape; 2] = [FootingShape::Square, FootingShape::Rectangular];

    pub fn name(&self) -> &'static str {
        match self {
            FootingShape::Square => "square",
            FootingShape::Rectangular => "rectangular",
        }
    }
}

impl std::fmt::Display for FootingShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for FootingShape {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(FootingShape::Square),
            "rectangular" => Ok(FootingShape::Rectangular),
            other => Err(CalcError::invalid_input(
                "footing_shape",
                other,
                "Expected 'square' or 'rectangular'",
            )),
        }
    }
}

/// Inputs for footing sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "blinding_length_m": 2.4,
///   "blinding_width_m": 2.0,
///   "blinding_height_m": 0.1,
///   "floors": 2,
///   "slab_area_m2": 100.0,
///   "soil_type": "clay",
///   "building_type": "residential",
///   "footing_height_m": 0.4,
///   "footing_shape": "rectangular"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    /// Blinding (lean concrete) slab length in meters
    pub blinding_length_m: f64,

    /// Blinding slab width in meters
    pub blinding_width_m: f64,

    /// Blinding slab thickness in meters
    pub blinding_height_m: f64,

    /// Number of stories carried by the footing
    pub floors: u32,

    /// Gross floor plate area in m²
    pub slab_area_m2: f64,

    /// Key into the soil capacity table (e.g. "clay")
    pub soil_type: String,

    /// Key into the building load table (e.g. "residential")
    pub building_type: String,

    /// Footing depth in meters, shared by all footings when they are similar
    pub footing_height_m: f64,

    pub footing_shape: FootingShape,
}

impl CalculatorInputs {
    /// Validate input parameters.
    ///
    /// The calculators never call this; it is for form and API layers that
    /// want to reject bad input before computing.
    pub fn validate(&self) -> CalcResult<()> {
        positive("blinding_length_m", self.blinding_length_m, "Blinding length must be positive")?;
        positive("blinding_width_m", self.blinding_width_m, "Blinding width must be positive")?;
        positive("blinding_height_m", self.blinding_height_m, "Blinding height must be positive")?;
        positive("slab_area_m2", self.slab_area_m2, "Slab area must be positive")?;

        if self.floors == 0 {
            return Err(CalcError::invalid_input(
                "floors",
                self.floors.to_string(),
                "Building must have at least one floor",
            ));
        }
        if !self.footing_height_m.is_finite() || self.footing_height_m < 0.0 {
            return Err(CalcError::invalid_input(
                "footing_height_m",
                self.footing_height_m.to_string(),
                "Footing height cannot be negative",
            ));
        }
        if self.soil_type.is_empty() {
            return Err(CalcError::missing_field("soil_type"));
        }
        if self.building_type.is_empty() {
            return Err(CalcError::missing_field("building_type"));
        }
        Ok(())
    }

    /// Blinding volume L × W × H (m³)
    pub fn blinding_volume_m3(&self) -> f64 {
        self.blinding_length_m * self.blinding_width_m * self.blinding_height_m
    }
}

/// Results of phases 1 to 6.
///
/// ## JSON Example
///
/// ```json
/// {
///   "blinding_volume_m3": 0.48,
///   "dead_load_kpa": 2.0,
///   "live_load_kpa": 1.5,
///   "total_loads_kpa": 3.5,
///   "soil_capacity_kpa": 150.0,
///   "total_load_on_footing_kn": 700.0,
///   "footing_area_m2": 4.6667,
///   "calculated_footing_length_m": 2.1602,
///   "calculated_footing_width_m": 2.1602
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResults {
    /// Blinding (lean concrete) volume (m³)
    pub blinding_volume_m3: f64,

    /// Dead area load (kN/m²)
    pub dead_load_kpa: f64,

    /// Live area load (kN/m²)
    pub live_load_kpa: f64,

    /// Dead + live (kN/m²)
    pub total_loads_kpa: f64,

    /// Allowable soil bearing capacity (kN/m²)
    pub soil_capacity_kpa: f64,

    /// slab area × floors × total loads (kN)
    pub total_load_on_footing_kn: f64,

    /// Required bearing area (m²)
    pub footing_area_m2: f64,

    pub calculated_footing_length_m: f64,

    pub calculated_footing_width_m: f64,
}

impl CalculatorResults {
    /// True when every value is finite and the footing has a positive size.
    ///
    /// Bad inputs surface here as NaN, infinity or non-positive dimensions.
    pub fn is_valid(&self) -> bool {
        let values = [
            self.blinding_volume_m3,
            self.dead_load_kpa,
            self.live_load_kpa,
            self.total_loads_kpa,
            self.soil_capacity_kpa,
            self.total_load_on_footing_kn,
            self.footing_area_m2,
            self.calculated_footing_length_m,
            self.calculated_footing_width_m,
        ];
        values.iter().all(|v| v.is_finite())
            && self.footing_area_m2 > 0.0
            && self.calculated_footing_length_m > 0.0
            && self.calculated_footing_width_m > 0.0
    }
}

/// Footing plan dimensions `(length, width)` for a required bearing area.
///
/// A negative area yields NaN dimensions.
pub fn footing_dimensions(footing_area: SqMeters, shape: FootingShape) -> (Meters, Meters) {
    match shape {
        FootingShape::Rectangular => {
            let width = (footing_area.value() / RECTANGULAR_ASPECT_RATIO).sqrt();
            (Meters(width * RECTANGULAR_ASPECT_RATIO), Meters(width))
        }
        FootingShape::Square => {
            let side = footing_area.value().sqrt();
            (Meters(side), Meters(side))
        }
    }
}

/// Phases 1 to 6 against the standard lookup tables.
pub fn calculate_phase1_to_6(inputs: &CalculatorInputs) -> CalculatorResults {
    calculate_phase1_to_6_with(inputs, LookupTables::standard())
}

/// Phases 1 to 6 against the given lookup tables.
///
/// 1. Blinding volume = L × W × H
/// 2. Dead/live loads from the building table, summed
/// 3. Bearing capacity from the soil table
/// 4. Total load = slab area × floors × total loads
/// 5. Footing area = total load / bearing capacity (unguarded division)
/// 6. Plan dimensions from the area and shape
pub fn calculate_phase1_to_6_with(inputs: &CalculatorInputs, tables: &LookupTables) -> CalculatorResults {
    let _span = tracing::info_span!(
        "calculate_phase1_to_6",
        building_type = %inputs.building_type,
        soil_type = %inputs.soil_type
    )
    .entered();

    // Phase 1
    let blinding_volume_m3 = inputs.blinding_volume_m3();

    // Phases 2-3
    let loads = tables.load_for(&inputs.building_type).value;
    let total_loads = KnPerSqM(loads.total());
    let soil_capacity = KnPerSqM(tables.soil_capacity_for(&inputs.soil_type).value);

    // Phase 4
    let loaded_area = SqMeters(inputs.slab_area_m2 * f64::from(inputs.floors));
    let total_load_on_footing = total_loads.over(loaded_area);

    // Phase 5
    let footing_area = total_load_on_footing.required_area(soil_capacity);

    // Phase 6
    let (length, width) = footing_dimensions(footing_area, inputs.footing_shape);

    tracing::debug!(
        dead = loads.dead,
        live = loads.live,
        soil_capacity = soil_capacity.value(),
        total_load_kn = total_load_on_footing.value(),
        footing_area_m2 = footing_area.value(),
        length_m = length.value(),
        width_m = width.value(),
        "footing sized"
    );

    let results = CalculatorResults {
        blinding_volume_m3,
        dead_load_kpa: loads.dead,
        live_load_kpa: loads.live,
        total_loads_kpa: total_loads.value(),
        soil_capacity_kpa: soil_capacity.value(),
        total_load_on_footing_kn: total_load_on_footing.value(),
        footing_area_m2: footing_area.value(),
        calculated_footing_length_m: length.value(),
        calculated_footing_width_m: width.value(),
    };

    if !results.is_valid() {
        tracing::warn!(footing_area_m2 = results.footing_area_m2, "footing size is not a usable number");
    }

    results
}

/// Heights of the footings being poured.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "similar", "footing_height_m": 0.4 }
/// { "kind": "different", "individual_heights_m": [0.3, 0.4, 0.5] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FootingHeights {
    /// Every footing has the same height
    Similar { footing_height_m: f64 },
    /// One height per footing, in order
    Different { individual_heights_m: Vec<f64> },
}

/// Inputs for footing concrete volumes (phase 8).
///
/// The blinding dimensions duplicate the ones in [`CalculatorInputs`]; use
/// [`FootingVolumeInputs::similar`] or [`FootingVolumeInputs::different`] to
/// copy them from the base inputs.
///
/// ## JSON Example
///
/// ```json
/// {
///   "blinding_length_m": 2.4,
///   "blinding_width_m": 2.0,
///   "number_of_footings": 3,
///   "heights": { "kind": "similar", "footing_height_m": 0.4 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingVolumeInputs {
    pub blinding_length_m: f64,
    pub blinding_width_m: f64,
    pub number_of_footings: u32,
    pub heights: FootingHeights,
}

impl FootingVolumeInputs {
    /// `number_of_footings` identical footings at the base inputs' footing height.
    pub fn similar(base: &CalculatorInputs, number_of_footings: u32) -> Self {
        FootingVolumeInputs {
            blinding_length_m: base.blinding_length_m,
            blinding_width_m: base.blinding_width_m,
            number_of_footings,
            heights: FootingHeights::Similar {
                footing_height_m: base.footing_height_m,
            },
        }
    }

    /// One footing per entry of `heights`.
    pub fn different(base: &CalculatorInputs, heights: Vec<f64>) -> Self {
        FootingVolumeInputs {
            blinding_length_m: base.blinding_length_m,
            blinding_width_m: base.blinding_width_m,
            number_of_footings: u32::try_from(heights.len()).unwrap_or(u32::MAX),
            heights: FootingHeights::Different {
                individual_heights_m: heights,
            },
        }
    }

    pub fn are_similar(&self) -> bool {
        matches!(self.heights, FootingHeights::Similar { .. })
    }

    /// Footing plan: blinding dimensions minus the clearance.
    pub fn footing_plan(&self) -> (Meters, Meters) {
        (
            Meters(self.blinding_length_m - BLINDING_CLEARANCE_M),
            Meters(self.blinding_width_m - BLINDING_CLEARANCE_M),
        )
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.blinding_length_m > BLINDING_CLEARANCE_M) {
            return Err(CalcError::invalid_input(
                "blinding_length_m",
                self.blinding_length_m.to_string(),
                format!("Blinding length must exceed the {} m clearance", BLINDING_CLEARANCE_M),
            ));
        }
        if !(self.blinding_width_m > BLINDING_CLEARANCE_M) {
            return Err(CalcError::invalid_input(
                "blinding_width_m",
                self.blinding_width_m.to_string(),
                format!("Blinding width must exceed the {} m clearance", BLINDING_CLEARANCE_M),
            ));
        }
        if self.number_of_footings == 0 {
            return Err(CalcError::invalid_input(
                "number_of_footings",
                "0",
                "At least one footing is required",
            ));
        }

        match &self.heights {
            FootingHeights::Similar { footing_height_m } => {
                positive("footing_height_m", *footing_height_m, "Footing height must be positive")?;
            }
            FootingHeights::Different { individual_heights_m } => {
                check_height_count(self.number_of_footings, individual_heights_m)?;
                for (i, height) in individual_heights_m.iter().enumerate() {
                    positive(
                        format!("individual_heights_m[{}]", i),
                        *height,
                        "Footing height must be positive",
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Footing concrete volumes.
///
/// `individual_volumes_m3` is present only for footings of different heights
/// and lines up index for index with the heights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingVolumeResult {
    pub total_volume_m3: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_volumes_m3: Option<Vec<f64>>,
}

/// Phase 8: concrete volume of the footings.
///
/// `_results` is accepted for symmetry with the sizing call; volumes are
/// computed from the blinding plan (minus [`BLINDING_CLEARANCE_M`]), not
/// from the phase 6 dimensions.
///
/// # Returns
///
/// * `Ok(FootingVolumeResult)` - Volumes. An empty list of different
///   heights gives a zero total and no individual volumes.
/// * `Err(CalcError::CountMismatch)` - A non-empty list of heights whose
///   length differs from `number_of_footings`
pub fn calculate_phase8(
    base: &CalculatorInputs,
    _results: &CalculatorResults,
    footing: &FootingVolumeInputs,
) -> CalcResult<FootingVolumeResult> {
    let _span = tracing::info_span!("calculate_phase8", footings = footing.number_of_footings).entered();

    if footing.blinding_length_m != base.blinding_length_m || footing.blinding_width_m != base.blinding_width_m {
        tracing::warn!(
            base_length_m = base.blinding_length_m,
            base_width_m = base.blinding_width_m,
            footing_length_m = footing.blinding_length_m,
            footing_width_m = footing.blinding_width_m,
            "blinding dimensions differ from the sizing inputs; using the volume inputs"
        );
    }

    let (length, width) = footing.footing_plan();
    let area = length.by(width);

    match &footing.heights {
        FootingHeights::Similar { footing_height_m } => {
            let vol_one = area.extrude(Meters(*footing_height_m));
            let total = vol_one * f64::from(footing.number_of_footings);
            tracing::debug!(area_m2 = area.value(), vol_one_m3 = vol_one.value(), total_m3 = total.value(), "similar footings");

            Ok(FootingVolumeResult {
                total_volume_m3: total.value(),
                individual_volumes_m3: None,
            })
        }
        FootingHeights::Different { individual_heights_m } => {
            if individual_heights_m.is_empty() {
                return Ok(FootingVolumeResult {
                    total_volume_m3: 0.0,
                    individual_volumes_m3: Some(Vec::new()),
                });
            }
            check_height_count(footing.number_of_footings, individual_heights_m)?;

            let mut total = CubicMeters(0.0);
            let mut volumes = Vec::with_capacity(individual_heights_m.len());
            for height in individual_heights_m {
                let volume = area.extrude(Meters(*height));
                total = total + volume;
                volumes.push(volume.value());
            }
            tracing::debug!(area_m2 = area.value(), total_m3 = total.value(), "different footings");

            Ok(FootingVolumeResult {
                total_volume_m3: total.value(),
                individual_volumes_m3: Some(volumes),
            })
        }
    }
}

/// A labelled sizing + volume calculation, the unit stored in a project.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "F-1",
///   "inputs": { "blinding_length_m": 2.4, "...": "..." },
///   "volume": { "blinding_length_m": 2.4, "blinding_width_m": 2.0, "number_of_footings": 3,
///               "heights": { "kind": "similar", "footing_height_m": 0.4 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingCalculation {
    /// User label (e.g. "F-1", "Grid A footings")
    pub label: String,
    pub inputs: CalculatorInputs,
    pub volume: FootingVolumeInputs,
}

/// Output of [`FootingCalculation::run`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingOutcome {
    pub label: String,
    /// Footings poured, as declared in the volume inputs
    pub footing_count: u32,
    pub results: CalculatorResults,
    pub volumes: FootingVolumeResult,
}

impl FootingCalculation {
    pub fn new(label: impl Into<String>, inputs: CalculatorInputs, volume: FootingVolumeInputs) -> Self {
        FootingCalculation {
            label: label.into(),
            inputs,
            volume,
        }
    }

    /// Validate both the sizing and the volume inputs.
    pub fn validate(&self) -> CalcResult<()> {
        self.inputs.validate()?;
        self.volume.validate()
    }

    /// Run phases 1-6 then phase 8.
    pub fn run(&self, tables: &LookupTables) -> CalcResult<FootingOutcome> {
        let results = calculate_phase1_to_6_with(&self.inputs, tables);
        let volumes = calculate_phase8(&self.inputs, &results, &self.volume)?;
        Ok(FootingOutcome {
            label: self.label.clone(),
            footing_count: self.volume.number_of_footings,
            results,
            volumes,
        })
    }
}

fn positive(field: impl Into<String>, value: f64, reason: &str) -> CalcResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

fn check_height_count(expected: u32, heights: &[f64]) -> CalcResult<()> {
    if usize::try_from(expected).map_or(true, |n| n != heights.len()) {
        return Err(CalcError::CountMismatch {
            expected,
            actual: heights.len(),
        });
    }
    Ok(())
}
