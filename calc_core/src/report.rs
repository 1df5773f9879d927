//! # Concrete Quantity Report
//!
//! Turns a [`FootingOutcome`] into line items a cost report can consume:
//! lean concrete for the blinding pads and structural concrete for the
//! footings, each with net volume, order volume (waste applied) and cost
//! when a unit price is configured.
//!
//! Every footing sits on its own blinding pad, so the blinding line is the
//! phase 1 pad volume times the footing count.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::footing::{CalculatorInputs, FootingCalculation, FootingShape, FootingVolumeInputs};
//! use calc_core::report::{PricingConfig, QuantityReport};
//! use calc_core::tables::LookupTables;
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
//! let calc = FootingCalculation::new("F-1", inputs.clone(), FootingVolumeInputs::similar(&inputs, 3));
//! let outcome = calc.run(LookupTables::standard()).unwrap();
//!
//! let report = QuantityReport::build(&outcome, &PricingConfig::default()).unwrap();
//! assert_eq!(report.lines.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::footing::FootingOutcome;
use crate::errors::{CalcError, CalcResult};
use crate::units::{CubicMeters, CubicYards};

/// Unit prices and waste allowance for concrete takeoffs.
///
/// ## TOML Example
///
/// ```toml
/// [pricing]
/// currency = "USD"
/// lean_concrete_per_m3 = 95.0
/// structural_concrete_per_m3 = 140.0
/// waste_factor = 0.05
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Currency label printed next to costs
    pub currency: String,

    /// Lean concrete (blinding) unit price per m³
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_concrete_per_m3: Option<f64>,

    /// Structural concrete (footings) unit price per m³
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_concrete_per_m3: Option<f64>,

    /// Extra fraction ordered on top of the net volume (0.05 = 5%)
    pub waste_factor: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            currency: "USD".to_string(),
            lean_concrete_per_m3: None,
            structural_concrete_per_m3: None,
            waste_factor: 0.05,
        }
    }
}

impl PricingConfig {
    /// Validate pricing parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.waste_factor.is_finite() || self.waste_factor < 0.0 {
            return Err(CalcError::invalid_input(
                "waste_factor",
                self.waste_factor.to_string(),
                "Waste factor must be zero or positive",
            ));
        }
        let prices = [
            ("lean_concrete_per_m3", self.lean_concrete_per_m3),
            ("structural_concrete_per_m3", self.structural_concrete_per_m3),
        ];
        for (field, price) in prices {
            if let Some(price) = price {
                if !price.is_finite() || price < 0.0 {
                    return Err(CalcError::invalid_input(field, price.to_string(), "Price cannot be negative"));
                }
            }
        }
        Ok(())
    }
}

/// What a report line measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Lean concrete under the footings
    Blinding,
    /// Structural footing concrete
    Footing,
}

impl LineKind {
    pub fn description(&self) -> &'static str {
        match self {
            LineKind::Blinding => "Blinding (lean concrete)",
            LineKind::Footing => "Footing concrete",
        }
    }
}

/// One line of the takeoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub kind: LineKind,
    pub description: String,
    /// Volume as calculated
    pub net_m3: CubicMeters,
    /// Volume to order, waste included
    pub order_m3: CubicMeters,
    pub order_yd3: CubicYards,
    pub unit_price: Option<f64>,
    pub cost: Option<f64>,
}

impl ReportLine {
    fn new(kind: LineKind, net: CubicMeters, pricing: &PricingConfig, unit_price: Option<f64>) -> Self {
        let order = net * (1.0 + pricing.waste_factor);
        ReportLine {
            kind,
            description: kind.description().to_string(),
            net_m3: net,
            order_m3: order,
            order_yd3: order.into(),
            unit_price,
            cost: unit_price.map(|price| order.value() * price),
        }
    }
}

/// Concrete takeoff for one footing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityReport {
    pub label: String,
    pub currency: String,
    pub lines: Vec<ReportLine>,
    pub total_net_m3: CubicMeters,
    pub total_order_m3: CubicMeters,
    /// Sum of priced lines, `None` when nothing is priced
    pub total_cost: Option<f64>,
}

impl QuantityReport {
    /// Build the takeoff for a calculated footing group.
    pub fn build(outcome: &FootingOutcome, pricing: &PricingConfig) -> CalcResult<Self> {
        pricing.validate()?;

        let blinding = CubicMeters(outcome.results.blinding_volume_m3) * f64::from(outcome.footing_count);
        let footing = CubicMeters(outcome.volumes.total_volume_m3);

        let lines = vec![
            ReportLine::new(LineKind::Blinding, blinding, pricing, pricing.lean_concrete_per_m3),
            ReportLine::new(LineKind::Footing, footing, pricing, pricing.structural_concrete_per_m3),
        ];

        let priced: Vec<f64> = lines.iter().filter_map(|line| line.cost).collect();
        let total_cost = if priced.is_empty() {
            None
        } else {
            Some(priced.iter().sum())
        };

        tracing::debug!(label = %outcome.label, lines = lines.len(), "quantity report built");

        Ok(QuantityReport {
            label: outcome.label.clone(),
            currency: pricing.currency.clone(),
            total_net_m3: lines.iter().map(|line| line.net_m3).sum(),
            total_order_m3: lines.iter().map(|line| line.order_m3).sum(),
            lines,
            total_cost,
        })
    }

    /// Find a line by kind
    pub fn line(&self, kind: LineKind) -> Option<&ReportLine> {
        self.lines.iter().find(|line| line.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::footing::{CalculatorResults, FootingVolumeResult};

    fn test_outcome() -> FootingOutcome {
        FootingOutcome {
            label: "F-1".to_string(),
            footing_count: 3,
            results: CalculatorResults {
                blinding_volume_m3: 0.48,
                dead_load_kpa: 2.0,
                live_load_kpa: 1.5,
                total_loads_kpa: 3.5,
                soil_capacity_kpa: 150.0,
                total_load_on_footing_kn: 700.0,
                footing_area_m2: 700.0 / 150.0,
                calculated_footing_length_m: (700.0f64 / 150.0).sqrt(),
                calculated_footing_width_m: (700.0f64 / 150.0).sqrt(),
            },
            volumes: FootingVolumeResult {
                total_volume_m3: 4.752,
                individual_volumes_m3: None,
            },
        }
    }

    #[test]
    fn test_unpriced_report() {
        let report = QuantityReport::build(&test_outcome(), &PricingConfig::default()).unwrap();

        let blinding = report.line(LineKind::Blinding).unwrap();
        assert!((blinding.net_m3.value() - 1.44).abs() < 1e-9);
        assert!((blinding.order_m3.value() - 1.512).abs() < 1e-9);

        let footing = report.line(LineKind::Footing).unwrap();
        assert!((footing.net_m3.value() - 4.752).abs() < 1e-9);
        assert!(footing.cost.is_none());

        assert!((report.total_net_m3.value() - 6.192).abs() < 1e-9);
        assert!(report.total_cost.is_none());
    }

    #[test]
    fn test_priced_report() {
        let pricing = PricingConfig {
            currency: "EUR".to_string(),
            lean_concrete_per_m3: Some(100.0),
            structural_concrete_per_m3: Some(150.0),
            waste_factor: 0.0,
        };
        let report = QuantityReport::build(&test_outcome(), &pricing).unwrap();

        // 1.44 * 100 + 4.752 * 150
        assert!((report.total_cost.unwrap() - 856.8).abs() < 1e-6);
        assert_eq!(report.currency, "EUR");
        assert_eq!(report.total_net_m3, report.total_order_m3);
    }

    #[test]
    fn test_partially_priced_report() {
        let pricing = PricingConfig {
            structural_concrete_per_m3: Some(150.0),
            waste_factor: 0.0,
            ..PricingConfig::default()
        };
        let report = QuantityReport::build(&test_outcome(), &pricing).unwrap();
        assert!(report.line(LineKind::Blinding).unwrap().cost.is_none());
        assert!((report.total_cost.unwrap() - 712.8).abs() < 1e-6);
    }

    #[test]
    fn test_negative_waste_rejected() {
        let pricing = PricingConfig {
            waste_factor: -0.1,
            ..PricingConfig::default()
        };
        let err = QuantityReport::build(&test_outcome(), &pricing).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_pricing_defaults_from_partial_toml() {
        let pricing: PricingConfig = toml::from_str("structural_concrete_per_m3 = 120.0").unwrap();
        assert_eq!(pricing.structural_concrete_per_m3, Some(120.0));
        assert_eq!(pricing.waste_factor, 0.05);
        assert_eq!(pricing.currency, "USD");
    }
}
