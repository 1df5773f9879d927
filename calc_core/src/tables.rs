//! # Load and Soil Lookup Tables
//!
//! Categorical inputs (building type, soil type) are mapped to numeric
//! coefficients through closed-world lookup tables. Every table carries an
//! `other` entry, checked when the table is built, so a lookup can never
//! fail: unknown keys resolve to the `other` entry.
//!
//! Keys match exactly. There is no case folding and no partial matching.
//!
//! ## Units
//!
//! Both tables use kN/m²: dead/live loads are per unit of floor area and
//! per floor, bearing capacity is per unit of footing area.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::tables::LookupTables;
//!
//! let tables = LookupTables::standard();
//! let loads = tables.load_for("residential").value;
//! assert_eq!(loads.total(), 3.5);
//!
//! // Unknown keys fall back to "other"
//! let soil = tables.soil_capacity_for("peat");
//! assert!(soil.fell_back);
//! assert_eq!(soil.value, tables.soil_capacity_for("other").value);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Key of the mandatory fallback entry in every table
pub const FALLBACK_KEY: &str = "other";

/// Dead and live area-load coefficients for one building type (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadCoefficients {
    /// Dead load (self-weight of structure, finishes, partitions)
    pub dead: f64,
    /// Live load (occupancy)
    pub live: f64,
}

impl LoadCoefficients {
    pub const fn new(dead: f64, live: f64) -> Self {
        LoadCoefficients { dead, live }
    }

    /// Combined dead + live coefficient
    pub fn total(&self) -> f64 {
        self.dead + self.live
    }
}

/// Allowable soil bearing capacity (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearingCapacity(pub f64);

impl BearingCapacity {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// A value that can be stored in a [`LookupTable`].
pub trait TableEntry: Copy + fmt::Debug {
    /// Table name used in error messages and log fields
    const TABLE: &'static str;

    /// Reject coefficients that can never be meaningful (NaN, infinite)
    fn check(&self) -> Result<(), String>;
}

impl TableEntry for LoadCoefficients {
    const TABLE: &'static str = "building";

    fn check(&self) -> Result<(), String> {
        if !self.dead.is_finite() || !self.live.is_finite() {
            return Err(format!("non-finite load coefficients {:?}", self));
        }
        Ok(())
    }
}

impl TableEntry for BearingCapacity {
    const TABLE: &'static str = "soil";

    // Zero is accepted: the sizing step divides by it and reports infinity.
    fn check(&self) -> Result<(), String> {
        if !self.0.is_finite() {
            return Err(format!("non-finite bearing capacity {}", self.0));
        }
        Ok(())
    }
}

/// Result of a table lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    /// True when the key was not in the table and `other` was used
    pub fell_back: bool,
}

/// Immutable key → coefficient map that always contains [`FALLBACK_KEY`].
///
/// Serializes as a plain map; deserializing re-checks the fallback entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, T>",
    into = "BTreeMap<String, T>",
    bound(
        serialize = "T: TableEntry + Serialize",
        deserialize = "T: TableEntry + Deserialize<'de>"
    )
)]
pub struct LookupTable<T> {
    entries: BTreeMap<String, T>,
    fallback: T,
}

/// Building type → dead/live loads
pub type LoadTable = LookupTable<LoadCoefficients>;

/// Soil type → bearing capacity
pub type SoilTable = LookupTable<BearingCapacity>;

impl<T: TableEntry> LookupTable<T> {
    /// Build a table, failing if the `other` entry is missing or any value is malformed.
    pub fn new(entries: BTreeMap<String, T>) -> CalcResult<Self> {
        for (key, value) in &entries {
            value
                .check()
                .map_err(|reason| CalcError::invalid_table(T::TABLE, format!("entry '{}': {}", key, reason)))?;
        }

        let fallback = *entries.get(FALLBACK_KEY).ok_or_else(|| {
            CalcError::invalid_table(T::TABLE, format!("missing required '{}' entry", FALLBACK_KEY))
        })?;

        Ok(LookupTable { entries, fallback })
    }

    /// Look up `key`, falling back to the `other` entry.
    pub fn resolve(&self, key: &str) -> Resolved<T> {
        match self.entries.get(key) {
            Some(value) => Resolved {
                value: *value,
                fell_back: false,
            },
            None => {
                tracing::warn!(table = T::TABLE, key, "unknown key, using '{}' entry", FALLBACK_KEY);
                Resolved {
                    value: self.fallback,
                    fell_back: true,
                }
            }
        }
    }

    /// Exact lookup without fallback
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    /// The `other` entry
    pub fn fallback(&self) -> T {
        self.fallback
    }

    /// All keys in sorted order (for dropdowns and listings)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: TableEntry> TryFrom<BTreeMap<String, T>> for LookupTable<T> {
    type Error = CalcError;

    fn try_from(entries: BTreeMap<String, T>) -> Result<Self, Self::Error> {
        LookupTable::new(entries)
    }
}

impl<T> From<LookupTable<T>> for BTreeMap<String, T> {
    fn from(table: LookupTable<T>) -> Self {
        table.entries
    }
}

/// The pair of tables the sizing engine resolves against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    pub building: LoadTable,
    pub soil: SoilTable,
}

/// Unvalidated table file layout, checked by [`LookupTables::from_toml_str`]
#[derive(Deserialize)]
struct RawTables {
    building: BTreeMap<String, LoadCoefficients>,
    soil: BTreeMap<String, BearingCapacity>,
}

const OTHER_LOADS: LoadCoefficients = LoadCoefficients::new(2.0, 2.0);
const OTHER_SOIL: f64 = 150.0;

const STANDARD_BUILDING: [(&str, LoadCoefficients); 8] = [
    ("residential", LoadCoefficients::new(2.0, 1.5)),
    ("commercial", LoadCoefficients::new(2.5, 3.0)),
    ("office", LoadCoefficients::new(2.5, 2.5)),
    ("educational", LoadCoefficients::new(2.5, 3.0)),
    ("hospital", LoadCoefficients::new(3.0, 3.0)),
    ("industrial", LoadCoefficients::new(3.5, 5.0)),
    ("warehouse", LoadCoefficients::new(3.0, 6.0)),
    (FALLBACK_KEY, OTHER_LOADS),
];

const STANDARD_SOIL: [(&str, f64); 6] = [
    ("clay", 150.0),
    ("silt", 100.0),
    ("sand", 200.0),
    ("gravel", 300.0),
    ("rock", 1000.0),
    (FALLBACK_KEY, OTHER_SOIL),
];

static STANDARD: Lazy<LookupTables> = Lazy::new(|| {
    let building: BTreeMap<String, LoadCoefficients> = STANDARD_BUILDING
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();
    let soil: BTreeMap<String, BearingCapacity> = STANDARD_SOIL
        .iter()
        .map(|(k, v)| (k.to_string(), BearingCapacity(*v)))
        .collect();

    LookupTables {
        building: LookupTable {
            entries: building,
            fallback: OTHER_LOADS,
        },
        soil: LookupTable {
            entries: soil,
            fallback: BearingCapacity(OTHER_SOIL),
        },
    }
});

impl LookupTables {
    /// Build from two validated tables
    pub fn new(building: LoadTable, soil: SoilTable) -> Self {
        LookupTables { building, soil }
    }

    /// The built-in tables, initialized once and shared process-wide.
    pub fn standard() -> &'static LookupTables {
        &STANDARD
    }

    /// Parse custom tables from TOML.
    ///
    /// ```toml
    /// [building.residential]
    /// dead = 2.0
    /// live = 1.5
    ///
    /// [building.other]
    /// dead = 2.0
    /// live = 2.0
    ///
    /// [soil]
    /// clay = 150.0
    /// other = 150.0
    /// ```
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let raw: RawTables = toml::from_str(source).map_err(|e| CalcError::serialization(e.to_string()))?;
        Ok(LookupTables {
            building: LookupTable::new(raw.building)?,
            soil: LookupTable::new(raw.soil)?,
        })
    }

    /// Read and parse a TOML table file.
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read tables", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&source)
    }

    /// Resolve a building type to its dead/live coefficients.
    pub fn load_for(&self, building_type: &str) -> Resolved<LoadCoefficients> {
        self.building.resolve(building_type)
    }

    /// Resolve a soil type to its bearing capacity (kN/m²).
    pub fn soil_capacity_for(&self, soil_type: &str) -> Resolved<f64> {
        let resolved = self.soil.resolve(soil_type);
        Resolved {
            value: resolved.value.value(),
            fell_back: resolved.fell_back,
        }
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        LookupTables::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_contain_fallback() {
        let tables = LookupTables::standard();
        assert!(tables.building.get(FALLBACK_KEY).is_some());
        assert!(tables.soil.get(FALLBACK_KEY).is_some());
        assert_eq!(Some(&tables.building.fallback()), tables.building.get(FALLBACK_KEY));
        assert_eq!(Some(&tables.soil.fallback()), tables.soil.get(FALLBACK_KEY));
    }

    #[test]
    fn test_residential_and_clay() {
        let tables = LookupTables::standard();
        let loads = tables.load_for("residential");
        assert!(!loads.fell_back);
        assert_eq!(loads.value.total(), 3.5);

        let soil = tables.soil_capacity_for("clay");
        assert!(!soil.fell_back);
        assert_eq!(soil.value, 150.0);
    }

    #[test]
    fn test_unknown_key_matches_other() {
        let tables = LookupTables::standard();
        let unknown = tables.load_for("spaceport");
        let other = tables.load_for("other");
        assert!(unknown.fell_back);
        assert!(!other.fell_back);
        assert_eq!(unknown.value, other.value);

        assert_eq!(
            tables.soil_capacity_for("permafrost").value,
            tables.soil_capacity_for("other").value
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let tables = LookupTables::standard();
        assert!(tables.load_for("Residential").fell_back);
        assert!(tables.soil_capacity_for(" clay").fell_back);
    }

    #[test]
    fn test_table_without_fallback_is_rejected() {
        let mut entries = BTreeMap::new();
        entries.insert("clay".to_string(), BearingCapacity(150.0));
        let err = SoilTable::new(entries).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TABLE");
        assert!(err.to_string().contains("soil"));
    }

    #[test]
    fn test_non_finite_entry_is_rejected() {
        let mut entries = BTreeMap::new();
        entries.insert("other".to_string(), LoadCoefficients::new(f64::NAN, 1.0));
        assert!(LoadTable::new(entries).is_err());
    }

    #[test]
    fn test_zero_capacity_is_accepted() {
        let mut entries = BTreeMap::new();
        entries.insert("other".to_string(), BearingCapacity(0.0));
        let table = SoilTable::new(entries).unwrap();
        assert_eq!(table.fallback().value(), 0.0);
    }

    #[test]
    fn test_from_toml() {
        let source = r#"
            [building.residential]
            dead = 1.0
            live = 1.0

            [building.other]
            dead = 3.0
            live = 3.0

            [soil]
            clay = 120.0
            other = 90.0
        "#;
        let tables = LookupTables::from_toml_str(source).unwrap();
        assert_eq!(tables.load_for("residential").value.total(), 2.0);
        assert_eq!(tables.load_for("hospital").value.total(), 6.0);
        assert_eq!(tables.soil_capacity_for("sand").value, 90.0);
        assert_eq!(tables.building.len(), 2);
    }

    #[test]
    fn test_from_toml_missing_fallback() {
        let source = r#"
            [building.other]
            dead = 3.0
            live = 3.0

            [soil]
            clay = 120.0
        "#;
        let err = LookupTables::from_toml_str(source).unwrap_err();
        assert!(matches!(err, CalcError::InvalidTable { ref table, .. } if table == "soil"));
    }

    #[test]
    fn test_json_roundtrip_revalidates() {
        let tables = LookupTables::standard();
        let json = serde_json::to_string(tables).unwrap();
        let roundtrip: LookupTables = serde_json::from_str(&json).unwrap();
        assert_eq!(&roundtrip, tables);

        let broken = r#"{"building":{"other":{"dead":1.0,"live":1.0}},"soil":{"clay":100.0}}"#;
        assert!(serde_json::from_str::<LookupTables>(broken).is_err());
    }

    #[test]
    fn test_keys_sorted() {
        let keys: Vec<_> = LookupTables::standard().soil.keys().collect();
        assert_eq!(keys, vec!["clay", "gravel", "other", "rock", "sand", "silt"]);
    }
}
