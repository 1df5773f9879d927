//! # Project Data Structures
//!
//! The `Project` struct is the root container for footing calculations.
//! Projects serialize to `.ftg` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (pricing, optional custom lookup tables)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::CalculationItem;
use crate::calculations::footing::FootingOutcome;
use crate::config::EngineConfig;
use crate::errors::CalcResult;
use crate::report::PricingConfig;
use crate::tables::LookupTables;

/// Current schema version for .ftg files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map so they keep stable ids when
/// the list is reordered or filtered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,
    pub settings: GlobalSettings,
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Lookup tables in effect: the project's custom tables, else the standard ones.
    pub fn tables(&self) -> &LookupTables {
        self.settings
            .tables
            .as_ref()
            .unwrap_or_else(|| LookupTables::standard())
    }

    /// Run every calculation, sorted by label.
    ///
    /// Each item is validated before it runs; the first invalid item fails
    /// the whole run.
    pub fn run_all(&self) -> CalcResult<Vec<(Uuid, FootingOutcome)>> {
        let tables = self.tables();
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label().cmp(b.1.label()));

        items
            .into_iter()
            .map(|(id, item)| match item {
                CalculationItem::Footing(calc) => {
                    calc.validate()?;
                    calc.run(tables).map(|outcome| (*id, outcome))
                }
            })
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Unit prices and waste factor for quantity reports
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Project-specific load/soil tables; `None` uses the standard tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<LookupTables>,
}

impl GlobalSettings {
    /// Settings for a new project: the config's pricing and its custom
    /// tables, if any. The tables are copied into the project file.
    pub fn from_config(config: &EngineConfig) -> CalcResult<Self> {
        Ok(GlobalSettings {
            pricing: config.pricing.clone(),
            tables: config.custom_tables()?,
        })
    }
}
