//! Which insert categories run, and at what cadence.

use crate::insert::{TableDescriptor, BIGTABLE_TABLES, MAIN_TABLES, TIMESTAMP_TABLES};
use crate::worker::ErrorPolicy;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::time::Duration;

/// A named group of insert behaviour that is enabled or disabled as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertCategory {
    Timestamp,
    BigTable,
    MainTables,
}

impl InsertCategory {
    pub const ALL: [InsertCategory; 3] = [
        InsertCategory::Timestamp,
        InsertCategory::BigTable,
        InsertCategory::MainTables,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InsertCategory::Timestamp => "timestamp",
            InsertCategory::BigTable => "bigtable",
            InsertCategory::MainTables => "main-tables",
        }
    }

    /// Tables that get one worker each when this category is enabled.
    pub fn tables(&self) -> &'static [TableDescriptor] {
        match self {
            InsertCategory::Timestamp => TIMESTAMP_TABLES,
            InsertCategory::BigTable => BIGTABLE_TABLES,
            InsertCategory::MainTables => MAIN_TABLES,
        }
    }
}

impl fmt::Display for InsertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shortest wait before retrying a failed insert.
pub const MIN_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Settings for one category.
///
/// Missing fields default to a disabled category with no interval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Seconds to wait after each completed insert. Zero or absent means
    /// back-to-back inserts.
    #[serde(default)]
    pub every_n_seconds: Option<u64>,

    /// When set, a failed insert is retried after this many seconds instead
    /// of stopping the worker. Values below [`MIN_RETRY_DELAY`] are raised to it.
    #[serde(default)]
    pub retry_after_seconds: Option<u64>,
}

impl CategoryConfig {
    pub fn enabled(every_n_seconds: u64) -> Self {
        Self {
            enabled: true,
            every_n_seconds: Some(every_n_seconds),
            retry_after_seconds: None,
        }
    }

    /// The wait between iterations, `None` for back-to-back execution.
    pub fn interval(&self) -> Option<Duration> {
        self.every_n_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        match self.retry_after_seconds {
            Some(secs) => {
                ErrorPolicy::RetryAfter(Duration::from_secs(secs).max(MIN_RETRY_DELAY))
            }
            None => ErrorPolicy::Stop,
        }
    }
}

/// Data flavour for the main tables. Only random payloads are implemented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MainTablesMode {
    #[default]
    GibberishData,
}

// Mode names are matched case-insensitively.
impl<'de> Deserialize<'de> for MainTablesMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mode = String::deserialize(deserializer)?;
        match mode.trim().to_lowercase().as_str() {
            "gibberish-data" => Ok(MainTablesMode::GibberishData),
            _ => Err(serde::de::Error::custom(format!(
                "invalid main_tables_inserts.mode '{mode}', must be one of [gibberish-data]"
            ))),
        }
    }
}

/// Main-tables settings: a regular category plus its data mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MainTablesConfig {
    #[serde(flatten)]
    pub category: CategoryConfig,

    #[serde(default)]
    pub mode: Option<MainTablesMode>,
}

/// The `inserter` section of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InserterConfiguration {
    #[serde(default, rename = "timestamp_inserts")]
    pub timestamp: CategoryConfig,

    #[serde(default, rename = "bigtable_inserts")]
    pub bigtable: CategoryConfig,

    #[serde(default, rename = "main_tables_inserts")]
    pub main_tables: MainTablesConfig,
}

impl InserterConfiguration {
    pub fn category(&self, category: InsertCategory) -> &CategoryConfig {
        match category {
            InsertCategory::Timestamp => &self.timestamp,
            InsertCategory::BigTable => &self.bigtable,
            InsertCategory::MainTables => &self.main_tables.category,
        }
    }

    pub fn category_mut(&mut self, category: InsertCategory) -> &mut CategoryConfig {
        match category {
            InsertCategory::Timestamp => &mut self.timestamp,
            InsertCategory::BigTable => &mut self.bigtable,
            InsertCategory::MainTables => &mut self.main_tables.category,
        }
    }

    /// Builder-style helper to set one category.
    pub fn with(mut self, category: InsertCategory, config: CategoryConfig) -> Self {
        *self.category_mut(category) = config;
        self
    }

    pub fn enabled_categories(&self) -> Vec<InsertCategory> {
        InsertCategory::ALL
            .into_iter()
            .filter(|c| self.category(*c).enabled)
            .collect()
    }
}
