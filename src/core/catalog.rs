//! Fund catalog records as supplied by a loader

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::debug;

/// A share or fund and the fraction of the parent fund that it makes up.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HoldingRecord {
    pub name: String,
    pub weight: f64,
}

/// A fund definition with its direct holdings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FundRecord {
    pub name: String,
    #[serde(default)]
    pub holdings: Vec<HoldingRecord>,
}

impl FundRecord {
    pub fn with_holdings(name: &str, holdings: &[(&str, f64)]) -> Self {
        Self {
            name: name.to_string(),
            holdings: holdings
                .iter()
                .map(|(holding, weight)| HoldingRecord {
                    name: holding.to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }
}

/// An ordered snapshot of fund records.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct FundCatalog {
    pub funds: Vec<FundRecord>,
}

impl FundCatalog {
    pub fn new(funds: Vec<FundRecord>) -> Self {
        Self { funds }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to decode JSON fund catalog")
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to decode YAML fund catalog")
    }

    /// Loads a catalog from disk. Files ending in `.yaml` or `.yml` are
    /// decoded as YAML, everything else as JSON.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let catalog = if is_yaml {
            Self::from_yaml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        debug!(
            funds = catalog.funds.len(),
            "Loaded catalog from {}",
            path.display()
        );
        Ok(catalog)
    }

    pub fn fund_names(&self) -> Vec<&str> {
        self.funds.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }
}

impl From<Vec<FundRecord>> for FundCatalog {
    fn from(funds: Vec<FundRecord>) -> Self {
        Self::new(funds)
    }
}
