use crate::{
    catalogue::UpgradeCatalogue,
    error::{EconError, EconResult},
    types::Currency,
    upgrade::UpgradeDefinition,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const CATALOGUE_FILE: &str = "upgrades/upgrade_catalogue.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeCatalogueFile {
    pub starting_balance: Currency,
    pub daily_income:     Currency,
    pub upgrades:         Vec<UpgradeDefinition>,
}

#[derive(Debug, Clone)]
pub struct EconConfig {
    pub catalogue:        Arc<UpgradeCatalogue>,
    pub starting_balance: Currency,
    pub daily_income:     Currency,
}

impl EconConfig {
    /// Load from the data/ directory.
    /// In tests, use EconConfig::default_test().
    pub fn load(data_dir: &str) -> EconResult<Self> {
        let path = format!("{data_dir}/{CATALOGUE_FILE}");
        let content = std::fs::read_to_string(&path)
            .map_err(|source| EconError::Io { path: path.clone(), source })?;
        let config = Self::from_json(&content)?;
        log::info!(
            "loaded {} upgrade definitions from {path}",
            config.catalogue.len()
        );
        Ok(config)
    }

    /// Parse a catalogue file body. Definitions are validated.
    pub fn from_json(content: &str) -> EconResult<Self> {
        let file: UpgradeCatalogueFile = serde_json::from_str(content)?;
        Ok(Self {
            catalogue:        Arc::new(UpgradeCatalogue::from_definitions(file.upgrades)?),
            starting_balance: file.starting_balance,
            daily_income:     file.daily_income,
        })
    }

    /// Config with the built-in catalogue for use in tests.
    pub fn default_test() -> Self {
        Self {
            catalogue:        UpgradeCatalogue::builtin(),
            starting_balance: 500,
            daily_income:     120,
        }
    }
}
