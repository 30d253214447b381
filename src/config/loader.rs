//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CompanyInfo, PayrollConfig, PayrollRates};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── rates.yaml    # Fringe, tax, fee and union rates
/// └── company.yaml  # Company named on union reports
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Greenroom fee rate: {}", loader.rates().greenroom_fee_rate);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or holds rates that fail validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rates = Self::load_yaml::<PayrollRates>(&path.join("rates.yaml"))?;
        rates.validate()?;

        let company = Self::load_yaml::<CompanyInfo>(&path.join("company.yaml"))?;

        tracing::debug!(
            path = %path.display(),
            company = %company.name,
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(rates, company),
        })
    }

    /// Wraps already-built configuration, validating the rates.
    pub fn from_parts(rates: PayrollRates, company: CompanyInfo) -> EngineResult<Self> {
        rates.validate()?;
        Ok(Self {
            config: PayrollConfig::new(rates, company),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the engine rates.
    pub fn rates(&self) -> &PayrollRates {
        self.config.rates()
    }

    /// Returns the reporting company.
    pub fn company(&self) -> &CompanyInfo {
        self.config.company()
    }
}
