//! Configuration loading and management for the payroll engine.
//!
//! This module loads the engine's rates (employer fringe, payroll tax,
//! platform fees, union contributions) and the reporting company's details
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Reporting company: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompanyInfo, PayrollConfig, PayrollRates, UnionRates};
