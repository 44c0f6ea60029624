//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides functionality to load engine settings and seed data
//! from YAML files. The income tax bracket table and the 30-day month are
//! fixed in code and are not configurable.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Payment delay: {} days", config.payroll().payment_delay_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, MAX_PAYMENT_DELAY_DAYS, PayrollSettings, SeedData, ServerConfig};
