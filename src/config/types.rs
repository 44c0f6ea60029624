//! Configuration types for the Payroll Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::{ContributionRule, Employee};

/// Longest accepted default payment delay, in days.
pub const MAX_PAYMENT_DELAY_DAYS: i64 = 366;

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_payment_delay_days() -> i64 {
    5
}

fn default_min_period_year() -> i32 {
    2000
}

fn default_max_period_year() -> i32 {
    3000
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Settings governing payroll record creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PayrollSettings {
    /// Days after creation the payment date defaults to
    /// (0 to [`MAX_PAYMENT_DELAY_DAYS`]).
    #[serde(default = "default_payment_delay_days")]
    pub payment_delay_days: i64,
    /// Earliest accepted period year.
    #[serde(default = "default_min_period_year")]
    pub min_period_year: i32,
    /// Latest accepted period year.
    #[serde(default = "default_max_period_year")]
    pub max_period_year: i32,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            payment_delay_days: default_payment_delay_days(),
            min_period_year: default_min_period_year(),
            max_period_year: default_max_period_year(),
        }
    }
}

/// Engine configuration from engine.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Payroll settings.
    #[serde(default)]
    pub payroll: PayrollSettings,
}

/// Demo tenant data from seed.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Employees to load into the store.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Contribution rules to load into the store.
    #[serde(default)]
    pub contribution_rules: Vec<ContributionRule>,
}
