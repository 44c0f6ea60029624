//! Payroll Engine
//!
//! This crate computes monthly payroll for employees of tenant companies:
//! pro-rated base salary, capped social-security and health-insurance
//! contributions, progressive income tax and net salary, together with the
//! record lifecycle rules (one record per employee and month, approval of
//! drafts only).
//!
//! The pure computation lives in [`calculation`]; [`service`] adds
//! persistence through the ports in [`store`], and [`api`] exposes it over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;
