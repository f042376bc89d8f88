//! Risk Governance Lab — computational core of the risk dashboards.
//!
//! Data flow:
//!   upload / sample table → validator → ValidatedTable
//!   generator → SimulationRow table → governance scorer → ScoredRow table
//!   ValidatedTable / ScoredRow tables → dispersion, aggregation, risk_profile
//!
//! Presentation (pages, charts) lives outside this crate.

pub mod aggregation;
pub mod benchmark;
pub mod cache;
pub mod config;
pub mod dispersion;
pub mod error;
pub mod generator;
pub mod governance;
pub mod risk_profile;
pub mod rng;
pub mod session;
pub mod simulation;
pub mod table;
pub mod trade;
pub mod types;
pub mod validator;
