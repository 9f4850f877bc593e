//! Core domain types and logic.

pub mod ohlcv;
pub mod position;
pub mod portfolio;
pub mod indicator;
pub mod signal;
pub mod simulator;
pub mod benchmark;
pub mod metrics;
pub mod backtest;
pub mod config_validation;
pub mod error;
