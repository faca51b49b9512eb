//! Shift lifecycle and earnings aggregation engine
//!
//! This crate resolves logged work shifts into concrete time spans (including
//! spans that cross midnight), classifies them as scheduled, active or ended
//! against an explicit evaluation instant, computes expected earnings from
//! base hours, overtime and tips, and aggregates recent activity and week and
//! month totals for a dashboard.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
