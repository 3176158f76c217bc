//! archintel - governance-first technology compliance and architecture
//! analysis for codebases.
//!
//! This library exposes the analysis engine for integration testing and
//! embedding: technology detection, compliance classification, pattern
//! scanning, architecture inference, and report rendering.

pub mod analysis;
pub mod config;
pub mod logging;
