//! # cm-core
//!
//! Core types, errors, and configuration for ConstructManager RS.
//!
//! This crate provides the building blocks shared by all other crates:
//! - The error taxonomy (`CmError`) and result alias (`CmResult`)
//! - The hierarchy level vocabulary (`Level`) and identifier type (`Id`)
//! - Percentage clamping helpers
//! - Engine configuration types

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::*;
pub use result::*;
pub use types::*;
