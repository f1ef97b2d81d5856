//! Batch execution module for Canary
//!
//! Handles loading and executing JSON files that list canary actions.

pub mod descriptor;
pub mod runner;

pub use descriptor::{load_descriptors, parse_descriptors, BatchDescriptor};
pub use runner::{BatchResult, BatchRunner};
