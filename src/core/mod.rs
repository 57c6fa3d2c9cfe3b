//! Core functionality for the bulk service
//!
//! This module contains the CSV validation, Hospital Directory client and batch
//! processing logic.

pub mod batch;
pub mod csv;
pub mod directory;
