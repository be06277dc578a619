//! Shared utilities for Hiroba packages.

pub mod logger;
