//! Command-line driver for the organization list screens.
pub mod cli;
pub mod platform;
