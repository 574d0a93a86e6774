//! CLI library for testing purposes

pub mod args;

pub use args::Args;
