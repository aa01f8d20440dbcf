//! Command-line interface plumbing

pub mod commands;
