//! Console output helpers

mod output;

pub use output::{OutputMode, Printer};
