//! Terminal user interface.

pub mod dashboard;
