//! Script-driven queries over a county demographics table.
//!
//! A dataset is loaded once ([`data::loader`]), then an operations script is
//! interpreted line by line ([`script::interpreter`]): filters narrow the
//! working view, reports print population statistics for it.

pub mod app;
pub mod cli;
pub mod data;
pub mod error;
pub mod script;
pub mod state;
