//! Operations scripts: line parsing, aggregate reports, and the run loop.
//!
//! ```text
//!   ops.txt ──► parser ──► Operation ──► interpreter ──► stdout
//!                                            │
//!                                            ▼
//!                                   Session (current Dataset)
//! ```

pub mod interpreter;
pub mod parser;
pub mod report;

pub use interpreter::run;
