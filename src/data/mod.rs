//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  demographics.csv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset  │  header + Vec<Record>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  apply a row predicate → new Dataset
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
