//! Data layer: core types, loading, segmentation and selection.
//!
//! Architecture:
//! ```text
//!  directory of delimited sample files
//!        │
//!        ▼
//!   ┌──────────┐   ┌──────────┐
//!   │  loader   │──▶│ classify  │  path → counter / plain / reference
//!   └──────────┘   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ segment   │  flat samples → fixed-length frames
//!   └──────────┘
//!        │
//!        ├──────────────────────┐
//!        ▼                      ▼
//!   ┌──────────┐          ┌───────────┐
//!   │  select   │ window   │ normalize  │ counter ÷ reference
//!   └──────────┘          └───────────┘
//! ```

pub mod classify;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod segment;
pub mod select;
