#![warn(missing_docs)]

//! The records the rest of the workspace operates on: bookmarked refs,
//! accounts with their roles and access lists, and the origin tables
//! consulted during federation.
//!
//! These types mirror their wire representation. Field names that differ
//! between Rust and the wire (`userUrls`, `mod`, the `*Access` lists)
//! are bridged with serde renames, and absent fields always deserialize
//! to an empty or `None` value.

mod account;
pub use account::*;

mod origin;
pub use origin::*;

mod reference;
pub use reference::*;
