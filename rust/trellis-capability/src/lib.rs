#![warn(missing_docs)]

//! Capability matching and access decisions.
//!
//! The heart of this crate is the capture relation between selectors
//! and tags, plus the ordered decision procedures built on top of it:
//! who may read, write, retag or delete a ref, and who may read or
//! apply a given tag. Decisions are pure and synchronous so that every
//! surface of the system can evaluate them locally and agree.

mod access;
pub use access::*;

mod error;
pub use error::*;

mod selector;
pub use selector::*;

mod settings;
pub use settings::*;
