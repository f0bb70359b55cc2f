#![warn(missing_docs)]

//! Primitives for the tag language shared by every other crate in this
//! workspace: visibility markers, origin qualification and the `/`
//! hierarchy.
//!
//! All functions here are pure and total over string slices. Malformed
//! input never panics or errors; it degrades to the safe answer for the
//! operation at hand (usually "no match" or the input unchanged). The
//! [`Tag`] type layers grammar validation on top for the places that
//! need it.

mod error;
pub use error::*;

mod hierarchy;
pub use hierarchy::*;

mod parts;
pub use parts::*;

mod tag;
pub use tag::*;

mod visibility;
pub use visibility::*;
