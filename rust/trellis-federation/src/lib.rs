#![warn(missing_docs)]

//! Cross-origin plumbing: mailbox addressing, address translation and
//! replication endpoint checks.
//!
//! Servers in a federation name each other through local aliases, so
//! the same mailbox has a different address on every server that can
//! see it. The functions here rewrite those addresses as records move
//! between origins and decide which configured endpoint replicates
//! which origin. Like the rest of the workspace they are pure, so the
//! same routing decision can be replayed on any side of a link.

mod error;
pub use error::*;

mod mailbox;
pub use mailbox::*;

mod replication;
pub use replication::*;
