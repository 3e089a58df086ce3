//! Bundle verification
//!
//! Reads a written bundle back and checks it against its manifest and for
//! referential closure.

pub mod checksum;
pub mod report;
pub mod verify;

pub use report::{VerificationFailure, VerificationReport};
pub use verify::Verifier;
