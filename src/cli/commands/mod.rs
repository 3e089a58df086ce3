//! CLI command implementations
//!
//! Every command returns the process exit code:
//!
//! | code | meaning |
//! |---|---|
//! | 0 | success |
//! | 1 | finished with failures |
//! | 2 | configuration error |
//! | 4 | catalog snapshot could not be loaded |
//! | 5 | fatal error |
//! | 130 | interrupted by a signal |

pub mod export;
pub mod init;
pub mod validate;
pub mod verify;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PARTIAL: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_SOURCE: i32 = 4;
pub const EXIT_FATAL: i32 = 5;
pub const EXIT_INTERRUPTED: i32 = 130;
