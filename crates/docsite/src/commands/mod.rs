//! CLI command implementations.

pub mod check;
pub mod export;
pub mod init;
pub mod watch;
