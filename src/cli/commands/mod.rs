//! CLI command implementations

pub mod init;
pub mod redact;
pub mod serve;
pub mod validate;
