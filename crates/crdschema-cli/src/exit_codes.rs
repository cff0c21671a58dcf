//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - also used when no input was given
pub const ERROR: i32 = 1;

/// YAML error - an input could not be parsed
pub const YAML_ERROR: i32 = 2;

/// Schema error - a CRD carries a schema but lacks naming fields
pub const SCHEMA_ERROR: i32 = 3;

/// Input error - path not found or unreadable directory
pub const INPUT_ERROR: i32 = 4;

/// IO error - output directory or file could not be written
pub const IO_ERROR: i32 = 5;

/// Network error - URL input could not be fetched
pub const NETWORK_ERROR: i32 = 6;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
