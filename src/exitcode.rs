//! Process exit codes for `rstree` failures, following BSD sysexits.h.

/// Bad flags or arguments
pub const USAGE: i32 = 64;

/// Malformed tree input or a failed tree operation
pub const DATAERR: i32 = 65;

/// Input file missing or unreadable
pub const NOINPUT: i32 = 66;

/// Output file could not be written
pub const CANTCREAT: i32 = 73;

/// Invalid configuration
pub const CONFIG: i32 = 78;
