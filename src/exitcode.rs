//! Process exit codes, following BSD sysexits.h

/// Bad flags, unknown location id
pub const USAGE: i32 = 64;

/// Snapshot content rejected: duplicate ids, cycles, unparsable TOML
pub const DATAERR: i32 = 65;

/// Snapshot file missing
pub const NOINPUT: i32 = 66;

/// Refused to overwrite an existing snapshot
pub const CANTCREAT: i32 = 73;

pub const IOERR: i32 = 74;

/// Malformed settings file or WMSLOC_* variable
pub const CONFIG: i32 = 78;
