//! Stable exit codes for the keyhole CLI.

/// The correct key was found.
pub const OK: i32 = 0;
/// Invalid config, a malformed correct key, or an oracle transport fault.
pub const INVALID: i32 = 1;
/// The search terminated without finding the key (limit, stop, or an
/// unresolvable duplicate).
pub const NOT_FOUND: i32 = 2;
