//! Solver for the keyhole key puzzle.
//!
//! This crate deduces the correct key to a keyhole feedback service by
//! repeatedly submitting candidate keys and refining them from the service's
//! per-position placement hints. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (feedback decoding, candidate
//!   derivation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting collaborators (oracle transports,
//!   configuration files). Isolated behind the [`io::oracle::KeyOracle`]
//!   trait to enable scripted oracles in tests.
//!
//! The [`search`] module runs the refinement loop against an oracle, steered
//! by a [`control::SearchControl`] shared with a controlling thread.

pub mod control;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod search;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
