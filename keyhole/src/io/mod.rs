//! Side-effecting collaborators: oracle transports and configuration.

pub mod config;
pub mod local;
pub mod oracle;
pub mod remote;
