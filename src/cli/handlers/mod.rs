//! Command handlers for CLI operations
//!
//! Separates command execution from parsing and validation.

pub mod send;
pub mod sign;

pub use send::SendCommandHandler;
pub use sign::SignCommandHandler;
