//! Clients for talking to services outside this process

pub mod client;
