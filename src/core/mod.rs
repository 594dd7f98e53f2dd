//! # Core configuration and process plumbing
//!
//! Everything here is runtime-agnostic: no HTTP, no provider calls.

pub mod config;
