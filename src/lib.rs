//! Greenroom: a backend relay that forwards prompts to third-party
//! generative-text providers and keeps per-user programme and script records
//! in process memory. Provider credentials stay server-side; clients see one
//! uniform request/response shape regardless of which provider is invoked.

pub mod core;
pub mod inference;
pub mod server;
pub mod store;
