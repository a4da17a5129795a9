//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed KV store that services persist their
//! records through, so backends stay swappable behind the domain traits.

pub mod json_kv_store;
