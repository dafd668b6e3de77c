//! Generation Module
//!
//! The boundary to the remote design-generation service.

pub mod client;

pub use client::HttpGenerationClient;
