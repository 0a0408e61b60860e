//! Multimodal generation gateway
//!
//! Accepts a text prompt plus optional image/audio references, composes a
//! multimodal request to a generative backend, and serves the result either
//! inline or by reference to an ephemerally cached artifact.

pub mod analysis;
pub mod api;
pub mod artifacts;
pub mod assemble;
pub mod backend;
pub mod config;
pub mod conversation;
pub mod decompose;
pub mod error;
pub mod gateway;
pub mod media;

pub use error::{Error, Result};
