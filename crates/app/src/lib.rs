//! huffpack: file-level driver for huffpack-core
//!
//! Reads source files, writes packed payloads and their per-file metadata
//! sidecars, restores them, and reports size statistics.

pub mod config;
pub mod demo;
pub mod logging;
pub mod pipeline;
pub mod sample;
pub mod storage;
