//! MindScript: an AI-assisted journaling service.
//!
//! Entries are stored in libSQL, analysed by an OpenAI-compatible chat model
//! and aggregated into dashboard insights. Shared entries form a community
//! feed with reactions and comments.

pub mod analysis;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod llm;
pub mod models;
pub mod services;
