//! Yoga Studio - session booking API
//!
//! This is the library interface for the yoga studio server: members
//! register and log in with bearer tokens, browse teachers, and book
//! themselves into yoga sessions.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use store::Store;
