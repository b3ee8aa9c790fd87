//! ArenaHub - Tournament Hosting Platform
//!
//! This library provides the core functionality for the ArenaHub platform,
//! an online tournament host for paid and free competitive events.
//!
//! # Features
//!
//! - Solo/Duo/Squad tournaments with roster capacity rules
//! - Organizer-driven lifecycle (Open -> Ongoing -> ResultsPending ->
//!   Completed/Closed)
//! - Prize settlement credited to an internal wallet
//! - Per-tournament chat room with an admin toggle
//! - Tiered admin hierarchy with a two-phase ban workflow
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
