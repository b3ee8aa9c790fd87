//! Business logic services

pub mod auth_service;
pub mod chat_service;
pub mod registration_service;
pub mod settlement_service;
pub mod tournament_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use chat_service::ChatService;
pub use registration_service::RegistrationService;
pub use settlement_service::SettlementService;
pub use tournament_service::TournamentService;
pub use user_service::UserService;
