//! Business logic services

pub mod auth_service;
pub mod competition_service;
pub mod keep_alive;
pub mod participant_service;
pub mod student_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use competition_service::CompetitionService;
pub use keep_alive::KeepAliveService;
pub use participant_service::{resolve_participants, PgStudentDirectory, StudentDirectory};
pub use student_service::StudentService;
pub use user_service::{UserAccount, UserService};
