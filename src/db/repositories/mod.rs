//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod competition_repo;
pub mod participant_repo;
pub mod student_repo;
pub mod user_repo;

pub use competition_repo::{CompetitionFields, CompetitionRepository};
pub use participant_repo::ParticipantRepository;
pub use student_repo::{StudentRepository, StudentSearchFilter};
pub use user_repo::UserRepository;
