//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod competition;
pub mod participant;
pub mod student;
pub mod user;

pub use competition::*;
pub use participant::*;
pub use student::*;
pub use user::*;
