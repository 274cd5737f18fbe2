//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod photo;
pub mod user;

pub use photo::PhotoRepository;
pub use user::UserRepository;
