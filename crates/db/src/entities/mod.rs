//! `SeaORM` entities.

pub mod photos;
pub mod users;
