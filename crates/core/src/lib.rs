//! Core workflows for photopin.
//!
//! This crate contains the workflow logic with ZERO web or database dependencies.
//! Persistence is reached through the traits the db crate implements.
//!
//! # Modules
//!
//! - `account` - Registration, API keys and bearer authentication
//! - `content` - Content-addressed pinning (the content gateway)
//! - `photo` - Upload and download workflows

pub mod account;
pub mod content;
pub mod photo;
