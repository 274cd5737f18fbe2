//! Content gateway: content-addressed pinning on top of Apache OpenDAL.
//!
//! Objects are addressed by the SHA-256 digest of their bytes. Every pinned
//! object also gets a small JSON pin record naming who requested it.
//!
//! # Layout
//!
//! ```text
//! blobs/<cid>        raw object bytes
//! pins/<cid>.json    PinRecord { cid, name, size, requesting_api_key, created_at }
//! ```
//!
//! Backends: local filesystem (default), S3-compatible, in-memory (tests).

mod cid;
mod config;
mod error;
mod gateway;
mod service;

pub use cid::ContentId;
pub use config::{PinBackend, PinStoreConfig};
pub use error::GatewayError;
pub use gateway::{ByteStream, ContentGateway, PinReceipt};
pub use service::{PinRecord, PinStore};
