//! The content gateway seam.

use std::future::Future;
use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use super::cid::ContentId;
use super::error::GatewayError;

/// Byte stream handed back by [`ContentGateway::get`].
pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

/// Outcome of pinning an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinReceipt {
    /// Address of the pinned object.
    pub cid: ContentId,
    /// Object size in bytes.
    pub size: u64,
    /// False when identical bytes were already pinned.
    pub newly_stored: bool,
}

/// Content-addressed ingestion and retrieval.
///
/// Implemented by [`super::PinStore`]; workflows depend on this trait so tests
/// can substitute their own gateway.
pub trait ContentGateway: Send + Sync {
    /// Pin `content` under its content id.
    ///
    /// The key is the digest of the whole object, so callers hand over the
    /// complete body. `name` is informational and ends up in the pin record.
    fn put(
        &self,
        name: &str,
        content: Bytes,
    ) -> impl Future<Output = Result<PinReceipt, GatewayError>> + Send;

    /// Check whether an object is pinned.
    fn contains(&self, cid: &ContentId)
    -> impl Future<Output = Result<bool, GatewayError>> + Send;

    /// Open a stream over a pinned object's bytes.
    fn get(&self, cid: &ContentId)
    -> impl Future<Output = Result<ByteStream, GatewayError>> + Send;

    /// Remove a pinned object. Missing objects are not an error.
    fn unpin(&self, cid: &ContentId) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
