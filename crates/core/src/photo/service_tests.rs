use super::*;
use crate::content::{ByteStream, GatewayError, PinBackend, PinReceipt, PinStore, PinStoreConfig};
use bytes::Bytes;
use chrono::Utc;
use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Notify;
use uuid::Uuid;

/// Parks the first `create` call until released, then fails it.
#[derive(Default)]
struct HeldWrite {
    entered: Notify,
    release: Notify,
}

#[derive(Default)]
struct MemoryPhotos {
    photos: std::sync::Mutex<Vec<Photo>>,
    fail_writes: AtomicBool,
    hold_first: Option<Arc<HeldWrite>>,
    creates: AtomicUsize,
}

impl MetadataStore for MemoryPhotos {
    async fn create(&self, input: NewPhoto) -> Result<Photo, PhotoError> {
        let call = self.creates.fetch_add(1, Ordering::SeqCst);
        if let Some(hold) = self.hold_first.as_ref().filter(|_| call == 0) {
            hold.entered.notify_one();
            hold.release.notified().await;
            return Err(PhotoError::repository("deadlock detected"));
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PhotoError::repository("database is locked"));
        }
        let photo = Photo {
            id: Uuid::new_v4(),
            name: input.name,
            cid: input.cid,
            size: input.size,
            owner_id: input.owner_id,
            created_at: Utc::now(),
        };
        self.photos.lock().expect("lock").push(photo.clone());
        Ok(photo)
    }

    async fn find_by_cid(&self, cid: &str) -> Result<Option<Photo>, PhotoError> {
        let photos = self.photos.lock().expect("lock");
        Ok(photos.iter().find(|p| p.cid == cid).cloned())
    }
}

struct Fixture {
    service: PhotoService<MemoryPhotos, PinStore>,
    repo: Arc<MemoryPhotos>,
    gateway: Arc<PinStore>,
}

fn fixture() -> Fixture {
    let repo = Arc::new(MemoryPhotos::default());
    let gateway = Arc::new(memory_store());
    Fixture {
        service: PhotoService::new(repo.clone(), gateway.clone()),
        repo,
        gateway,
    }
}

/// Pin store that reports every finished `put`.
struct ObservedGateway {
    inner: PinStore,
    puts: AtomicUsize,
    put_done: Notify,
}

impl ContentGateway for ObservedGateway {
    async fn put(&self, name: &str, content: Bytes) -> Result<PinReceipt, GatewayError> {
        let receipt = self.inner.put(name, content).await;
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.put_done.notify_one();
        receipt
    }

    async fn contains(&self, cid: &ContentId) -> Result<bool, GatewayError> {
        self.inner.contains(cid).await
    }

    async fn get(&self, cid: &ContentId) -> Result<ByteStream, GatewayError> {
        self.inner.get(cid).await
    }

    async fn unpin(&self, cid: &ContentId) -> Result<(), GatewayError> {
        self.inner.unpin(cid).await
    }
}

fn memory_store() -> PinStore {
    let config = PinStoreConfig::new(PinBackend::Memory, "upstream-key").with_max_file_size(64);
    PinStore::from_config(config).expect("store")
}

fn upload(owner_id: Uuid, filename: &str, bytes: &'static [u8]) -> UploadInput {
    UploadInput {
        owner_id,
        filename: filename.to_string(),
        content: Bytes::from_static(bytes),
    }
}

async fn collect(mut stream: ByteStream) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(chunk) = stream.next().await {
        out.extend_from_slice(&chunk.expect("chunk"));
    }
    out
}

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let f = fixture();
    let owner = Uuid::new_v4();

    let photo = f
        .service
        .upload(upload(owner, "photo.jpg", b"0123456789"))
        .await
        .expect("upload");

    assert_eq!(photo.name, "photo.jpg");
    assert_eq!(photo.owner_id, owner);
    assert_eq!(photo.size, 10);

    let download = f.service.download(&photo.cid).await.expect("download");
    assert_eq!(download.photo, photo);
    assert_eq!(collect(download.content).await, b"0123456789");

    // Repeated downloads are byte-identical.
    let again = f.service.download(&photo.cid).await.expect("download");
    assert_eq!(collect(again.content).await, b"0123456789");
}

#[tokio::test]
async fn test_upload_rejects_blank_name_before_pinning() {
    let f = fixture();

    let result = f.service.upload(upload(Uuid::new_v4(), "  ", b"bytes")).await;
    assert!(matches!(result, Err(PhotoError::MissingName)));

    let cid = ContentId::from_digest(&Sha256::digest(b"bytes"));
    assert!(!f.gateway.contains(&cid).await.expect("stat"));
}

#[tokio::test]
async fn test_upload_too_large_records_nothing() {
    let f = fixture();

    let result = f
        .service
        .upload(upload(Uuid::new_v4(), "big.jpg", &[7u8; 65]))
        .await;

    assert!(matches!(result, Err(PhotoError::FileTooLarge { .. })));
    assert!(f.repo.photos.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_failed_record_unpins_new_content() {
    let f = fixture();
    f.repo.fail_writes.store(true, Ordering::SeqCst);

    let result = f
        .service
        .upload(upload(Uuid::new_v4(), "photo.jpg", b"orphan"))
        .await;
    assert!(matches!(result, Err(PhotoError::Repository(_))));

    let cid = ContentId::from_digest(&Sha256::digest(b"orphan"));
    assert!(!f.gateway.contains(&cid).await.expect("stat"));
}

#[tokio::test]
async fn test_failed_record_keeps_previously_pinned_content() {
    let f = fixture();
    let first = f
        .service
        .upload(upload(Uuid::new_v4(), "a.jpg", b"shared"))
        .await
        .expect("first upload");

    f.repo.fail_writes.store(true, Ordering::SeqCst);
    let result = f
        .service
        .upload(upload(Uuid::new_v4(), "b.jpg", b"shared"))
        .await;
    assert!(result.is_err());

    let cid = ContentId::parse(&first.cid).expect("cid");
    assert!(f.gateway.contains(&cid).await.expect("stat"));
}

#[tokio::test]
async fn test_download_unknown_cid_is_not_found() {
    let f = fixture();

    let result = f.service.download("doesnotexist").await;
    assert!(matches!(result, Err(PhotoError::NotFound(_))));
}

#[tokio::test]
async fn test_download_malformed_stored_cid_is_rejected() {
    let f = fixture();
    f.repo.photos.lock().expect("lock").push(Photo {
        id: Uuid::new_v4(),
        name: "legacy.jpg".to_string(),
        cid: "QmLegacy".to_string(),
        size: 1,
        owner_id: Uuid::new_v4(),
        created_at: Utc::now(),
    });

    let result = f.service.download("QmLegacy").await;
    assert!(matches!(result, Err(PhotoError::InvalidContentId(_))));
}

#[tokio::test]
async fn test_download_missing_object_is_gateway_error() {
    let f = fixture();
    let cid = ContentId::from_digest(&Sha256::digest(b"gone"));
    f.repo.photos.lock().expect("lock").push(Photo {
        id: Uuid::new_v4(),
        name: "gone.jpg".to_string(),
        cid: cid.to_string(),
        size: 4,
        owner_id: Uuid::new_v4(),
        created_at: Utc::now(),
    });

    let result = f.service.download(cid.as_str()).await;
    assert!(matches!(result, Err(PhotoError::Gateway(_))));
}

#[tokio::test]
async fn test_failed_record_keeps_content_another_photo_references() {
    let f = fixture();
    let cid = ContentId::from_digest(&Sha256::digest(b"claimed"));
    // Row committed elsewhere while this upload was the one to store the bytes.
    f.repo.photos.lock().expect("lock").push(Photo {
        id: Uuid::new_v4(),
        name: "other.jpg".to_string(),
        cid: cid.to_string(),
        size: 7,
        owner_id: Uuid::new_v4(),
        created_at: Utc::now(),
    });
    f.repo.fail_writes.store(true, Ordering::SeqCst);

    let result = f
        .service
        .upload(upload(Uuid::new_v4(), "mine.jpg", b"claimed"))
        .await;
    assert!(matches!(result, Err(PhotoError::Repository(_))));

    assert!(f.gateway.contains(&cid).await.expect("stat"));
}

#[tokio::test]
async fn test_concurrent_failed_upload_leaves_committed_photo_downloadable() {
    let hold = Arc::new(HeldWrite::default());
    let repo = Arc::new(MemoryPhotos {
        hold_first: Some(hold.clone()),
        ..MemoryPhotos::default()
    });
    let gateway = Arc::new(ObservedGateway {
        inner: memory_store(),
        puts: AtomicUsize::new(0),
        put_done: Notify::new(),
    });
    let service = PhotoService::new(repo.clone(), gateway.clone());

    // First upload stores the bytes, then parks inside `create`.
    let first = service.upload(upload(Uuid::new_v4(), "a.jpg", b"raced"));
    // Second upload finds the bytes already pinned.
    let second = async {
        hold.entered.notified().await;
        service
            .upload(upload(Uuid::new_v4(), "b.jpg", b"raced"))
            .await
    };
    // The first write fails only once the second upload has pinned.
    let release = async {
        while gateway.puts.load(Ordering::SeqCst) < 2 {
            gateway.put_done.notified().await;
        }
        hold.release.notify_one();
    };

    let (first, second, ()) = tokio::join!(first, second, release);

    assert!(matches!(first, Err(PhotoError::Repository(_))));
    let photo = second.expect("second upload should commit");

    let download = service.download(&photo.cid).await.expect("download");
    assert_eq!(download.photo.id, photo.id);
    assert_eq!(collect(download.content).await, b"raced");
}
