//! Photo repository for database operations.

use photopin_core::photo::{MetadataStore, NewPhoto, Photo, PhotoError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::photos;

/// Photo repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PhotoRepository {
    db: DatabaseConnection,
}

impl PhotoRepository {
    /// Creates a new photo repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl MetadataStore for PhotoRepository {
    async fn create(&self, input: NewPhoto) -> Result<Photo, PhotoError> {
        let photo = photos::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            cid: Set(input.cid),
            size: Set(input.size),
            user_id: Set(input.owner_id),
            created_at: Set(chrono::Utc::now().into()),
        };

        photo
            .insert(&self.db)
            .await
            .map(to_photo)
            .map_err(|e| PhotoError::repository(e.to_string()))
    }

    // Several photos may share a cid; the earliest record wins.
    async fn find_by_cid(&self, cid: &str) -> Result<Option<Photo>, PhotoError> {
        photos::Entity::find()
            .filter(photos::Column::Cid.eq(cid))
            .order_by_asc(photos::Column::CreatedAt)
            .one(&self.db)
            .await
            .map(|found| found.map(to_photo))
            .map_err(|e| PhotoError::repository(e.to_string()))
    }
}

fn to_photo(model: photos::Model) -> Photo {
    Photo {
        id: model.id,
        name: model.name,
        cid: model.cid,
        size: model.size,
        owner_id: model.user_id,
        created_at: model.created_at.into(),
    }
}
