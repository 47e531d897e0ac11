//! CRUD over the `places` collection
//!
//! Identifiers are parsed and drafts validated before the store is touched.

use crate::auth::Session;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::places::{Place, PlaceDraft, PlaceId};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use tracing::info;

const SELECT_PLACE: &str = "SELECT id, name, phone, latitude, longitude, images, open_hours, \
                                   open_days, created_by, created_at \
                            FROM places";

#[derive(Debug, sqlx::FromRow)]
struct PlaceRow {
    id: String,
    name: String,
    phone: String,
    latitude: f64,
    longitude: f64,
    images: Json<Vec<String>>,
    open_hours: String,
    open_days: String,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PlaceRow> for Place {
    type Error = Error;

    fn try_from(row: PlaceRow) -> Result<Self> {
        let id = row
            .id
            .parse::<PlaceId>()
            .map_err(|e| Error::Storage(sqlx::Error::Decode(e.to_string().into())))?;

        Ok(Place {
            id,
            name: row.name,
            phone: row.phone,
            latitude: row.latitude,
            longitude: row.longitude,
            images: row.images.0,
            open_hours: row.open_hours,
            open_days: row.open_days,
            created_by: row.created_by,
            created_at: row.created_at,
        })
    }
}

/// Place repository
#[derive(Debug, Clone)]
pub struct PlaceRepository {
    db: Database,
    placeholder_image: String,
}

impl PlaceRepository {
    pub fn new(db: Database, placeholder_image: impl Into<String>) -> Self {
        Self {
            db,
            placeholder_image: placeholder_image.into(),
        }
    }

    /// All places, in insertion order
    pub async fn list(&self) -> Result<Vec<Place>> {
        let rows = sqlx::query_as::<_, PlaceRow>(&format!("{} ORDER BY rowid", SELECT_PLACE))
            .fetch_all(self.db.pool())
            .await?;

        rows.into_iter().map(Place::try_from).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Place> {
        let id: PlaceId = id.parse()?;

        let row = sqlx::query_as::<_, PlaceRow>(&format!("{} WHERE id = ?", SELECT_PLACE))
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;

        row.ok_or_else(|| not_found(&id))?.try_into()
    }

    /// Create a place on behalf of `actor`, returning its new identifier
    pub async fn create(&self, draft: &PlaceDraft, actor: &Session) -> Result<PlaceId> {
        let fields = draft.validate_for_create(&self.placeholder_image)?;
        let id = PlaceId::generate();

        sqlx::query(
            "INSERT INTO places \
                (id, name, phone, latitude, longitude, images, open_hours, open_days, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&fields.name)
        .bind(&fields.phone)
        .bind(fields.coordinates.lat)
        .bind(fields.coordinates.lng)
        .bind(Json(&fields.images))
        .bind(&fields.open_hours)
        .bind(&fields.open_days)
        .bind(actor.actor())
        .bind(Utc::now())
        .execute(self.db.pool())
        .await?;

        info!("Created place {} ({}) for {}", id, fields.name, actor.actor());
        Ok(id)
    }

    /// Replace every mutable field of a place
    pub async fn update(&self, id: &str, draft: &PlaceDraft) -> Result<()> {
        let id: PlaceId = id.parse()?;
        let fields = draft.validate_for_update()?;

        let result = sqlx::query(
            "UPDATE places \
             SET name = ?, phone = ?, latitude = ?, longitude = ?, images = ?, \
                 open_hours = ?, open_days = ? \
             WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&fields.phone)
        .bind(fields.coordinates.lat)
        .bind(fields.coordinates.lng)
        .bind(Json(&fields.images))
        .bind(&fields.open_hours)
        .bind(&fields.open_days)
        .bind(id.to_string())
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(&id));
        }

        info!("Updated place {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id: PlaceId = id.parse()?;

        let result = sqlx::query("DELETE FROM places WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(&id));
        }

        info!("Deleted place {}", id);
        Ok(())
    }
}

fn not_found(id: &PlaceId) -> Error {
    Error::NotFound(format!("Place not found: {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::CoordinateInput;

    async fn repository() -> PlaceRepository {
        let db = Database::in_memory().await.unwrap();
        PlaceRepository::new(db, "/assets/placeholder.jpg")
    }

    fn admin() -> Session {
        Session {
            user_id: "u-1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
        }
    }

    fn draft(name: &str) -> PlaceDraft {
        PlaceDraft {
            name: Some(name.to_string()),
            phone: Some("0911000000".to_string()),
            latitude: Some(9.03.into()),
            longitude: Some(38.74.into()),
            images: Some(vec!["https://utfs.io/f/one.jpg".to_string()]),
            open_hours: Some("7:00-22:00".to_string()),
            open_days: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let repo = repository().await;
        let before = Utc::now();
        let id = repo.create(&draft("Kaldi's"), &admin()).await.unwrap();

        let place = repo.get(&id.to_string()).await.unwrap();
        assert_eq!(place.id, id);
        assert_eq!(place.name, "Kaldi's");
        assert_eq!(place.phone, "0911000000");
        assert_eq!(place.latitude, 9.03);
        assert_eq!(place.longitude, 38.74);
        assert_eq!(place.images, vec!["https://utfs.io/f/one.jpg".to_string()]);
        assert_eq!(place.open_hours, "7:00-22:00");
        assert_eq!(place.open_days, "Not Known");
        assert_eq!(place.created_by, "admin@example.com");
        assert!(place.created_at >= before - chrono::Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repo = repository().await;
        assert!(repo.list().await.unwrap().is_empty());

        for name in ["First", "Second", "Third"] {
            repo.create(&draft(name), &admin()).await.unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_create_rejects_nan_coordinate() {
        let repo = repository().await;
        let mut d = draft("Bad");
        d.latitude = Some(CoordinateInput::Text("not-a-number".to_string()));

        let err = repo.create(&d, &admin()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = repository().await;
        let id = repo.create(&draft("Old"), &admin()).await.unwrap();

        let mut d = draft("New");
        d.latitude = Some(9.0.into());
        d.images = Some(vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        d.open_hours = None;
        repo.update(&id.to_string(), &d).await.unwrap();

        let place = repo.get(&id.to_string()).await.unwrap();
        assert_eq!(place.name, "New");
        assert_eq!(place.latitude, 9.0);
        assert_eq!(place.images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        assert_eq!(place.open_hours, "Not Known");
        assert_eq!(place.created_by, "admin@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let repo = repository().await;
        let err = repo
            .update(&PlaceId::generate().to_string(), &draft("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_requires_images() {
        let repo = repository().await;
        let id = repo.create(&draft("Cafe"), &admin()).await.unwrap();

        let mut d = draft("Cafe");
        d.images = None;
        let err = repo.update(&id.to_string(), &d).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_is_not_found_after_removal() {
        let repo = repository().await;
        let id = repo.create(&draft("Gone"), &admin()).await.unwrap();
        let id = id.to_string();

        repo.delete(&id).await.unwrap();
        for _ in 0..3 {
            let err = repo.delete(&id).await.unwrap_err();
            assert!(matches!(err, Error::NotFound(_)));
        }
        assert!(matches!(repo.get(&id).await.unwrap_err(), Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_id_fails_before_store_access() {
        let repo = repository().await;
        repo.db.pool().close().await;

        for result in [
            repo.get("xyz").await.map(|_| ()),
            repo.update("xyz", &draft("x")).await,
            repo.delete("xyz").await,
        ] {
            assert!(matches!(result.unwrap_err(), Error::InvalidIdentifier(_)));
        }

        // A well-formed id does reach the (closed) store
        let err = repo.get(&PlaceId::generate().to_string()).await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}
