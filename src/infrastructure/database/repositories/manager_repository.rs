use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{CreateManager, DomainError, DomainResult, Manager, ManagerPatch, ManagerStore};
use crate::infrastructure::database::entities::manager;

pub struct ManagerRepository {
    db: DatabaseConnection,
}

impl ManagerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: manager::Model) -> Manager {
    Manager {
        id: model.id,
        name: model.name,
        email: model.email,
        phone_number: model.phone_number,
        password_hash: model.password_hash,
        google_id: model.google_id,
        is_google_account: model.is_google_account,
        is_authorized: model.is_authorized,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

fn insert_err(e: sea_orm::DbErr) -> DomainError {
    if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
        DomainError::Conflict("Manager already exists".to_string())
    } else {
        db_err(e)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ManagerStore for ManagerRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Manager>> {
        let model = manager::Entity::find()
            .filter(manager::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Manager>> {
        let model = manager::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn create(&self, fields: CreateManager) -> DomainResult<Manager> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let new_manager = manager::ActiveModel {
            id: Set(id),
            name: Set(fields.name),
            email: Set(fields.email.to_lowercase()),
            phone_number: Set(fields.phone_number),
            password_hash: Set(fields.password_hash),
            google_id: Set(fields.google_id),
            is_google_account: Set(fields.is_google_account),
            is_authorized: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_manager.insert(&self.db).await.map_err(insert_err)?;
        Ok(model_to_domain(model))
    }

    async fn set_password_hash(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let existing = manager::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Manager", "id", id))?;

        let mut active: manager::ActiveModel = existing.into();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }

    async fn apply_patch(&self, id: &str, patch: ManagerPatch) -> DomainResult<Option<Manager>> {
        let existing = manager::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: manager::ActiveModel = existing.into();

        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email.to_lowercase());
        }
        if let Some(phone_number) = patch.phone_number {
            active.phone_number = Set(Some(phone_number));
        }
        if let Some(is_authorized) = patch.is_authorized {
            active.is_authorized = Set(is_authorized);
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(insert_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = manager::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Manager", "id", id));
        }

        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<Manager>> {
        let models = manager::Entity::find()
            .order_by_desc(manager::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn repo() -> ManagerRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        ManagerRepository::new(db)
    }

    fn fields(email: &str) -> CreateManager {
        CreateManager {
            name: "Asha".into(),
            email: email.into(),
            phone_number: Some("9876543210".into()),
            password_hash: "$2b$12$hash".into(),
            google_id: None,
            is_google_account: false,
        }
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive() {
        let repo = repo().await;
        repo.create(fields("Asha@Example.COM")).await.unwrap();

        let found = repo.find_by_email("asha@example.com").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().email, "asha@example.com");

        let found = repo.find_by_email("ASHA@EXAMPLE.com").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_every_time() {
        let repo = repo().await;
        repo.create(fields("a@x.com")).await.unwrap();

        for _ in 0..3 {
            let err = repo.create(fields("a@x.com")).await.unwrap_err();
            assert!(matches!(err, DomainError::Conflict(_)));
        }
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn patch_updates_only_set_fields() {
        let repo = repo().await;
        let created = repo.create(fields("a@x.com")).await.unwrap();
        assert!(!created.is_authorized);

        let patch = ManagerPatch {
            is_authorized: Some(true),
            ..Default::default()
        };
        let updated = repo.apply_patch(&created.id, patch).await.unwrap().unwrap();
        assert!(updated.is_authorized);
        assert_eq!(updated.name, "Asha");
        assert_eq!(updated.email, "a@x.com");
    }

    #[tokio::test]
    async fn patch_on_missing_manager_returns_none() {
        let repo = repo().await;
        let patched = repo
            .apply_patch("no-such-id", ManagerPatch::default())
            .await
            .unwrap();
        assert!(patched.is_none());
    }

    #[tokio::test]
    async fn set_password_hash_overwrites() {
        let repo = repo().await;
        let created = repo.create(fields("a@x.com")).await.unwrap();

        repo.set_password_hash(&created.id, "$2b$12$newhash")
            .await
            .unwrap();
        let reloaded = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "$2b$12$newhash");
    }

    #[tokio::test]
    async fn delete_missing_manager_is_not_found() {
        let repo = repo().await;
        let err = repo.delete("no-such-id").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
