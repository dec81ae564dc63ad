use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, Farmer, FarmerProfile, FarmerStore, LandUnit};
use crate::infrastructure::database::entities::farmer;

pub struct FarmerRepository {
    db: DatabaseConnection,
}

impl FarmerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_unit_to_domain(unit: farmer::LandUnit) -> LandUnit {
    match unit {
        farmer::LandUnit::Acre => LandUnit::Acre,
        farmer::LandUnit::Hectare => LandUnit::Hectare,
    }
}

fn domain_unit_to_entity(unit: LandUnit) -> farmer::LandUnit {
    match unit {
        LandUnit::Acre => farmer::LandUnit::Acre,
        LandUnit::Hectare => farmer::LandUnit::Hectare,
    }
}

fn model_to_domain(model: farmer::Model) -> Farmer {
    Farmer {
        id: model.id,
        full_name: model.full_name,
        phone_number: model.phone_number,
        aadhar_number: model.aadhar_number,
        cultivation_practices: model.cultivation_practices,
        land_area: model.land_area,
        land_unit: model.land_unit.map(entity_unit_to_domain),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

fn insert_err(e: sea_orm::DbErr) -> DomainError {
    if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
        DomainError::Conflict("Phone or Aadhaar number already registered".to_string())
    } else {
        db_err(e)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl FarmerStore for FarmerRepository {
    async fn find_by_phone(&self, phone_number: &str) -> DomainResult<Option<Farmer>> {
        let model = farmer::Entity::find()
            .filter(farmer::Column::PhoneNumber.eq(phone_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn find_by_aadhar(&self, aadhar_number: &str) -> DomainResult<Option<Farmer>> {
        let model = farmer::Entity::find()
            .filter(farmer::Column::AadharNumber.eq(aadhar_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn list(&self) -> DomainResult<Vec<Farmer>> {
        let models = farmer::Entity::find()
            .order_by_desc(farmer::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, profile: FarmerProfile) -> DomainResult<Farmer> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let new_farmer = farmer::ActiveModel {
            id: Set(id),
            full_name: Set(profile.full_name),
            phone_number: Set(profile.phone_number),
            aadhar_number: Set(profile.aadhar_number),
            cultivation_practices: Set(profile.cultivation_practices),
            land_area: Set(profile.land_area),
            land_unit: Set(profile.land_unit.map(domain_unit_to_entity)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_farmer.insert(&self.db).await.map_err(insert_err)?;
        Ok(model_to_domain(model))
    }

    async fn update_by_aadhar(
        &self,
        aadhar_number: &str,
        profile: FarmerProfile,
    ) -> DomainResult<Option<Farmer>> {
        let existing = farmer::Entity::find()
            .filter(farmer::Column::AadharNumber.eq(aadhar_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: farmer::ActiveModel = existing.into();
        active.full_name = Set(profile.full_name);
        active.phone_number = Set(profile.phone_number);
        active.aadhar_number = Set(profile.aadhar_number);
        active.cultivation_practices = Set(profile.cultivation_practices);
        active.land_area = Set(profile.land_area);
        active.land_unit = Set(profile.land_unit.map(domain_unit_to_entity));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(insert_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete_by_aadhar(&self, aadhar_number: &str) -> DomainResult<()> {
        let result = farmer::Entity::delete_many()
            .filter(farmer::Column::AadharNumber.eq(aadhar_number))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(
                "Farmer",
                "aadhar_number",
                aadhar_number,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn repo() -> FarmerRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        FarmerRepository::new(db)
    }

    fn profile(phone: &str, aadhar: &str) -> FarmerProfile {
        FarmerProfile {
            full_name: "Ravi".into(),
            phone_number: phone.into(),
            aadhar_number: aadhar.into(),
            cultivation_practices: None,
            land_area: 2.5,
            land_unit: Some(LandUnit::Acre),
        }
    }

    #[tokio::test]
    async fn create_then_find_by_phone_and_aadhar() {
        let repo = repo().await;
        repo.create(profile("9876543210", "123456789012"))
            .await
            .unwrap();

        let by_phone = repo.find_by_phone("9876543210").await.unwrap().unwrap();
        assert_eq!(by_phone.aadhar_number, "123456789012");

        let by_aadhar = repo.find_by_aadhar("123456789012").await.unwrap().unwrap();
        assert_eq!(by_aadhar.phone_number, "9876543210");
    }

    #[tokio::test]
    async fn duplicate_phone_is_a_conflict() {
        let repo = repo().await;
        repo.create(profile("9876543210", "123456789012"))
            .await
            .unwrap();

        let err = repo
            .create(profile("9876543210", "999999999999"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_replaces_profile_fields() {
        let repo = repo().await;
        repo.create(profile("9876543210", "123456789012"))
            .await
            .unwrap();

        let mut changed = profile("9876543210", "123456789012");
        changed.land_area = 4.0;
        changed.land_unit = Some(LandUnit::Hectare);

        let updated = repo
            .update_by_aadhar("123456789012", changed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.land_area, 4.0);
        assert_eq!(updated.land_unit, Some(LandUnit::Hectare));
    }

    #[tokio::test]
    async fn unknown_aadhar_update_returns_none_and_delete_errors() {
        let repo = repo().await;
        let updated = repo
            .update_by_aadhar("000000000000", profile("9876543210", "000000000000"))
            .await
            .unwrap();
        assert!(updated.is_none());

        let err = repo.delete_by_aadhar("000000000000").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
