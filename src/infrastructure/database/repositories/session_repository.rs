use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, LoginMethod, LoginSession, Role, SessionLedger};
use crate::infrastructure::database::entities::session;

pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: session::Role) -> Role {
    match role {
        session::Role::Manager => Role::Manager,
        session::Role::Farmer => Role::Farmer,
    }
}

fn domain_role_to_entity(role: Role) -> DomainResult<session::Role> {
    match role {
        Role::Manager => Ok(session::Role::Manager),
        Role::Farmer => Ok(session::Role::Farmer),
        // Administrator logins are stateless and never reach the ledger.
        Role::Admin => Err(DomainError::Validation(
            "Admin logins are not recorded in the session ledger".to_string(),
        )),
    }
}

fn entity_method_to_domain(method: session::Method) -> LoginMethod {
    match method {
        session::Method::Password => LoginMethod::Password,
        session::Method::Google => LoginMethod::Google,
        session::Method::Phone => LoginMethod::Phone,
    }
}

fn domain_method_to_entity(method: LoginMethod) -> session::Method {
    match method {
        LoginMethod::Password => session::Method::Password,
        LoginMethod::Google => session::Method::Google,
        LoginMethod::Phone => session::Method::Phone,
    }
}

fn model_to_domain(model: session::Model) -> LoginSession {
    LoginSession {
        id: model.id,
        principal_id: model.principal_id,
        role: entity_role_to_domain(model.role),
        method: entity_method_to_domain(model.method),
        login_time: model.login_time,
        logout_time: model.logout_time,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl SessionLedger for SessionRepository {
    async fn record_login(
        &self,
        principal_id: &str,
        role: Role,
        method: LoginMethod,
        login_time: DateTime<Utc>,
    ) -> DomainResult<LoginSession> {
        let new_session = session::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            principal_id: Set(principal_id.to_string()),
            role: Set(domain_role_to_entity(role)?),
            method: Set(domain_method_to_entity(method)),
            login_time: Set(login_time),
            logout_time: Set(None),
        };

        let model = new_session.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn close_latest(
        &self,
        principal_id: &str,
        logout_time: DateTime<Utc>,
    ) -> DomainResult<Option<LoginSession>> {
        let latest = session::Entity::find()
            .filter(session::Column::PrincipalId.eq(principal_id))
            .order_by_desc(session::Column::LoginTime)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(latest) = latest else {
            return Ok(None);
        };

        let mut active: session::ActiveModel = latest.into();
        active.logout_time = Set(Some(logout_time));
        let updated = active.update(&self.db).await.map_err(db_err)?;

        Ok(Some(model_to_domain(updated)))
    }

    async fn latest_for_principal(
        &self,
        principal_id: &str,
    ) -> DomainResult<Option<LoginSession>> {
        let model = session::Entity::find()
            .filter(session::Column::PrincipalId.eq(principal_id))
            .order_by_desc(session::Column::LoginTime)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use chrono::Duration;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn repo() -> SessionRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SessionRepository::new(db)
    }

    #[tokio::test]
    async fn login_then_logout_stamps_latest_session() {
        let repo = repo().await;
        let earlier = Utc::now() - Duration::hours(1);
        let later = Utc::now();

        repo.record_login("frm-1", Role::Farmer, LoginMethod::Phone, earlier)
            .await
            .unwrap();
        let latest = repo
            .record_login("frm-1", Role::Farmer, LoginMethod::Phone, later)
            .await
            .unwrap();

        let logout_at = Utc::now();
        let closed = repo.close_latest("frm-1", logout_at).await.unwrap().unwrap();
        assert_eq!(closed.id, latest.id);
        assert!(closed.logout_time.is_some());

        // The earlier session stays open.
        let reloaded_latest = repo.latest_for_principal("frm-1").await.unwrap().unwrap();
        assert_eq!(reloaded_latest.id, latest.id);
    }

    #[tokio::test]
    async fn close_latest_without_sessions_is_a_noop() {
        let repo = repo().await;
        let closed = repo.close_latest("nobody", Utc::now()).await.unwrap();
        assert!(closed.is_none());
    }

    #[tokio::test]
    async fn admin_logins_are_rejected_by_the_ledger() {
        let repo = repo().await;
        let err = repo
            .record_login("admin", Role::Admin, LoginMethod::Password, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
