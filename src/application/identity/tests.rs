//! Identity service tests against in-memory stores and recording provider
//! fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::identity::{AdminCredentials, IdentityService, OtpBypass};
use crate::application::ports::{
    GoogleAuthProvider, GoogleProfile, Mailer, OtpDelivery, OtpProvider,
};
use crate::domain::{
    CreateManager, DomainError, DomainResult, Farmer, FarmerProfile, FarmerStore, LoginMethod,
    LoginSession, Manager, ManagerPatch, ManagerStore, Role, SessionLedger,
};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};

// ── In-memory stores ────────────────────────────────────────────

#[derive(Default)]
struct MemoryManagers {
    rows: Mutex<Vec<Manager>>,
}

#[async_trait]
impl ManagerStore for MemoryManagers {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Manager>> {
        let email = email.to_lowercase();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Manager>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn create(&self, fields: CreateManager) -> DomainResult<Manager> {
        let mut rows = self.rows.lock().unwrap();
        let email = fields.email.to_lowercase();
        if rows.iter().any(|m| m.email == email) {
            return Err(DomainError::Conflict("Manager already exists".into()));
        }
        let now = Utc::now();
        let manager = Manager {
            id: format!("mgr-{}", rows.len() + 1),
            name: fields.name,
            email,
            phone_number: fields.phone_number,
            password_hash: fields.password_hash,
            google_id: fields.google_id,
            is_google_account: fields.is_google_account,
            is_authorized: false,
            created_at: now,
            updated_at: now,
        };
        rows.push(manager.clone());
        Ok(manager)
    }

    async fn set_password_hash(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::not_found("Manager", "id", id))?;
        row.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn apply_patch(&self, id: &str, patch: ManagerPatch) -> DomainResult<Option<Manager>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(email) = patch.email {
            row.email = email.to_lowercase();
        }
        if let Some(phone_number) = patch.phone_number {
            row.phone_number = Some(phone_number);
        }
        if let Some(is_authorized) = patch.is_authorized {
            row.is_authorized = is_authorized;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        if rows.len() == before {
            return Err(DomainError::not_found("Manager", "id", id));
        }
        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<Manager>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

#[derive(Default)]
struct MemoryFarmers {
    rows: Mutex<Vec<Farmer>>,
}

impl MemoryFarmers {
    fn seed(&self, phone: &str, aadhar: &str) -> Farmer {
        let now = Utc::now();
        let farmer = Farmer {
            id: format!("frm-{}", phone),
            full_name: "Ravi".into(),
            phone_number: phone.into(),
            aadhar_number: aadhar.into(),
            cultivation_practices: None,
            land_area: 2.0,
            land_unit: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(farmer.clone());
        farmer
    }
}

#[async_trait]
impl FarmerStore for MemoryFarmers {
    async fn find_by_phone(&self, phone_number: &str) -> DomainResult<Option<Farmer>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.phone_number == phone_number)
            .cloned())
    }

    async fn find_by_aadhar(&self, aadhar_number: &str) -> DomainResult<Option<Farmer>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.aadhar_number == aadhar_number)
            .cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Farmer>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, profile: FarmerProfile) -> DomainResult<Farmer> {
        Ok(self.seed(&profile.phone_number, &profile.aadhar_number))
    }

    async fn update_by_aadhar(
        &self,
        _aadhar_number: &str,
        _profile: FarmerProfile,
    ) -> DomainResult<Option<Farmer>> {
        Ok(None)
    }

    async fn delete_by_aadhar(&self, _aadhar_number: &str) -> DomainResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct MemoryLedger {
    rows: Mutex<Vec<LoginSession>>,
    fail_writes: bool,
}

#[async_trait]
impl SessionLedger for MemoryLedger {
    async fn record_login(
        &self,
        principal_id: &str,
        role: Role,
        method: LoginMethod,
        login_time: DateTime<Utc>,
    ) -> DomainResult<LoginSession> {
        if self.fail_writes {
            return Err(DomainError::Internal("ledger unavailable".into()));
        }
        let mut rows = self.rows.lock().unwrap();
        let session = LoginSession {
            id: format!("ses-{}", rows.len() + 1),
            principal_id: principal_id.to_string(),
            role,
            method,
            login_time,
            logout_time: None,
        };
        rows.push(session.clone());
        Ok(session)
    }

    async fn close_latest(
        &self,
        principal_id: &str,
        logout_time: DateTime<Utc>,
    ) -> DomainResult<Option<LoginSession>> {
        let mut rows = self.rows.lock().unwrap();
        let latest = rows
            .iter_mut()
            .filter(|s| s.principal_id == principal_id)
            .max_by_key(|s| s.login_time);
        Ok(latest.map(|s| {
            s.logout_time = Some(logout_time);
            s.clone()
        }))
    }

    async fn latest_for_principal(
        &self,
        principal_id: &str,
    ) -> DomainResult<Option<LoginSession>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|s| s.principal_id == principal_id)
            .max_by_key(|s| s.login_time)
            .cloned())
    }
}

// ── Provider fakes ──────────────────────────────────────────────

struct FakeGoogle {
    profile: Option<GoogleProfile>,
}

#[async_trait]
impl GoogleAuthProvider for FakeGoogle {
    async fn exchange_code(&self, _code: &str) -> DomainResult<GoogleProfile> {
        self.profile
            .clone()
            .ok_or_else(|| DomainError::Upstream("Google OAuth: exchange failed".into()))
    }
}

#[derive(Default)]
struct FakeOtp {
    /// When set, every provider call fails (provider outage).
    unreachable: bool,
    /// Code the provider-side check approves.
    approves: Option<String>,
    send_calls: AtomicUsize,
    check_calls: AtomicUsize,
}

#[async_trait]
impl OtpProvider for FakeOtp {
    async fn send_code(&self, phone_e164: &str) -> DomainResult<OtpDelivery> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(DomainError::Upstream("SMS verification: unreachable".into()));
        }
        Ok(OtpDelivery {
            status: "pending".into(),
            to: phone_e164.to_string(),
        })
    }

    async fn check_code(&self, _phone_e164: &str, code: &str) -> DomainResult<bool> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(DomainError::Upstream("SMS verification: unreachable".into()));
        }
        Ok(self.approves.as_deref() == Some(code))
    }
}

#[derive(Default)]
struct FakeMailer {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, to: &str, _subject: &str, html_body: &str) -> DomainResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), html_body.to_string()));
        Ok(())
    }
}

// ── Harness ─────────────────────────────────────────────────────

struct Harness {
    managers: Arc<MemoryManagers>,
    farmers: Arc<MemoryFarmers>,
    ledger: Arc<MemoryLedger>,
    otp: Arc<FakeOtp>,
    mailer: Arc<FakeMailer>,
    service: IdentityService<MemoryManagers, MemoryFarmers, MemoryLedger>,
}

fn harness_with(
    jwt: JwtConfig,
    ledger: MemoryLedger,
    google: FakeGoogle,
    otp: FakeOtp,
) -> Harness {
    let managers = Arc::new(MemoryManagers::default());
    let farmers = Arc::new(MemoryFarmers::default());
    let ledger = Arc::new(ledger);
    let otp = Arc::new(otp);
    let mailer = Arc::new(FakeMailer::default());

    let service = IdentityService::new(
        managers.clone(),
        farmers.clone(),
        ledger.clone(),
        Arc::new(google),
        otp.clone(),
        mailer.clone(),
        jwt,
        AdminCredentials {
            email: "root@example.com".into(),
            password: "root-password".into(),
        },
        OtpBypass::default(),
        "https://app.example.com".into(),
    );

    Harness {
        managers,
        farmers,
        ledger,
        otp,
        mailer,
        service,
    }
}

fn harness() -> Harness {
    harness_with(
        JwtConfig::default(),
        MemoryLedger::default(),
        FakeGoogle { profile: None },
        FakeOtp::default(),
    )
}

// ── Manager password protocol ───────────────────────────────────

#[tokio::test]
async fn login_token_mirrors_stored_authorization_flag() {
    let h = harness();
    let created = h
        .service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    h.managers
        .apply_patch(
            &created.id,
            ManagerPatch {
                is_authorized: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let issued = h.service.login_manager("a@x.com", "secret1").await.unwrap();
    let decoded = verify_token(&issued.token, h.service.jwt_config()).unwrap();
    assert_eq!(decoded.role, "manager");
    assert_eq!(decoded.sub, created.id);
    assert!(decoded.is_authorized);
}

#[tokio::test]
async fn registration_returns_no_token_and_login_roundtrips() {
    let h = harness();
    h.service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    let issued = h.service.login_manager("a@x.com", "secret1").await.unwrap();
    let decoded = verify_token(&issued.token, h.service.jwt_config()).unwrap();
    assert_eq!(decoded.email.as_deref(), Some("a@x.com"));
}

#[tokio::test]
async fn unknown_email_login_is_not_found() {
    let h = harness();
    let err = h
        .service
        .login_manager("nobody@x.com", "secret1")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(h.ledger.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_is_unauthorized_and_unrecorded() {
    let h = harness();
    h.service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    let err = h
        .service
        .login_manager("a@x.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
    assert!(h.ledger.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_registration_conflicts_every_time() {
    let h = harness();
    h.service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    for _ in 0..3 {
        let err = h
            .service
            .register_manager("Asha", "a@x.com", None, "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
    assert_eq!(h.managers.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn successful_login_writes_a_password_session() {
    let h = harness();
    let created = h
        .service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();
    h.service.login_manager("a@x.com", "secret1").await.unwrap();

    let rows = h.ledger.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].principal_id, created.id);
    assert_eq!(rows[0].role, Role::Manager);
    assert_eq!(rows[0].method, LoginMethod::Password);
    assert!(rows[0].logout_time.is_none());
}

#[tokio::test]
async fn token_issued_even_when_ledger_fails() {
    let h = harness_with(
        JwtConfig::default(),
        MemoryLedger {
            fail_writes: true,
            ..Default::default()
        },
        FakeGoogle { profile: None },
        FakeOtp::default(),
    );
    h.service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    let issued = h.service.login_manager("a@x.com", "secret1").await.unwrap();
    assert!(verify_token(&issued.token, h.service.jwt_config()).is_ok());
    assert!(h.ledger.rows.lock().unwrap().is_empty());
}

// ── Google protocol ─────────────────────────────────────────────

fn google_profile() -> FakeGoogle {
    FakeGoogle {
        profile: Some(GoogleProfile {
            email: "g@x.com".into(),
            name: "Gita".into(),
            subject: "google-sub-1".into(),
        }),
    }
}

#[tokio::test]
async fn google_sign_in_registers_then_reuses_by_email() {
    let h = harness_with(
        JwtConfig::default(),
        MemoryLedger::default(),
        google_profile(),
        FakeOtp::default(),
    );

    let first = h.service.google_sign_in("code").await.unwrap();
    let second = h.service.google_sign_in("code").await.unwrap();

    let managers = h.managers.rows.lock().unwrap();
    assert_eq!(managers.len(), 1);
    assert!(managers[0].is_google_account);
    assert!(managers[0].password_hash.is_empty());
    assert_eq!(managers[0].google_id.as_deref(), Some("google-sub-1"));
    drop(managers);

    assert_eq!(first.claims.sub, second.claims.sub);

    let rows = h.ledger.rows.lock().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|s| s.method == LoginMethod::Google));
}

#[tokio::test]
async fn google_failure_surfaces_as_upstream() {
    let h = harness();
    let err = h.service.google_sign_in("bad-code").await.unwrap_err();
    assert!(matches!(err, DomainError::Upstream(_)));
}

#[tokio::test]
async fn google_account_cannot_password_login() {
    let h = harness_with(
        JwtConfig::default(),
        MemoryLedger::default(),
        google_profile(),
        FakeOtp::default(),
    );
    h.service.google_sign_in("code").await.unwrap();

    let err = h
        .service
        .login_manager("g@x.com", "anything")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

// ── Farmer OTP protocol ─────────────────────────────────────────

#[tokio::test]
async fn send_otp_normalizes_to_e164() {
    let h = harness();
    h.farmers.seed("9876543210", "123456789012");

    let delivery = h.service.send_otp("9876543210").await.unwrap();
    assert_eq!(delivery.to, "+919876543210");
    assert_eq!(h.otp.send_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_phone_never_reaches_the_provider() {
    let h = harness();

    let err = h.service.send_otp("9999999999").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = h.service.verify_otp("9999999999", "123456").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    assert_eq!(h.otp.send_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.otp.check_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_code_verifies_even_when_provider_is_down() {
    let h = harness_with(
        JwtConfig::default(),
        MemoryLedger::default(),
        FakeGoogle { profile: None },
        FakeOtp {
            unreachable: true,
            ..Default::default()
        },
    );
    h.farmers.seed("9876543210", "123456789012");

    // Delivery fails upstream...
    let err = h.service.send_otp("9876543210").await.unwrap_err();
    assert!(matches!(err, DomainError::Upstream(_)));

    // ...but the bypass code still verifies, with no provider check.
    let issued = h.service.verify_otp("9876543210", "123456").await.unwrap();
    assert_eq!(h.otp.check_calls.load(Ordering::SeqCst), 0);
    assert_eq!(issued.expires_in, 3600);

    let decoded = verify_token(&issued.token, h.service.jwt_config()).unwrap();
    assert_eq!(decoded.role, "farmer");
    assert_eq!(decoded.phone_number.as_deref(), Some("9876543210"));
    assert_eq!(decoded.aadhar_number.as_deref(), Some("123456789012"));
}

#[tokio::test]
async fn provider_path_approves_and_rejects() {
    let h = harness_with(
        JwtConfig::default(),
        MemoryLedger::default(),
        FakeGoogle { profile: None },
        FakeOtp {
            approves: Some("445566".into()),
            ..Default::default()
        },
    );
    h.farmers.seed("9876543210", "123456789012");

    let err = h.service.verify_otp("9876543210", "000000").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let issued = h.service.verify_otp("9876543210", "445566").await.unwrap();
    let decoded = verify_token(&issued.token, h.service.jwt_config()).unwrap();
    assert_eq!(decoded.role, "farmer");

    let rows = h.ledger.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].method, LoginMethod::Phone);
    assert_eq!(rows[0].role, Role::Farmer);
}

#[tokio::test]
async fn logout_stamps_latest_session() {
    let h = harness();
    let farmer = h.farmers.seed("9876543210", "123456789012");

    let issued = h.service.verify_otp("9876543210", "123456").await.unwrap();
    h.service.logout_farmer(&issued.token).await.unwrap();

    let latest = h
        .ledger
        .latest_for_principal(&farmer.id)
        .await
        .unwrap()
        .unwrap();
    assert!(latest.logout_time.is_some());
}

#[tokio::test]
async fn logout_without_sessions_still_succeeds() {
    let h = harness_with(
        JwtConfig::default(),
        MemoryLedger {
            fail_writes: true,
            ..Default::default()
        },
        FakeGoogle { profile: None },
        FakeOtp::default(),
    );
    h.farmers.seed("9876543210", "123456789012");

    let issued = h.service.verify_otp("9876543210", "123456").await.unwrap();
    // Ledger write failed at login; logout is advisory and still succeeds.
    h.service.logout_farmer(&issued.token).await.unwrap();
}

#[tokio::test]
async fn logout_rejects_garbage_tokens() {
    let h = harness();
    let err = h.service.logout_farmer("not-a-token").await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

// ── Administrator protocol ──────────────────────────────────────

#[tokio::test]
async fn admin_login_is_stateless() {
    let h = harness();
    let issued = h
        .service
        .admin_login("root@example.com", "root-password")
        .unwrap();

    let decoded = verify_token(&issued.token, h.service.jwt_config()).unwrap();
    assert!(decoded.is_admin());
    assert_eq!(issued.expires_in, 2 * 3600);
    assert!(h.ledger.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn admin_login_mismatch_is_unauthorized() {
    let h = harness();
    let err = h
        .service
        .admin_login("root@example.com", "wrong")
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

// ── Password reset ──────────────────────────────────────────────

fn token_from_reset_mail(html: &str) -> String {
    let start = html.find("/reset-password/").unwrap() + "/reset-password/".len();
    let rest = &html[start..];
    let end = rest.find('"').unwrap();
    rest[..end].to_string()
}

#[tokio::test]
async fn forgot_then_reset_password_roundtrip() {
    let h = harness();
    h.service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    h.service.forgot_password("a@x.com").await.unwrap();

    let sent = h.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "a@x.com");
    let token = token_from_reset_mail(&sent[0].1);
    drop(sent);

    h.service.reset_password(&token, "secret2").await.unwrap();

    assert!(h.service.login_manager("a@x.com", "secret1").await.is_err());
    assert!(h.service.login_manager("a@x.com", "secret2").await.is_ok());
}

#[tokio::test]
async fn forgot_password_for_unknown_email_is_not_found() {
    let h = harness();
    let err = h.service.forgot_password("nobody@x.com").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(h.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn expired_reset_token_is_rejected_even_for_live_accounts() {
    let jwt = JwtConfig {
        reset_token_minutes: -5,
        ..JwtConfig::default()
    };
    let h = harness_with(
        jwt,
        MemoryLedger::default(),
        FakeGoogle { profile: None },
        FakeOtp::default(),
    );
    h.service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    h.service.forgot_password("a@x.com").await.unwrap();
    let token = token_from_reset_mail(&h.mailer.sent.lock().unwrap()[0].1);

    let err = h.service.reset_password(&token, "secret2").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn login_token_cannot_reset_a_password() {
    let h = harness();
    h.service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();
    let issued = h.service.login_manager("a@x.com", "secret1").await.unwrap();

    let err = h
        .service
        .reset_password(&issued.token, "secret2")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

// ── Change password ─────────────────────────────────────────────

#[tokio::test]
async fn change_password_verifies_the_current_one() {
    let h = harness();
    let created = h
        .service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    let err = h
        .service
        .change_password(&created.id, "wrong", "secret2")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));

    h.service
        .change_password(&created.id, "secret1", "secret2")
        .await
        .unwrap();
    assert!(h.service.login_manager("a@x.com", "secret2").await.is_ok());
}

#[tokio::test]
async fn google_accounts_cannot_change_passwords() {
    let h = harness_with(
        JwtConfig::default(),
        MemoryLedger::default(),
        google_profile(),
        FakeOtp::default(),
    );
    let issued = h.service.google_sign_in("code").await.unwrap();

    let err = h
        .service
        .change_password(&issued.claims.sub, "", "secret2")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

// ── Manager record management ───────────────────────────────────

#[tokio::test]
async fn edit_manager_flips_authorization() {
    let h = harness();
    let created = h
        .service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    let updated = h
        .service
        .edit_manager(
            &created.id,
            ManagerPatch {
                is_authorized: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_authorized);
}

#[tokio::test]
async fn update_profile_resolves_by_email_and_keeps_authorization() {
    let h = harness();
    h.service
        .register_manager("Asha", "a@x.com", None, "secret1")
        .await
        .unwrap();

    let updated = h
        .service
        .update_profile("a@x.com", Some("Asha K".into()), Some("9876543211".into()))
        .await
        .unwrap();
    assert_eq!(updated.name, "Asha K");
    assert_eq!(updated.phone_number.as_deref(), Some("9876543211"));
    assert!(!updated.is_authorized);
}
