//! Reusable identity-service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, provider clients, REST API and graceful
//! shutdown — so the binary stays a thin wrapper.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{AdminCredentials, IdentityService, OtpBypass};
use crate::config::AppConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::{
    FarmerRepository, ManagerRepository, SessionRepository,
};
use crate::infrastructure::providers::{GoogleOAuthClient, MailRelayClient, SmsVerifyClient};
use crate::infrastructure::{init_database, DatabaseConfig};
use crate::interfaces::http::{create_api_router, AppIdentityService};
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the identity service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running identity service.
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// API port the server is listening on.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the identity service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations
    /// 3. Wire repositories, provider clients and the identity service
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting Barn Identity Service...");

        // ── Prometheus metrics recorder ────────────────────────
        // The global recorder can only be installed once per process; on
        // restart within the same process it must be reused.
        use std::sync::OnceLock;
        static PROM_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
            OnceLock::new();

        let prometheus_handle = PROM_HANDLE
            .get_or_init(|| {
                metrics_exporter_prometheus::PrometheusBuilder::new()
                    .install_recorder()
                    .expect("Failed to install Prometheus metrics recorder")
            })
            .clone();
        info!("Prometheus metrics recorder ready");

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
        };
        info!("Database: {}", db_config.url);

        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories, providers and the identity service ───
        let managers = Arc::new(ManagerRepository::new(db.clone()));
        let farmers = Arc::new(FarmerRepository::new(db.clone()));
        let sessions = Arc::new(SessionRepository::new(db.clone()));

        let google = Arc::new(GoogleOAuthClient::new(app_cfg.google_settings()));
        let otp = Arc::new(SmsVerifyClient::new(app_cfg.sms_settings()));
        let mailer = Arc::new(MailRelayClient::new(app_cfg.mail_settings()));

        let jwt_config = app_cfg.jwt_config();
        info!(
            "JWT configured: manager {}h, farmer {}h, admin {}h tokens",
            jwt_config.manager_token_hours,
            jwt_config.farmer_token_hours,
            jwt_config.admin_token_hours
        );

        if app_cfg.sms.test_otp_enabled {
            warn!("Test OTP bypass is ENABLED; disable [sms].test_otp_enabled in production");
        }

        let service: Arc<AppIdentityService> = Arc::new(IdentityService::new(
            managers,
            farmers.clone(),
            sessions,
            google,
            otp,
            mailer,
            jwt_config.clone(),
            AdminCredentials {
                email: app_cfg.admin.email.clone(),
                password: app_cfg.admin.password.clone(),
            },
            OtpBypass {
                enabled: app_cfg.sms.test_otp_enabled,
                code: app_cfg.sms.test_otp.clone(),
            },
            app_cfg.email.client_url.clone(),
        ));

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(
            service,
            farmers,
            db.clone(),
            jwt_config,
            prometheus_handle,
        );

        let shutdown = ShutdownSignal::new();
        let api_port = app_cfg.server.api_port;
        let api_addr = format!("{}:{}", app_cfg.server.api_host, api_port);
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("Server started.");

        Ok(Self {
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    pub async fn wait(self) {
        if let Err(e) = self.api_task.await {
            error!("REST API server task panicked: {}", e);
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Barn Identity Service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down Barn Identity Service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
