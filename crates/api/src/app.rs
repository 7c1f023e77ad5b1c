use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    is_logged_in, metrics_handler, metrics_middleware, protect, require_admin,
    security_headers_middleware, trace_id, OtpVerifyLimiter,
};
use crate::routes::{auth, events, health, host};
use crate::services::{
    AuthService, EmailSender, EmailService, EventService, IdentityResolver,
    NotificationPreferencesService, OtpLedger, SessionIssuer, SmsSender, SmsService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub sessions: SessionIssuer,
    pub email: Arc<dyn EmailSender>,
    pub sms: Arc<dyn SmsSender>,
    pub otp_limiter: Option<Arc<OtpVerifyLimiter>>,
}

impl AppState {
    /// State with the configured mail and SMS providers.
    pub fn new(config: Config, pool: PgPool) -> Self {
        let email: Arc<dyn EmailSender> = Arc::new(EmailService::new(config.email.clone()));
        let sms: Arc<dyn SmsSender> = Arc::new(SmsService::new(config.sms.clone()));
        Self::with_senders(config, pool, email, sms)
    }

    pub fn with_senders(
        config: Config,
        pool: PgPool,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
    ) -> Self {
        let otp_limiter = OtpVerifyLimiter::new(config.security.otp_verify_per_minute).map(Arc::new);

        Self {
            pool,
            sessions: SessionIssuer::from_config(&config.jwt),
            config: Arc::new(config),
            email,
            sms,
            otp_limiter,
        }
    }

    pub fn otp_ledger(&self) -> OtpLedger {
        OtpLedger::new(self.pool.clone(), self.config.otp.ttl_secs)
    }

    pub fn identity(&self) -> IdentityResolver {
        IdentityResolver::new(self.pool.clone())
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.pool.clone(),
            self.otp_ledger(),
            Arc::clone(&self.email),
            Arc::clone(&self.sms),
            self.config.server.frontend_url.clone(),
        )
    }

    pub fn event_service(&self) -> EventService {
        EventService::new(self.pool.clone())
    }

    pub fn notification_service(&self) -> NotificationPreferencesService {
        NotificationPreferencesService::new(self.pool.clone())
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    router(AppState::new(config, pool))
}

pub fn router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let public_routes = Router::new()
        .route("/api/auth/signup/host", post(auth::signup_host))
        .route("/api/auth/signup/vendor", post(auth::signup_vendor))
        .route("/api/auth/signup/whitelabel", post(auth::signup_white_label))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/send-otp", post(auth::send_otp))
        .route("/api/auth/verify-otp", post(auth::verify_otp))
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/forgotPassword", post(auth::forgot_password))
        .route("/api/auth/resetPassword/:token", patch(auth::reset_password));

    let soft_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), is_logged_in));

    let protected_routes = Router::new()
        .route(
            "/api/auth/complete-host-profile",
            patch(auth::complete_host_profile),
        )
        .route("/api/auth/updateMyPassword", patch(auth::update_password))
        .route(
            "/api/host/notifications",
            get(host::get_notifications).patch(host::update_notifications),
        )
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route("/api/events/upcoming", get(events::upcoming_events))
        .route("/api/events/my-events", get(events::my_events))
        .route("/api/events/host/:host_id", get(events::host_events))
        .route("/api/events/:id/stats", get(events::event_stats))
        .route("/api/events/:id/status", patch(events::update_event_status))
        .route(
            "/api/events/:id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/api/events/:id/guests/:guest_id/status",
            patch(events::update_guest_status),
        )
        .route(
            "/api/events/:id/guests/:guest_id/check-in",
            post(events::check_in_guest),
        )
        .route(
            "/api/events/:id/guests/:guest_id/invitation",
            post(events::send_invitation),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), protect));

    // Layers run bottom-up: protect resolves the account, then the role check.
    let admin_routes = Router::new()
        .route(
            "/api/events/admin/delete-all",
            delete(events::delete_all_events),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), protect));

    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(soft_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .merge(ops_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
