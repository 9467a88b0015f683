//! API Gateway module definition

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::{HeaderName, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use axum::{Router, extract::DefaultBodyLimit};
use authn_resolver_sdk::AuthNResolverClient;
use authz_resolver_sdk::AuthZResolverClient;
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::ApiGatewayConfig;
use crate::handlers::{self, AppState};
use crate::{auth, cors, security_debug};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Owns the HTTP server and the router built around the two resolvers.
pub struct ApiGateway {
    config: ApiGatewayConfig,
    authn_client: Arc<dyn AuthNResolverClient>,
    authz_client: Arc<dyn AuthZResolverClient>,
}

impl ApiGateway {
    #[must_use]
    pub fn new(
        config: ApiGatewayConfig,
        authn_client: Arc<dyn AuthNResolverClient>,
        authz_client: Arc<dyn AuthZResolverClient>,
    ) -> Self {
        Self {
            config,
            authn_client,
            authz_client,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiGatewayConfig {
        &self.config
    }

    /// Build the router with the full middleware stack.
    ///
    /// # Errors
    /// Returns an error if the middleware stack cannot be assembled.
    pub fn build_router(&self) -> Result<Router> {
        let state = AppState {
            authn_client: self.authn_client.clone(),
            authz_client: self.authz_client.clone(),
        };

        let mut router = Router::new()
            .route("/", get(handlers::home))
            .route("/api/public", get(handlers::public_endpoint))
            .route("/api/secure", get(handlers::secure_endpoint))
            .route("/api/user-info", get(handlers::user_info))
            .route("/actuator/health", get(handlers::health))
            .route("/actuator/security-info", get(handlers::security_info));

        if self.config.debug_endpoints {
            tracing::warn!("Security debug endpoints are enabled under /actuator/security");
            router = router
                .route(
                    "/actuator/security/config",
                    get(security_debug::security_config),
                )
                .route("/actuator/security/test", get(security_debug::test_rule))
                .route(
                    "/actuator/security/managers",
                    get(security_debug::authentication_managers),
                )
                .route("/actuator/security/rules", put(security_debug::replace_rules));
        }

        self.apply_middleware_stack(router.with_state(state))
    }

    /// Apply all middleware layers to a router (request ID, tracing, timeout, body limit, CORS, auth)
    fn apply_middleware_stack(&self, mut router: Router) -> Result<Router> {
        // `Router::layer` wraps: the last layer added runs first on the request path.
        //
        // Request execution order (outermost -> innermost):
        // SetRequestId -> PropagateRequestId -> Trace -> Timeout -> BodyLimit -> CORS -> Auth -> Router
        let config = &self.config;

        // 5) Auth
        let auth_state = auth::AuthState::new(
            self.authn_client.clone(),
            self.authz_client.clone(),
            &config.realm,
        )?;
        router = router.layer(from_fn_with_state(auth_state, auth::auth_middleware));

        // 4) CORS (outer to auth so OPTIONS preflight short-circuits)
        if config.cors_enabled {
            router = router.layer(cors::build_cors_layer(config));
        }

        // 3) Body limit
        router = router.layer(RequestBodyLimitLayer::new(config.defaults.body_limit_bytes));
        router = router.layer(DefaultBodyLimit::max(config.defaults.body_limit_bytes));

        // 2) Timeout
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(config.defaults.request_timeout_secs),
        ));

        // 1) Trace
        router = router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                    let rid = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");

                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        module = "api_gateway",
                        request_id = %rid,
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<axum::body::Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                    },
                ),
        );

        // 0) Request ID: generate x-request-id if missing, then propagate it to the response.
        let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

        Ok(router)
    }

    /// Parse bind address from configuration string.
    fn parse_bind_address(bind_addr: &str) -> Result<SocketAddr> {
        bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
    }

    /// Bind and serve until `cancel` fires.
    ///
    /// # Errors
    /// Fails on an invalid bind address, a bind failure or a server error.
    pub async fn serve(&self, cancel: CancellationToken) -> Result<()> {
        let addr = Self::parse_bind_address(&self.config.bind_addr)?;
        let router = self.build_router()?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            %addr,
            environment = %self.authz_client.environment(),
            "HTTP server bound"
        );

        // Graceful shutdown on cancel
        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
