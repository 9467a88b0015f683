use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use authn_resolver_sdk::{AuthNResolverClient, AuthNResolverError};
use authz_resolver_sdk::{AuthZResolverClient, Decision, DenyReason};
use warden_security::Identity;

use crate::credentials::{CredentialError, extract_credential};
use crate::problem::Problem;

/// Shared state for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    pub authn_client: Arc<dyn AuthNResolverClient>,
    pub authz_client: Arc<dyn AuthZResolverClient>,
    /// Pre-rendered `WWW-Authenticate` challenge.
    pub challenge: HeaderValue,
}

impl AuthState {
    /// # Errors
    ///
    /// Fails when `realm` cannot be carried in a header value.
    pub fn new(
        authn_client: Arc<dyn AuthNResolverClient>,
        authz_client: Arc<dyn AuthZResolverClient>,
        realm: &str,
    ) -> anyhow::Result<Self> {
        let challenge = HeaderValue::from_str(&format!("Basic realm=\"{realm}\""))
            .map_err(|e| anyhow::anyhow!("Invalid realm '{realm}': {e}"))?;
        Ok(Self {
            authn_client,
            authz_client,
            challenge,
        })
    }
}

/// Why authentication did not produce an identity.
enum AuthnFailure {
    Malformed(CredentialError),
    Rejected(AuthNResolverError),
}

impl AuthnFailure {
    fn reason_code(&self) -> &'static str {
        match self {
            Self::Malformed(e) => e.reason_code(),
            Self::Rejected(e) => e.reason_code(),
        }
    }
}

/// Authentication and authorization middleware.
///
/// For each request:
/// 1. Skips CORS preflight requests
/// 2. Extracts the credential and authenticates it against the manager
///    picked for the path
/// 3. Authorizes the identity against the rule table
/// 4. On allow, inserts the `Identity` into request extensions
///
/// A presented credential that fails authentication is denied with the
/// rejection reason, even on public rules. Only requests without any
/// credential continue as anonymous.
pub async fn auth_middleware(
    axum::extract::State(state): axum::extract::State<AuthState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let path = req.uri().path().to_owned();
    let method = req.method().clone();

    let authenticated = authenticate(&state, &path, req.headers()).await;
    let (identity, decision) = match authenticated {
        Ok(identity) => {
            let decision = state.authz_client.authorize(&path, &method, &identity);
            (identity, decision)
        }
        Err(failure) => (
            Identity::anonymous(),
            Decision::Deny(DenyReason::CredentialRejected(
                failure.reason_code().to_owned(),
            )),
        ),
    };

    match decision {
        Decision::Allow => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Decision::Deny(reason) => deny_response(&state, &identity, &reason, &path),
    }
}

async fn authenticate(
    state: &AuthState,
    path: &str,
    headers: &HeaderMap,
) -> Result<Identity, AuthnFailure> {
    let credential = match extract_credential(headers) {
        Ok(Some(credential)) => credential,
        Ok(None) => return Ok(Identity::anonymous()),
        Err(e) => {
            tracing::debug!(error = %e, "malformed credential header");
            return Err(AuthnFailure::Malformed(e));
        }
    };

    match state.authn_client.authenticate(path, &credential).await {
        Ok(result) => {
            tracing::debug!(
                principal = result.identity.principal_name(),
                manager = %result.manager,
                validator = %result.validator,
                "request authenticated"
            );
            Ok(result.identity)
        }
        Err(err) => {
            log_authn_error(&err);
            Err(AuthnFailure::Rejected(err))
        }
    }
}

/// 401 with a challenge for unauthenticated identities, 403 otherwise.
fn deny_response(state: &AuthState, identity: &Identity, reason: &DenyReason, path: &str) -> Response {
    if identity.is_authenticated() {
        tracing::debug!(
            principal = identity.principal_name(),
            reason = reason.as_str(),
            "request forbidden"
        );
        return Problem::new(StatusCode::FORBIDDEN, "Forbidden", reason.as_str())
            .with_instance(path)
            .into_response();
    }

    let mut response = Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", reason.as_str())
        .with_instance(path)
        .into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, state.challenge.clone());
    response
}

/// Log authentication errors at appropriate levels.
///
/// Cognitive complexity is inflated by tracing macro expansion.
#[allow(clippy::cognitive_complexity)]
fn log_authn_error(err: &AuthNResolverError) {
    match err {
        AuthNResolverError::InvalidCredentials(msg) => tracing::debug!("AuthN rejected: {msg}"),
        AuthNResolverError::UnsupportedCredentialType(kind) => {
            tracing::debug!("AuthN rejected: no validator accepts {kind}");
        }
        AuthNResolverError::AggregatedAuthenticationFailure {
            last_reason,
            attempts,
        } => tracing::debug!("AuthN rejected by {attempts} validators, last: {last_reason}"),
        AuthNResolverError::Internal(msg) => tracing::error!("AuthN internal error: {msg}"),
    }
}

/// Check if this is a CORS preflight request
///
/// Preflight requests are OPTIONS requests with:
/// - Origin header present
/// - Access-Control-Request-Method header present
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}
