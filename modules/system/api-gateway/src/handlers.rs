//! Demo endpoints. Their protection comes entirely from the rule table.

use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};
use authn_resolver_sdk::AuthNResolverClient;
use authz_resolver_sdk::{AuthZResolverClient, RuleResolution};
use serde::Serialize;
use warden_security::{Environment, Identity, Role};

/// State shared by the route handlers.
#[derive(Clone)]
pub struct AppState {
    pub authn_client: Arc<dyn AuthNResolverClient>,
    pub authz_client: Arc<dyn AuthZResolverClient>,
}

#[derive(Debug, Serialize)]
pub struct Welcome {
    pub message: &'static str,
    pub endpoints: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PublicMessage {
    pub message: &'static str,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct SecureMessage {
    pub message: &'static str,
    pub user: String,
    pub roles: Vec<Role>,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub roles: Vec<Role>,
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SecurityInfo {
    pub environment: Environment,
    pub default_rule: RuleResolution,
}

pub async fn home() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to Warden",
        endpoints: "/api/public, /api/secure, /api/user-info, /actuator/health, /actuator/security-info",
    })
}

pub async fn public_endpoint() -> Json<PublicMessage> {
    Json(PublicMessage {
        message: "This is a public endpoint",
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

pub async fn secure_endpoint(Extension(identity): Extension<Identity>) -> Json<SecureMessage> {
    Json(SecureMessage {
        message: "This is a secure endpoint",
        user: identity.principal_name().to_owned(),
        roles: identity.roles().iter().cloned().collect(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

pub async fn user_info(Extension(identity): Extension<Identity>) -> Json<UserInfo> {
    Json(UserInfo {
        username: identity.principal_name().to_owned(),
        roles: identity.roles().iter().cloned().collect(),
        authenticated: identity.is_authenticated(),
    })
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "UP" })
}

pub async fn security_info(State(state): State<AppState>) -> Json<SecurityInfo> {
    Json(SecurityInfo {
        environment: state.authz_client.environment(),
        default_rule: state.authz_client.default_rule(),
    })
}
