#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared fixtures for gateway integration tests.

use std::sync::Arc;

use api_gateway::{ApiGateway, ApiGatewayConfig};
use async_trait::async_trait;
use authn_resolver_sdk::{
    AuthNResolverClient, AuthNResolverError, AuthenticationResult, ManagerInfo, ManagerRouteInfo,
    ManagerSummary,
};
use authz_resolver::AuthZResolver;
use authz_resolver::config::AuthZResolverConfig;
use authz_resolver_sdk::{AuthZResolverClient, SecurityRulesConfig};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use warden_security::{Credential, Environment, Identity};

/// Fixed users: admin/adminpass (ADMIN), user/userpass (USER), and the
/// token `admin-token-123` for admin.
pub struct MockAuthN;

fn accepted(identity: Identity, validator: &str) -> AuthenticationResult {
    AuthenticationResult {
        identity,
        manager: "default".to_owned(),
        validator: validator.to_owned(),
    }
}

#[async_trait]
impl AuthNResolverClient for MockAuthN {
    async fn authenticate(
        &self,
        _request_path: &str,
        credential: &Credential,
    ) -> Result<AuthenticationResult, AuthNResolverError> {
        match credential {
            Credential::UsernamePassword { username, password } => {
                match (username.as_str(), password.expose_secret()) {
                    ("admin", "adminpass") => Ok(accepted(admin(), "basic")),
                    ("user", "userpass") => Ok(accepted(
                        Identity::builder()
                            .principal_name("user")
                            .role("USER")
                            .build()
                            .unwrap(),
                        "basic",
                    )),
                    _ => Err(AuthNResolverError::InvalidCredentials(
                        "invalid username or password".to_owned(),
                    )),
                }
            }
            Credential::BearerToken { token } if token.expose_secret() == "admin-token-123" => {
                Ok(accepted(admin(), "token"))
            }
            Credential::BearerToken { .. } => Err(AuthNResolverError::InvalidCredentials(
                "invalid or expired token".to_owned(),
            )),
        }
    }

    fn managers(&self) -> ManagerSummary {
        ManagerSummary {
            managers: vec![
                ManagerInfo {
                    name: "actuator".to_owned(),
                    validators: vec!["token".to_owned(), "basic".to_owned()],
                },
                ManagerInfo {
                    name: "default".to_owned(),
                    validators: vec!["basic".to_owned()],
                },
            ],
            routes: vec![ManagerRouteInfo {
                path_prefix: "/actuator".to_owned(),
                manager: "actuator".to_owned(),
            }],
            default_manager: "default".to_owned(),
        }
    }
}

fn admin() -> Identity {
    Identity::builder()
        .principal_name("admin")
        .role("ROLE_ADMIN")
        .build()
        .unwrap()
}

/// PROD rules: the demo pages are public or need any login, everything
/// else defaults to ADMIN.
pub fn prod_rules() -> SecurityRulesConfig {
    serde_json::from_value(json!({
        "environments": {
            "PROD": {"default_authenticated": true, "default_roles": ["ROLE_ADMIN"]}
        },
        "endpoints": [
            {"url": "/", "environments": {"PROD": {"rules": [{"authenticated": false}]}}},
            {"url": "/api/public", "environments": {"PROD": {"rules": [{"authenticated": false}]}}},
            {"url": "/actuator/health", "environments": {"PROD": {"rules": [{"authenticated": false}]}}},
            {"url": "/api/secure", "environments": {"PROD": {"rules": [{}]}}},
            {"url": "/api/user-info", "environments": {"PROD": {"rules": [{}]}}}
        ]
    }))
    .unwrap()
}

pub struct TestGateway {
    pub router: Router,
    pub authz: Arc<dyn AuthZResolverClient>,
}

pub fn gateway(config: ApiGatewayConfig) -> TestGateway {
    let authz = AuthZResolver::default()
        .init(
            &AuthZResolverConfig {
                rules: prod_rules(),
            },
            Environment::Prod,
        )
        .unwrap();
    let router = ApiGateway::new(config, Arc::new(MockAuthN), authz.clone())
        .build_router()
        .unwrap();
    TestGateway { router, authz }
}

pub fn default_gateway() -> Router {
    gateway(ApiGatewayConfig::default()).router
}

pub fn debug_gateway() -> TestGateway {
    gateway(ApiGatewayConfig {
        debug_endpoints: true,
        ..ApiGatewayConfig::default()
    })
}

pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with(uri: &str, name: header::HeaderName, value: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
