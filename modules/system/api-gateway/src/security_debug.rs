//! Rule table inspection and replacement, plus authentication manager
//! introspection. Mounted under `/actuator/security` when `debug_endpoints`
//! is enabled.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use authn_resolver_sdk::ManagerSummary;
use authz_resolver_sdk::{
    AuthZResolverError, RuleResolution, RuleSource, SecurityRule, SecurityRulesConfig,
    parse_method,
};
use serde::{Deserialize, Serialize};
use warden_security::Environment;

use crate::handlers::AppState;
use crate::problem::Problem;

#[derive(Debug, Serialize)]
pub struct SecurityConfigView {
    pub environment: Environment,
    pub default_rule: RuleResolution,
    pub rules: SecurityRulesConfig,
}

#[derive(Debug, Deserialize)]
pub struct RuleTestQuery {
    pub url: String,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RuleTestResult {
    pub url: String,
    pub method: String,
    pub environment: Environment,
    pub rule: SecurityRule,
    pub source: RuleSource,
    /// `true` when an endpoint pattern supplied the rule rather than a default.
    pub configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct ManagerQuery {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ManagerDetection {
    pub path: String,
    pub manager: String,
}

#[derive(Debug, Serialize)]
pub struct ManagersView {
    #[serde(flatten)]
    pub summary: ManagerSummary,
    /// Present when the request named a `path` to resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected: Option<ManagerDetection>,
}

#[derive(Debug, Serialize)]
pub struct ReplaceResult {
    pub status: &'static str,
    pub endpoints: usize,
}

pub async fn security_config(State(state): State<AppState>) -> Json<SecurityConfigView> {
    Json(SecurityConfigView {
        environment: state.authz_client.environment(),
        default_rule: state.authz_client.default_rule(),
        rules: state.authz_client.current_rules(),
    })
}

/// Configured authentication managers, their validators and routes.
/// With `?path=`, also reports which manager that path resolves to.
pub async fn authentication_managers(
    State(state): State<AppState>,
    Query(query): Query<ManagerQuery>,
) -> Json<ManagersView> {
    let summary = state.authn_client.managers();
    let detected = query.path.map(|path| ManagerDetection {
        manager: summary.manager_for(&path).to_owned(),
        path,
    });
    Json(ManagersView { summary, detected })
}

/// Which rule applies to `url` and `method` (default `GET`).
///
/// # Errors
///
/// 400 when `method` is not a valid HTTP method.
pub async fn test_rule(
    State(state): State<AppState>,
    Query(query): Query<RuleTestQuery>,
) -> Result<Json<RuleTestResult>, Problem> {
    let method_name = query.method.as_deref().unwrap_or("GET");
    let method = parse_method(method_name).map_err(|bad| {
        Problem::new(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            format!("invalid HTTP method '{bad}'"),
        )
    })?;

    let resolution = state.authz_client.resolve_rule(&query.url, &method);
    let configured = resolution.is_configured();
    Ok(Json(RuleTestResult {
        url: query.url,
        method: method.as_str().to_owned(),
        environment: state.authz_client.environment(),
        rule: resolution.rule,
        source: resolution.source,
        configured,
    }))
}

/// Swap in a new rule table. The current table stays in effect on error.
///
/// # Errors
///
/// 422 for an unparsable or malformed document.
pub async fn replace_rules(
    State(state): State<AppState>,
    payload: Result<Json<SecurityRulesConfig>, JsonRejection>,
) -> Result<Json<ReplaceResult>, Problem> {
    let Json(config) = payload.map_err(|rejection| {
        Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Malformed Rule Configuration",
            rejection.body_text(),
        )
    })?;

    match state.authz_client.replace_rules(&config) {
        Ok(()) => Ok(Json(ReplaceResult {
            status: "replaced",
            endpoints: config.endpoints.len(),
        })),
        Err(AuthZResolverError::MalformedRuleConfiguration(detail)) => Err(Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Malformed Rule Configuration",
            detail,
        )),
        Err(AuthZResolverError::Internal(detail)) => {
            tracing::error!(%detail, "rule replacement failed");
            Err(Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "rule replacement failed",
            ))
        }
    }
}
