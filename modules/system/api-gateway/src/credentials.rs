//! Credential extraction from request headers.
//!
//! A non-blank `X-API-Token` wins over `Authorization`; a blank one is
//! ignored. `Authorization` schemes other than `Basic` and `Bearer` are
//! ignored and the request proceeds without a credential.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use warden_security::Credential;

/// Header carrying an opaque API token.
pub const API_TOKEN_HEADER: &str = "x-api-token";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("malformed {scheme} credentials: {detail}")]
    Malformed {
        scheme: &'static str,
        detail: &'static str,
    },
}

impl CredentialError {
    /// Short reason reported to the client.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed credentials",
        }
    }
}

/// Extract the request credential, if any.
///
/// # Errors
///
/// `CredentialError::Malformed` when a recognised scheme carries an
/// unusable value.
pub fn extract_credential(headers: &HeaderMap) -> Result<Option<Credential>, CredentialError> {
    if let Some(value) = headers.get(API_TOKEN_HEADER) {
        let token = value
            .to_str()
            .map_err(|_| malformed("token", "non-ascii header value"))?
            .trim();
        if !token.is_empty() {
            return Ok(Some(Credential::bearer(token)));
        }
    }

    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| malformed("authorization", "non-ascii header value"))?
        .trim();
    let (scheme, rest) = value.split_once(' ').unwrap_or((value, ""));

    if scheme.eq_ignore_ascii_case("basic") {
        decode_basic(rest.trim()).map(Some)
    } else if scheme.eq_ignore_ascii_case("bearer") {
        let token = rest.trim();
        if token.is_empty() {
            return Err(malformed("bearer", "empty token"));
        }
        Ok(Some(Credential::bearer(token)))
    } else {
        tracing::debug!(scheme, "ignoring unsupported authorization scheme");
        Ok(None)
    }
}

fn decode_basic(encoded: &str) -> Result<Credential, CredentialError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|_| malformed("basic", "invalid base64"))?;
    let decoded = String::from_utf8(bytes).map_err(|_| malformed("basic", "invalid utf-8"))?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| malformed("basic", "missing ':' separator"))?;
    Ok(Credential::username_password(username, password))
}

fn malformed(scheme: &'static str, detail: &'static str) -> CredentialError {
    CredentialError::Malformed { scheme, detail }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::http::HeaderValue;
    use secrecy::ExposeSecret;
    use warden_security::CredentialKind;

    use super::*;

    fn expose(credential: &Credential) -> (Option<&str>, &str) {
        match credential {
            Credential::UsernamePassword { username, password } => {
                (Some(username.as_str()), password.expose_secret())
            }
            Credential::BearerToken { token } => (None, token.expose_secret()),
        }
    }

    fn headers(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn no_header_means_no_credential() {
        assert!(matches!(extract_credential(&HeaderMap::new()), Ok(None)));
    }

    #[test]
    fn api_token_header_is_bearer() {
        let credential = extract_credential(&headers("x-api-token", "admin-token-123"))
            .unwrap()
            .unwrap();

        assert_eq!(credential.kind(), CredentialKind::BearerToken);
        assert_eq!(expose(&credential), (None, "admin-token-123"));
    }

    #[test]
    fn bearer_authorization() {
        let credential = extract_credential(&headers("authorization", "Bearer abc"))
            .unwrap()
            .unwrap();
        assert_eq!(credential.kind(), CredentialKind::BearerToken);
        assert_eq!(expose(&credential).1, "abc");
    }

    #[test]
    fn basic_authorization_decodes_user_and_password() {
        let encoded = STANDARD.encode("admin:admin:pass");
        let credential = extract_credential(&headers("authorization", &format!("basic {encoded}")))
            .unwrap()
            .unwrap();

        assert_eq!(expose(&credential), (Some("admin"), "admin:pass"));
    }

    #[test]
    fn api_token_takes_precedence() {
        let mut map = headers("x-api-token", "t1");
        map.insert(AUTHORIZATION, HeaderValue::from_static("Bearer t2"));

        let credential = extract_credential(&map).unwrap().unwrap();
        assert_eq!(expose(&credential).1, "t1");
    }

    #[test]
    fn malformed_basic_is_an_error() {
        let no_colon = format!("Basic {}", STANDARD.encode("nocolon"));
        for value in ["Basic !!!", "Basic", no_colon.as_str()] {
            let err = extract_credential(&headers("authorization", value)).unwrap_err();
            assert_eq!(err.reason_code(), "malformed credentials");
        }
    }

    #[test]
    fn empty_bearer_is_an_error() {
        assert!(extract_credential(&headers("authorization", "Bearer ")).is_err());
    }

    #[test]
    fn blank_api_token_falls_back_to_authorization() {
        let mut map = headers("x-api-token", " ");
        assert!(matches!(extract_credential(&map), Ok(None)));

        let encoded = STANDARD.encode("admin:adminpass");
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {encoded}")).unwrap(),
        );
        let credential = extract_credential(&map).unwrap().unwrap();
        assert_eq!(expose(&credential), (Some("admin"), "adminpass"));
    }

    #[test]
    fn unknown_scheme_is_ignored() {
        assert!(matches!(
            extract_credential(&headers("authorization", "Digest abc")),
            Ok(None)
        ));
    }
}
