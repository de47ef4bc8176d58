//! OAuth 1.0a request signing (RFC 5849)
//!
//! The X API v2 write endpoints require OAuth 1.0a user context. This
//! module builds the `Authorization: OAuth ...` header: percent-encoding
//! with the RFC 3986 unreserved set, the sorted parameter string,
//! HMAC-SHA1 over the signature base string, and base64 output.
//!
//! Only query/form parameters participate in the signature; a JSON body
//! does not, which is why `publish` signs with no request parameters.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, Rng};
use secrecy::ExposeSecret;
use sha1::Sha1;

use crate::config::XCredentials;
use crate::error::{ProviderError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Build a signed `Authorization` header value for a request
///
/// `request_params` are the query or form parameters of the request
/// (empty for JSON-body requests). Nonce and timestamp are generated
/// fresh per call.
pub fn authorization_header(
    method: &str,
    url: &str,
    request_params: &[(String, String)],
    credentials: &XCredentials,
) -> Result<String> {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    let timestamp = chrono::Utc::now().timestamp().to_string();

    header_with_nonce(method, url, request_params, credentials, &nonce, &timestamp)
}

fn header_with_nonce(
    method: &str,
    url: &str,
    request_params: &[(String, String)],
    credentials: &XCredentials,
    nonce: &str,
    timestamp: &str,
) -> Result<String> {
    let oauth_params: Vec<(String, String)> = vec![
        (
            "oauth_consumer_key".to_string(),
            credentials.api_key.expose_secret().to_string(),
        ),
        ("oauth_nonce".to_string(), nonce.to_string()),
        (
            "oauth_signature_method".to_string(),
            "HMAC-SHA1".to_string(),
        ),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        (
            "oauth_token".to_string(),
            credentials.access_token.expose_secret().to_string(),
        ),
        ("oauth_version".to_string(), "1.0".to_string()),
    ];

    // The signature covers the oauth parameters plus the request's own
    // query/form parameters
    let mut signed_params = oauth_params.clone();
    signed_params.extend_from_slice(request_params);

    let base = signature_base_string(method, url, &signed_params);
    let signing_key = format!(
        "{}&{}",
        percent_encode(credentials.api_secret.expose_secret()),
        percent_encode(credentials.access_token_secret.expose_secret())
    );
    let signature = hmac_sha1_base64(&signing_key, &base)?;

    let mut header_params = oauth_params;
    header_params.push(("oauth_signature".to_string(), signature));
    header_params.sort();

    let joined = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", joined))
}

/// Percent-encode with the RFC 3986 unreserved set (ALPHA / DIGIT / "-" / "." / "_" / "~")
fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Build the signature base string: METHOD & encoded URL & encoded
/// sorted parameter string
fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

fn hmac_sha1_base64(key: &str, message: &str) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| ProviderError::Posting(format!("Failed to build request signature: {}", e)))?;
    mac.update(message.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
