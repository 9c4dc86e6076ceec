// # dynv6 REST client
//
// [`RemoteDnsStore`] implementation for the dynv6 REST API v2.
//
// - Makes exactly one HTTP request per store call
// - Maps HTTP status codes to specific error messages (401/403, 404, 429, 5xx)
// - HTTP timeout configured (30 seconds by default)
// - Dry-run mode: reads hit the API, writes are logged and echoed back
// - No retry, backoff or caching; the caller decides what to do with errors
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
// - Construction fails fast if the token is empty
//
// ## API Reference
//
// - List zones: GET `/zones`
// - Zone by name: GET `/zones/by-name/:name`
// - List records: GET `/zones/:zone_id/records`
// - Add record: POST `/zones/:zone_id/records`
// - Update record: PATCH `/zones/:zone_id/records/:record_id`
// - Delete record: DELETE `/zones/:zone_id/records/:record_id`

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use zonesync_core::config::DEFAULT_TIMEOUT_SECS;
use zonesync_core::{Error, ProviderConfig, Result};

use crate::PROVIDER_NAME;
use crate::models::{
    ApiRecord, ApiRecordRequest, ApiZone, RecordId, RemoteRecord, RemoteRecordRequest, ZoneHandle,
};
use crate::store::RemoteDnsStore;

/// dynv6 API base URL
pub const DYNV6_API_BASE: &str = "https://dynv6.com/api/v2";

/// Record id reported for writes skipped in dry-run mode
const DRY_RUN_RECORD_ID: &str = "dry-run";

/// HTTP client for the dynv6 REST API
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the client will:
/// - Perform all GET requests (zone lookup, record listing)
/// - Log the intended write payload
/// - **NOT** send POST, PATCH or DELETE requests
pub struct Dynv6Client {
    /// dynv6 HTTP token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL; request paths are appended as encoded segments
    base_url: Url,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, skip writes
    dry_run: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for Dynv6Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dynv6Client")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url.as_str())
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Dynv6Client {
    /// Create a live client against the public dynv6 API
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_options(
            api_token,
            DYNV6_API_BASE,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            false,
        )
    }

    /// Create a client with explicit settings
    ///
    /// # Parameters
    ///
    /// - `api_token`: dynv6 HTTP token (https://dynv6.com/keys)
    /// - `base_url`: API base URL, e.g. a mock server in tests
    /// - `timeout`: per-request HTTP timeout
    /// - `dry_run`: if true, perform GET requests but skip writes
    pub fn with_options(
        api_token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        dry_run: bool,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(Error::config("dynv6 API token cannot be empty"));
        }

        let base_url = base_url.into();
        let base_url = Url::parse(&base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::config(format!("Invalid dynv6 base URL: {}", base_url)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        if dry_run {
            warn!("dynv6 client running in DRY-RUN mode - no changes will be made");
        }

        Ok(Self {
            api_token,
            base_url,
            client,
            dry_run,
        })
    }

    /// Create a client from provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        match config {
            ProviderConfig::Dynv6 {
                api_token,
                base_url,
                timeout_secs,
                dry_run,
            } => Self::with_options(
                api_token.clone(),
                base_url.as_deref().unwrap_or(DYNV6_API_BASE),
                Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
                *dry_run,
            ),
            _ => Err(Error::config("Invalid config for dynv6 provider")),
        }
    }

    /// Whether writes are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn request(&self, method: Method, path: &[&str]) -> RequestBuilder {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        debug!(method = %method, url = %url, "Sending dynv6 request");

        self.client
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json")
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::remote_call(PROVIDER_NAME, format!("HTTP request failed: {}", e)))?;

        check_status(response, action).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T> {
        self.send(request, action)
            .await?
            .json()
            .await
            .map_err(|e| Error::remote_call(PROVIDER_NAME, format!("Failed to parse response: {}", e)))
    }

    fn dry_run_write(&self, action: &str, zone: &ZoneHandle, body: Option<&ApiRecordRequest>) {
        let payload = body
            .and_then(|body| serde_json::to_string(body).ok())
            .unwrap_or_default();
        warn!(
            zone = %zone.name,
            zone_id = %zone.id,
            payload = %payload,
            "[DRY-RUN] Would {}",
            action
        );
    }
}

#[async_trait]
impl RemoteDnsStore for Dynv6Client {
    async fn list_zones(&self) -> Result<Vec<ZoneHandle>> {
        let zones: Vec<ApiZone> = self
            .send_json(self.request(Method::GET, &["zones"]), "List zones")
            .await?;

        Ok(zones.into_iter().map(ZoneHandle::from).collect())
    }

    async fn resolve_zone(&self, name: &str) -> Result<ZoneHandle> {
        let response = self
            .request(Method::GET, &["zones", "by-name", name])
            .send()
            .await
            .map_err(|e| Error::remote_call(PROVIDER_NAME, format!("HTTP request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::not_found(format!("Zone not found: {}", name)));
        }

        let zone: ApiZone = check_status(response, "Zone lookup")
            .await?
            .json()
            .await
            .map_err(|e| Error::remote_call(PROVIDER_NAME, format!("Failed to parse response: {}", e)))?;

        debug!(zone = %zone.name, zone_id = zone.id, "Resolved zone");
        Ok(zone.into())
    }

    async fn list_records(&self, zone: &ZoneHandle) -> Result<Vec<RemoteRecord>> {
        let records: Vec<ApiRecord> = self
            .send_json(
                self.request(Method::GET, &["zones", &zone.id, "records"]),
                "List records",
            )
            .await?;

        Ok(records.into_iter().map(RemoteRecord::from).collect())
    }

    async fn create_record(
        &self,
        zone: &ZoneHandle,
        request: &RemoteRecordRequest,
    ) -> Result<RemoteRecord> {
        let body = ApiRecordRequest::from(request);

        if self.dry_run {
            self.dry_run_write("create record", zone, Some(&body));
            return Ok(request.clone().into_record(RecordId::from(DRY_RUN_RECORD_ID)));
        }

        let record: ApiRecord = self
            .send_json(
                self.request(Method::POST, &["zones", &zone.id, "records"])
                    .json(&body),
                "Create record",
            )
            .await?;

        Ok(record.into())
    }

    async fn update_record(
        &self,
        zone: &ZoneHandle,
        id: &RecordId,
        request: &RemoteRecordRequest,
    ) -> Result<RemoteRecord> {
        let body = ApiRecordRequest::from(request);

        if self.dry_run {
            self.dry_run_write(&format!("update record {}", id), zone, Some(&body));
            return Ok(request.clone().into_record(id.clone()));
        }

        let record: ApiRecord = self
            .send_json(
                self.request(Method::PATCH, &["zones", &zone.id, "records", &id.0])
                    .json(&body),
                "Update record",
            )
            .await?;

        Ok(record.into())
    }

    async fn delete_record(&self, zone: &ZoneHandle, id: &RecordId) -> Result<()> {
        if self.dry_run {
            self.dry_run_write(&format!("delete record {}", id), zone, None);
            return Ok(());
        }

        self.send(
            self.request(Method::DELETE, &["zones", &zone.id, "records", &id.0]),
            "Delete record",
        )
        .await?;

        Ok(())
    }
}

/// Map a non-success HTTP status to a remote call error
async fn check_status(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());

    let message = match status.as_u16() {
        401 | 403 => format!(
            "Authentication failed: Invalid API token or insufficient permissions. Status: {}",
            status
        ),
        429 => format!("Rate limit exceeded. Please retry later. Status: {}", status),
        500..=599 => format!("dynv6 server error (transient): {} - {}", status, error_text),
        _ => format!("{} failed: {} - {}", action, status, error_text),
    };

    Err(Error::remote_call(PROVIDER_NAME, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordContent;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "test_token_12345";

    fn mock_client(server: &MockServer, dry_run: bool) -> Dynv6Client {
        Dynv6Client::with_options(TOKEN, server.uri(), Duration::from_secs(5), dry_run).unwrap()
    }

    fn zone() -> ZoneHandle {
        ZoneHandle {
            id: "7".to_string(),
            name: "example.dynv6.net".to_string(),
        }
    }

    #[test]
    fn test_empty_token_is_config_error() {
        let err = Dynv6Client::new("").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_api_token_not_exposed_in_debug() {
        let client = Dynv6Client::new("secret_token_12345").unwrap();

        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("Dynv6Client"));
    }

    #[test]
    fn test_from_config_rejects_other_provider() {
        let config = ProviderConfig::Custom {
            factory: "other".to_string(),
            config: serde_json::json!({}),
        };
        assert!(Dynv6Client::from_config(&config).unwrap_err().is_config());
    }

    #[tokio::test]
    async fn test_list_zones() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .and(header("Authorization", "Bearer test_token_12345"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 7, "name": "example.dynv6.net", "ipv4address": "", "ipv6prefix": ""},
                {"id": 8, "name": "other.dynv6.net", "ipv4address": "", "ipv6prefix": ""}
            ])))
            .mount(&server)
            .await;

        let zones = mock_client(&server, false).list_zones().await.unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0], zone());
    }

    #[tokio::test]
    async fn test_resolve_zone_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones/by-name/missing.dynv6.net"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = mock_client(&server, false)
            .resolve_zone("missing.dynv6.net")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_zone_name_is_a_single_encoded_segment() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones/by-name/a%2Fb%3Fc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
                {"id": 9, "name": "a/b?c"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let zone = mock_client(&server, false).resolve_zone("a/b?c").await.unwrap();
        assert_eq!(zone.id, "9");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = Dynv6Client::with_options(TOKEN, "not a url", Duration::from_secs(5), false)
            .unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_list_records() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones/7/records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "zoneID": 7, "name": "www", "type": "A", "data": "192.0.2.1"},
                {"id": 2, "zoneID": 7, "name": "", "type": "MX", "data": "mx.example.com", "priority": 10}
            ])))
            .mount(&server)
            .await;

        let records = mock_client(&server, false).list_records(&zone()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content, RecordContent::A("192.0.2.1".to_string()));
        assert_eq!(
            records[1].content,
            RecordContent::Mx {
                priority: 10,
                target: "mx.example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_create_record_sends_typed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/zones/7/records"))
            .and(body_json(serde_json::json!({
                "name": "",
                "type": "CAA",
                "data": "letsencrypt.org",
                "flags": 0,
                "tag": "issue"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 99, "zoneID": 7, "name": "", "type": "CAA",
                "data": "letsencrypt.org", "flags": 0, "tag": "issue"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = RemoteRecordRequest {
            name: String::new(),
            content: RecordContent::Caa {
                flags: 0,
                tag: "issue".to_string(),
                value: "letsencrypt.org".to_string(),
            },
        };

        let record = mock_client(&server, false)
            .create_record(&zone(), &request)
            .await
            .unwrap();
        assert_eq!(record.id, RecordId::from("99"));
    }

    #[tokio::test]
    async fn test_update_record_uses_patch() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/zones/7/records/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 12, "zoneID": 7, "name": "www", "type": "A", "data": "192.0.2.99"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = RemoteRecordRequest {
            name: "www".to_string(),
            content: RecordContent::A("192.0.2.99".to_string()),
        };

        let record = mock_client(&server, false)
            .update_record(&zone(), &RecordId::from("12"), &request)
            .await
            .unwrap();
        assert_eq!(record.content, RecordContent::A("192.0.2.99".to_string()));
    }

    #[tokio::test]
    async fn test_delete_record() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/zones/7/records/12"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        mock_client(&server, false)
            .delete_record(&zone(), &RecordId::from("12"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_status_codes_map_to_remote_call_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/zones/7/records"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = mock_client(&server, false);

        match client.list_zones().await.unwrap_err() {
            Error::RemoteCall { message, .. } => {
                assert!(message.contains("Authentication failed"), "{}", message)
            }
            other => panic!("unexpected error: {:?}", other),
        }
        match client.list_records(&zone()).await.unwrap_err() {
            Error::RemoteCall { message, .. } => {
                assert!(message.contains("Rate limit exceeded"), "{}", message)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dry_run_skips_writes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = mock_client(&server, true);
        assert!(client.is_dry_run());

        let request = RemoteRecordRequest {
            name: "www".to_string(),
            content: RecordContent::A("192.0.2.1".to_string()),
        };
        let record = client.create_record(&zone(), &request).await.unwrap();
        assert_eq!(record.id, RecordId::from(DRY_RUN_RECORD_ID));
        assert_eq!(record.name, "www");

        client
            .delete_record(&zone(), &RecordId::from("1"))
            .await
            .unwrap();
    }
}
