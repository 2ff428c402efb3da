// NCM v2 HTTP client
//
// Wraps `reqwest::Client` with the API key headers, base-URL joining,
// `meta.next` pagination, and NCM error-body mapping. Resource endpoints
// (routers, net devices, usage samples) are inherent methods in sibling
// files so this module stays focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::ApiKeys;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::v2::models::Page;

/// Production NCM v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.cradlepointecm.com/api/v2/";

/// Page size requested when fetching "all" records. NCM caps v2 pages at 500.
pub const PAGE_SIZE: u32 = 500;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        let joined = self
            .errors
            .into_iter()
            .filter_map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        if joined.is_empty() {
            self.message.or(self.detail)
        } else {
            Some(joined)
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the NCM v2 REST API.
///
/// All list methods fetch every page; the caller always sees the complete
/// collection in server order.
pub struct NcmClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NcmClient {
    /// Build from API keys and a transport config.
    ///
    /// The four key headers are injected as default headers on every request.
    pub fn new(base_url: &str, keys: &ApiKeys, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(keys.headers()?)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/` so relative joins append rather
    /// than replace the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The API base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Canonical URL of a group, exactly as NCM embeds it in router records.
    pub fn group_url(&self, group_id: &str) -> String {
        format!("{}groups/{group_id}/", self.base_url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative resource path (e.g. `"routers/"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a collection and follow `meta.next` until exhausted.
    ///
    /// The first request carries `limit` plus `params`; later requests use
    /// the server-provided `next` URL verbatim.
    pub(crate) async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let mut first = self.url(path)?;
        {
            let mut query = first.query_pairs_mut();
            query.append_pair("limit", &PAGE_SIZE.to_string());
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        let mut all = Vec::new();
        let mut next = Some(first);
        let mut page_number: u32 = 1;

        while let Some(url) = next.take() {
            debug!("GET {url}");
            let resp = self.http.get(url).send().await?;
            let page: Page<T> = self.handle_response(resp).await?;
            trace!(
                path,
                page = page_number,
                received = page.data.len(),
                "page retrieved"
            );
            all.extend(page.data);
            next = page
                .meta
                .next
                .as_deref()
                .filter(|n| !n.is_empty())
                .map(Url::parse)
                .transpose()?;
            page_number += 1;
        }

        Ok(all)
    }

    /// Send a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw.chars().take(200).collect()
                }
            });

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Error::Authentication {
                message: format!("HTTP {}: {message}", status.as_u16()),
            };
        }

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            NcmClient::with_client("https://ncm.example/api/v2", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://ncm.example/api/v2/");
        assert_eq!(
            client.url("routers/").unwrap().as_str(),
            "https://ncm.example/api/v2/routers/"
        );
    }

    #[test]
    fn group_url_matches_canonical_form() {
        let client = NcmClient::with_client(DEFAULT_BASE_URL, reqwest::Client::new()).unwrap();
        assert_eq!(
            client.group_url("225264"),
            "https://www.cradlepointecm.com/api/v2/groups/225264/"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = NcmClient::with_client("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
