use crate::{constants::REQUEST_TIMEOUT, credentials::Credentials, request::BuiltRequest};
use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};

/// Table API client bound to one instance and one set of credentials.
pub struct TableClient {
    pub base_url: String,
    pub client: Client,
}

/// Status and raw body of a Table API call. The body is never parsed.
#[derive(Debug)]
pub struct TableResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TableClient {
    pub fn new(creds: &Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let token = base64::encode_config(
            format!("{}:{}", creds.username(), creds.password()),
            base64::STANDARD,
        );
        let mut auth = HeaderValue::from_str(&format!("Basic {}", token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(TableClient {
            base_url: creds.instance_url().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request and collect the full response body.
    ///
    /// Any HTTP status is a successful call here; only connection failures
    /// and timeouts are errors.
    pub async fn send(&self, req: &BuiltRequest) -> Result<TableResponse> {
        let url = self.url(&req.path);
        tracing::debug!(method = %req.method, %url, query = ?req.query, "sending request");

        let mut builder = self.client.request(req.method.clone(), &url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body.clone());
        }

        let resp = builder
            .send()
            .await
            .with_context(|| format!("{} {} failed", req.method, url))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .with_context(|| format!("reading response body from {url}"))?;

        if status.is_success() {
            tracing::debug!(%status, bytes = body.len(), "received response");
        } else {
            tracing::warn!(%status, "instance answered with an error status");
        }
        Ok(TableResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let creds = Credentials::new("https://dev1.service-now.com/", "admin", "pw");
        let client = TableClient::new(&creds).unwrap();
        assert_eq!(
            client.url("/api/now/table/incident"),
            "https://dev1.service-now.com/api/now/table/incident"
        );
    }
}
