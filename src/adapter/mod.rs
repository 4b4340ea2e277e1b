use std::borrow::Cow;
use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::Error;
use crate::failure::TransportError;
use crate::payload::Payload;
use crate::session::SessionStore;

/// Percent-encodes a value for use as a single path segment.
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// The one configured request issuer shared by every descriptor.
///
/// Attaches the stored bearer credential to each request and hands back
/// only the decoded body. Statuses below 400 are transport successes.
#[derive(Clone)]
pub struct HttpAdapter {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpAdapter {
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self, Error> {
        let base = reqwest::Url::parse(&config.base_url).map_err(|e| {
            Error::Config(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Payload, TransportError> {
        let builder = self.http.get(self.url(path)).query(query);
        self.dispatch(Method::GET, path, builder).await
    }

    pub async fn delete(&self, path: &str) -> Result<Payload, TransportError> {
        let builder = self.http.delete(self.url(path));
        self.dispatch(Method::DELETE, path, builder).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Payload, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.http.post(self.url(path)).json(body);
        self.dispatch(Method::POST, path, builder).await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Payload, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.http.put(self.url(path)).json(body);
        self.dispatch(Method::PUT, path, builder).await
    }

    pub async fn patch<B>(&self, path: &str, body: &B) -> Result<Payload, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.http.patch(self.url(path)).json(body);
        self.dispatch(Method::PATCH, path, builder).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Payload, TransportError> {
        let builder = self.authorize(builder)?;
        debug!(method = %method, path, "http.request");
        let resp = builder.send().await.map_err(|e| {
            warn!(method = %method, path, error = %e, "http.no_response");
            TransportError::from(e)
        })?;
        let status = resp.status();
        let result = unwrap_response(resp).await;
        if result.is_err() {
            warn!(method = %method, path, status = status.as_u16(), "http.failure");
        } else {
            debug!(method = %method, path, status = status.as_u16(), "http.success");
        }
        result
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, TransportError> {
        match self.session.load() {
            Ok(Some(credential)) => Ok(builder.header(AUTHORIZATION, credential.bearer())),
            Ok(None) => Ok(builder),
            Err(e) => Err(TransportError::Credential(e.to_string())),
        }
    }
}

async fn unwrap_response(resp: Response) -> Result<Payload, TransportError> {
    let status = resp.status();
    let bytes = resp
        .bytes()
        .await
        .map_err(|source| TransportError::Body { status, source })?;
    let body = parse_body(&bytes);
    if status.as_u16() < 400 {
        Ok(body)
    } else {
        Err(TransportError::Status { status, body })
    }
}

fn parse_body(bytes: &[u8]) -> Payload {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Payload::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Payload::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::session::MemorySessionStore;

    #[test]
    fn empty_body_is_null() {
        assert_eq!(parse_body(b""), Payload::Null);
        assert_eq!(parse_body(b"  \n"), Payload::Null);
    }

    #[test]
    fn non_json_body_is_kept_as_text() {
        assert_eq!(parse_body(b"ok"), Payload::String("ok".into()));
        assert_eq!(parse_body(br#"{"id": 1}"#), json!({"id": 1}));
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let config = crate::Config::new("https://farm.example/api/");
        let adapter = HttpAdapter::new(&config, Arc::new(MemorySessionStore::new())).unwrap();
        assert_eq!(adapter.url("/ponds"), "https://farm.example/api/ponds");
        assert_eq!(adapter.url("ponds/3"), "https://farm.example/api/ponds/3");
    }

    #[test]
    fn segment_escapes_reserved_characters() {
        assert_eq!(segment("pond a/b"), "pond%20a%2Fb");
    }
}
