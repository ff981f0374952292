// Request templating: one immutable description of how to call the API as an
// authenticated agent, and independent per-call descriptors derived from it.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};

use crate::error::{ClientError, Result};

/// Base configuration shared read-only by every call in the process.
///
/// Built once after a token is loaded and never mutated afterwards. All
/// per-call state lives in the [`RequestDescriptor`] values produced by
/// [`RequestTemplate::derive`].
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    base_url: Url,
    method: Method,
    auth_token: String,
    default_headers: HeaderMap,
}

impl RequestTemplate {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ClientError::Config("base URL is empty".to_string()));
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::Config("agent token is empty".to_string()));
        }

        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!("base URL '{}' cannot carry a path", base_url)));
        }

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ClientError::Config("agent token contains characters not allowed in a header".to_string()))?;
        bearer.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            base_url,
            method: Method::GET,
            auth_token: token.to_string(),
            default_headers,
        })
    }

    /// Sets the method used by [`RequestTemplate::request`]. Consumes the
    /// template, so it can only happen while the template is still being built.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Derives an independent request. `path` replaces whatever path the base
    /// URL carried; scheme, host and port are inherited.
    pub fn derive(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor {
            method,
            url: self.base_url.clone(),
            headers: self.default_headers.clone(),
            body: None,
        };
        descriptor.set_path(path);
        descriptor.set_query(query);
        if let Some(body) = body {
            descriptor.set_body(body);
        }
        descriptor
    }

    /// Derives a bodiless request with the template's own method.
    pub fn request(&self, path: &str) -> RequestDescriptor {
        self.derive(self.method.clone(), path, &[], None)
    }
}

/// A single concrete request, exclusively owned by the call that made it.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// A request with no template behind it (agent registration).
    pub fn unauthenticated(method: Method, base_url: &str, path: &str) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL is empty".to_string()));
        }
        let url = Url::parse(base_url.trim())
            .map_err(|e| ClientError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::Config(format!("base URL '{}' cannot carry a path", base_url)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut descriptor = Self { method, url, headers, body: None };
        descriptor.set_path(path);
        descriptor.set_query(&[]);
        Ok(descriptor)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn set_path(&mut self, path: &str) {
        self.url.set_path(path);
    }

    /// Replaces the path with `segments`, each percent-encoded on its own so
    /// a `/` inside one stays part of that segment.
    pub fn set_path_segments(&mut self, segments: &[&str]) {
        if let Ok(mut path) = self.url.path_segments_mut() {
            path.clear().extend(segments);
        }
    }

    /// Replaces the whole query string. Repeated keys are kept in order.
    pub fn set_query(&mut self, query: &[(&str, &str)]) {
        self.url.set_query(None);
        if !query.is_empty() {
            self.url.query_pairs_mut().extend_pairs(query);
        }
    }

    pub fn append_query(&mut self, key: &str, value: &str) {
        self.url.query_pairs_mut().append_pair(key, value);
    }

    pub fn set_body(&mut self, body: Vec<u8>) {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(body);
    }

    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<Vec<u8>>) {
        (self.method, self.url, self.headers, self.body)
    }
}
