use reqwest::Method;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::client::body::{read_response, RawResponse};
use crate::client::template::{RequestDescriptor, RequestTemplate};
use crate::config::ClientConfig;
use crate::error::{ClientError, OperationContext, Result};
use crate::models::*;
use crate::operations::navigation::{find_nearest, sort_by_symbol};
use crate::{v_debug, v_info};

pub const MAX_WAYPOINT_PAGE_LIMIT: u32 = 20;
pub const DEFAULT_WAYPOINT_PAGE_LIMIT: u32 = 10;

/// Filters and paging for `GET /v2/systems/{systemSymbol}/waypoints`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointQuery {
    pub limit: u32,
    pub page: u32,
    pub traits: Vec<String>,
    pub waypoint_type: Option<String>,
}

impl Default for WaypointQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_WAYPOINT_PAGE_LIMIT,
            page: 1,
            traits: Vec::new(),
            waypoint_type: None,
        }
    }
}

impl WaypointQuery {
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 || self.limit > MAX_WAYPOINT_PAGE_LIMIT {
            return Err(ClientError::Config(format!(
                "waypoint limit must be between 1 and {}, got {}",
                MAX_WAYPOINT_PAGE_LIMIT, self.limit
            )));
        }
        if self.page == 0 {
            return Err(ClientError::Config("waypoint page must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Query pairs in wire order; each trait becomes its own `traits=` pair.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("page".to_string(), self.page.to_string()),
        ];
        for t in &self.traits {
            pairs.push(("traits".to_string(), t.clone()));
        }
        if let Some(wp_type) = &self.waypoint_type {
            pairs.push(("type".to_string(), wp_type.clone()));
        }
        pairs
    }

    /// Whether this page reaches the end of `total` results. Based on the
    /// page that was asked for, not the one the server reports.
    pub fn is_last_page(&self, total: u32) -> bool {
        self.page.saturating_mul(self.limit) >= total
    }
}

/// Result of a nearest-waypoint lookup.
#[derive(Debug, Clone)]
pub struct NearestWaypoint {
    pub ship: ShipNavState,
    pub waypoint: Waypoint,
    pub distance: f64,
}

#[derive(Clone)]
pub struct SpaceTradersClient {
    client: reqwest::Client,
    base_url: String,
    template: Option<Arc<RequestTemplate>>,
    body_capacity: usize,
    api_log: Option<PathBuf>,
}

impl SpaceTradersClient {
    /// A client without credentials; only `register_agent` works until a
    /// template is attached.
    pub fn new(base_url: &str, body_capacity: usize, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL is empty".to_string()));
        }
        if body_capacity == 0 {
            return Err(ClientError::Config("body capacity must be greater than 0".to_string()));
        }

        let mut builder = reqwest::Client::builder().timeout(timeout);
        // Loopback targets (local stubs, dev servers) never go through a system proxy
        if is_loopback(base_url) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(SpaceTradersClient {
            client,
            base_url: base_url.trim().to_string(),
            template: None,
            body_capacity,
            api_log: None,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut client = Self::new(
            &config.api.base_url,
            config.api.body_capacity_bytes,
            Duration::from_secs(config.api.timeout_seconds),
        )?;
        client.api_log = config.logging.api_log_path.as_ref().map(PathBuf::from);
        Ok(client)
    }

    /// Attaches the agent's credentials. The template is built once and
    /// shared read-only by every clone of this client.
    pub fn with_token(self, token: &str) -> Result<Self> {
        let template = RequestTemplate::new(&self.base_url, token)?;
        Ok(self.with_template(Arc::new(template)))
    }

    pub fn with_template(mut self, template: Arc<RequestTemplate>) -> Self {
        self.template = Some(template);
        self
    }

    pub fn template(&self) -> Option<&Arc<RequestTemplate>> {
        self.template.as_ref()
    }

    fn authed(&self) -> Result<&RequestTemplate> {
        self.template
            .as_deref()
            .ok_or_else(|| ClientError::Config("no agent token loaded".to_string()))
    }

    fn log_api_call(&self, method: &Method, url: &str, request_body: &str, response: &RawResponse) {
        let Some(path) = &self.api_log else {
            return;
        };

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format!(
            "\n=== API CALL [{timestamp}] ===\n\
             Method: {method}\n\
             URL: {url}\n\
             Request Body: {request_body}\n\
             Response Status: {status}\n\
             Response Body: {response_body}\n\
             ========================================\n",
            status = response.status_line(),
            response_body = response.text(),
        );

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = file.write_all(log_entry.as_bytes());
        }
    }

    /// Sends one descriptor and reads its body within the configured capacity.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> Result<RawResponse> {
        let (method, url, headers, body) = descriptor.into_parts();
        let url_text = url.to_string();
        v_debug!("🌐 API: {} {}", method, url_text);

        let logged_body = match (&self.api_log, &body) {
            (Some(_), Some(body)) => String::from_utf8_lossy(body).into_owned(),
            _ => "None".to_string(),
        };

        let mut request = self.client.request(method.clone(), url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            let kind = if e.is_timeout() {
                "timed out"
            } else if e.is_connect() {
                "connection failed"
            } else {
                "request failed"
            };
            ClientError::Transport(format!("{} {} {}: {}", method, url_text, kind, e))
        })?;

        let raw = read_response(response, self.body_capacity).await?;
        v_debug!("🌐 API: {} {} -> {} ({} bytes)", method, url_text, raw.status_line(), raw.body.len());
        self.log_api_call(&method, &url_text, &logged_body, &raw);
        Ok(raw)
    }

    // Registration
    pub async fn register_agent(&self, symbol: &str, faction: &str) -> Result<RawResponse> {
        let result: Result<RawResponse> = async {
            let payload = serde_json::to_vec(&RegisterRequest {
                symbol: symbol.to_string(),
                faction: faction.to_string(),
            })?;
            let mut descriptor =
                RequestDescriptor::unauthenticated(Method::POST, &self.base_url, "/v2/register")?;
            descriptor.set_body(payload);
            self.execute(descriptor).await
        }
        .await;
        result.during("register agent")
    }

    // Agent operations
    pub async fn get_agent(&self) -> Result<RawResponse> {
        let result: Result<RawResponse> = async {
            let descriptor = self.authed()?.derive(Method::GET, "/v2/my/agent", &[], None);
            self.execute(descriptor).await
        }
        .await;
        result.during("get agent")
    }

    pub async fn agent(&self) -> Result<Agent> {
        let raw = self.get_agent().await?;
        raw.decode::<AgentResponse>()
            .map(|envelope| envelope.data)
            .during("get agent")
    }

    // Ship navigation
    pub async fn get_ship_nav(&self, ship_symbol: &str) -> Result<RawResponse> {
        let result: Result<RawResponse> = async {
            let ship_symbol = path_symbol("ship", ship_symbol)?;
            let mut descriptor = self.authed()?.derive(Method::GET, "/", &[], None);
            descriptor.set_path_segments(&["v2", "my", "ships", ship_symbol, "nav"]);
            self.execute(descriptor).await
        }
        .await;
        result.during("get ship nav")
    }

    pub async fn ship_nav_state(&self, ship_symbol: &str) -> Result<ShipNavState> {
        let raw = self.get_ship_nav(ship_symbol).await?;
        raw.decode::<ShipNavResponse>()
            .map(|envelope| ShipNavState::from_nav(ship_symbol, &envelope.data))
            .during("get ship nav")
    }

    // Waypoint listing
    pub async fn list_waypoints(&self, system_symbol: &str, query: &WaypointQuery) -> Result<RawResponse> {
        let result: Result<RawResponse> = async {
            query.validate()?;
            let system_symbol = path_symbol("system", system_symbol)?;
            let pairs = query.to_pairs();
            let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let mut descriptor = self.authed()?.derive(Method::GET, "/", &pairs, None);
            descriptor.set_path_segments(&["v2", "systems", system_symbol, "waypoints"]);
            self.execute(descriptor).await
        }
        .await;
        result.during("list waypoints")
    }

    pub async fn waypoint_page(&self, system_symbol: &str, query: &WaypointQuery) -> Result<(Vec<Waypoint>, PageMeta)> {
        let raw = self.list_waypoints(system_symbol, query).await?;
        raw.decode::<WaypointsResponse>()
            .map(|envelope| (envelope.data, envelope.meta))
            .during("list waypoints")
    }

    /// Every waypoint in the system matching the filters, across all pages.
    pub async fn all_waypoints(
        &self,
        system_symbol: &str,
        traits: &[String],
        waypoint_type: Option<&str>,
    ) -> Result<Vec<Waypoint>> {
        let mut query = WaypointQuery {
            limit: MAX_WAYPOINT_PAGE_LIMIT,
            page: 1,
            traits: traits.to_vec(),
            waypoint_type: waypoint_type.map(str::to_string),
        };
        let mut waypoints = Vec::new();

        loop {
            let (page, meta) = self.waypoint_page(system_symbol, &query).await?;
            v_debug!("📍 {} page {}: {} waypoints (total {})", system_symbol, meta.page, page.len(), meta.total);
            let exhausted = page.is_empty() || query.is_last_page(meta.total);
            waypoints.extend(page);
            if exhausted {
                break;
            }
            query.page += 1;
        }

        Ok(waypoints)
    }

    /// Closest waypoint, in the ship's current system, that matches the
    /// filters. Distance is measured from the ship's route destination.
    pub async fn find_nearest_waypoint(
        &self,
        ship_symbol: &str,
        traits: &[String],
        waypoint_type: Option<&str>,
    ) -> Result<NearestWaypoint> {
        let ship = self.ship_nav_state(ship_symbol).await?;
        let mut candidates = self
            .all_waypoints(&ship.system_symbol, traits, waypoint_type)
            .await?;
        v_info!("🔎 {} candidate waypoints in {}", candidates.len(), ship.system_symbol);

        sort_by_symbol(&mut candidates);
        let (waypoint, distance) = find_nearest(ship.destination, &candidates).during("find nearest waypoint")?;

        Ok(NearestWaypoint {
            waypoint: waypoint.clone(),
            distance,
            ship,
        })
    }
}

fn is_loopback(base_url: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(base_url.trim()) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    host.eq_ignore_ascii_case("localhost")
        || host
            .trim_matches(|c: char| c == '[' || c == ']')
            .parse::<std::net::IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}

/// Symbols become single path segments; anything that would walk out of its
/// segment is refused before a request is built.
fn path_symbol<'a>(kind: &str, symbol: &'a str) -> Result<&'a str> {
    if symbol.trim().is_empty() || symbol == "." || symbol == ".." || symbol.contains('/') {
        return Err(ClientError::Config(format!("invalid {} symbol '{}'", kind, symbol)));
    }
    Ok(symbol)
}
