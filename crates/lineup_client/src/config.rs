use serde::{Deserialize, Serialize};
use url::Url;

use lineup_common::codec::DEFAULT_NAMESPACE;

use crate::error::ClientError;

/// Path the Socket.IO server is mounted on.
pub const SOCKET_PATH: &str = "/socket.io/";

/// Engine.IO v4, WebSocket transport from the first request (no polling upgrade).
pub const SOCKET_QUERY: &str = "EIO=4&transport=websocket";

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "lineup-config";

/// Client settings.
///
/// Every field has a default, so a page can embed a partial JSON object:
///
/// ```html
/// <script id="lineup-config" type="application/json">
///   {"server_url": "http://queue.local:5000", "reconnect_interval_ms": 2000}
/// </script>
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server origin. `None` connects back to the page's own origin.
    pub server_url: Option<String>,
    /// Socket.IO namespace.
    pub namespace: String,
    /// Local-storage key of the theme preference.
    pub theme_key: String,
    /// Open the socket as soon as the provider mounts.
    pub auto_connect: bool,
    /// Delay between reconnection attempts.
    pub reconnect_interval_ms: u64,
    /// Maximum toasts on screen at once.
    pub toast_limit: usize,
    pub toast_secs: u64,
    pub error_toast_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            theme_key: "theme".to_string(),
            auto_connect: true,
            reconnect_interval_ms: 1000,
            toast_limit: 5,
            toast_secs: 5,
            error_toast_secs: 8,
        }
    }
}

impl ClientConfig {
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        serde_json::from_str(raw).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Read overrides from the page, falling back to defaults.
    pub fn from_page() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("[ClientConfig] {e}; using defaults");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// WebSocket endpoint for the given page origin.
    ///
    /// `http` maps to `ws` and `https` to `wss`; any path, query or fragment on
    /// the origin is replaced by the Socket.IO endpoint.
    pub fn endpoint(&self, page_origin: &str) -> Result<Url, ClientError> {
        let base = self.server_url.as_deref().unwrap_or(page_origin);
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: base.to_string(),
            reason,
        };

        let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        let scheme = match url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(invalid(format!("unsupported scheme '{other}'"))),
        };
        url.set_scheme(scheme)
            .map_err(|_| invalid(format!("cannot switch to '{scheme}'")))?;
        url.set_path(SOCKET_PATH);
        url.set_query(Some(SOCKET_QUERY));
        url.set_fragment(None);
        Ok(url)
    }

    /// Endpoint derived from the current browser location.
    pub fn browser_endpoint(&self) -> Result<Url, ClientError> {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        self.endpoint(&origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.namespace, "/");
        assert_eq!(config.theme_key, "theme");
        assert!(config.auto_connect);
        assert_eq!(config.toast_limit, 5);
    }

    #[test]
    fn test_endpoint_from_page_origin() {
        let url = ClientConfig::default().endpoint("http://localhost:5000").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:5000/socket.io/?EIO=4&transport=websocket");
    }

    #[test]
    fn test_secure_origin_uses_wss() {
        let url = ClientConfig::default()
            .endpoint("https://queue.example.edu/professor#top")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "wss://queue.example.edu/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_explicit_server_url_wins() {
        let config = ClientConfig::default().with_server_url("http://10.0.0.2:5000");
        let url = config.endpoint("https://ignored.example").unwrap();
        assert_eq!(url.host_str(), Some("10.0.0.2"));
        assert_eq!(url.port(), Some(5000));
    }

    #[test]
    fn test_rejects_unusable_urls() {
        let config = ClientConfig::default();
        assert!(matches!(config.endpoint("not a url"), Err(ClientError::InvalidUrl { .. })));
        assert!(matches!(config.endpoint("ftp://files.local"), Err(ClientError::InvalidUrl { .. })));
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = ClientConfig::from_json(r#"{"reconnect_interval_ms": 2500}"#).unwrap();
        assert_eq!(config.reconnect_interval_ms, 2500);
        assert_eq!(config.theme_key, "theme");
        assert!(matches!(ClientConfig::from_json("{"), Err(ClientError::Config(_))));
    }
}
