//! HTTP API Client
//!
//! `gloo-net` implementation of the dashboard data source, plus the page
//! data the server embeds in the document.

use async_trait::async_trait;
use gloo_net::http::Request;
use storefront_dashboard::{
    ApiConfig, DashboardError, DashboardResult, DashboardSource, FlashInput, FlashLevel, Section,
};
use wasm_bindgen::JsCast;

/// Local storage key holding an alternative API origin
pub const API_BASE_KEY: &str = "storefront_dashboard_api_url";

/// Id of the `<script type="application/json">` carrying flash messages
pub const FLASH_SCRIPT_ID: &str = "flash-messages";

/// Get the API base URL from local storage. Empty means same origin.
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_default();
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Flash messages rendered into the page by the server
pub fn embedded_flash_messages() -> Vec<FlashInput> {
    let text = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(FLASH_SCRIPT_ID))
        .and_then(|script| script.text_content());

    match text {
        Some(text) => parse_flash_messages(&text),
        None => Vec::new(),
    }
}

/// `.alert` elements already in the server-rendered page. They are taken
/// out of the document and handed back as messages so the flash board
/// owns their expiry.
pub fn adopt_server_alerts() -> Vec<FlashInput> {
    let Some(nodes) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.query_selector_all(".alert").ok())
    else {
        return Vec::new();
    };

    let mut adopted = Vec::new();
    for i in 0..nodes.length() {
        let Some(element) = nodes
            .item(i)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };

        let text = alert_text(&element.text_content().unwrap_or_default());
        element.remove();
        if !text.is_empty() {
            adopted.push(FlashInput {
                level: level_from_class(&element.class_name()),
                text,
            });
        }
    }
    adopted
}

/// Severity from Bootstrap's `alert-*` class; untagged alerts are info
fn level_from_class(class_name: &str) -> FlashLevel {
    class_name
        .split_whitespace()
        .find_map(|class| match class {
            "alert-success" => Some(FlashLevel::Success),
            "alert-info" => Some(FlashLevel::Info),
            "alert-warning" => Some(FlashLevel::Warning),
            "alert-danger" | "alert-error" => Some(FlashLevel::Error),
            _ => None,
        })
        .unwrap_or(FlashLevel::Info)
}

/// Alert text without the close button's `×`
fn alert_text(raw: &str) -> String {
    raw.trim().trim_end_matches('×').trim().to_string()
}

fn parse_flash_messages(text: &str) -> Vec<FlashInput> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(text).unwrap_or_else(|e| {
        web_sys::console::error_1(&format!("Invalid flash messages: {}", e).into());
        Vec::new()
    })
}

/// Fetches dashboard sections with the browser's fetch API
pub struct GlooSource {
    api: ApiConfig,
}

impl GlooSource {
    pub fn new(api: ApiConfig) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl DashboardSource for GlooSource {
    async fn fetch(&self, section: Section) -> DashboardResult<serde_json::Value> {
        let url = self.api.url(&section.path());

        let response = Request::get(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| DashboardError::Network(format!("Network error: {}", e)))?;

        let ok = response.ok();
        let status = response.status();

        // The envelope's `success` flag is authoritative when a body parses
        match response.json::<serde_json::Value>().await {
            Ok(body) => Ok(body),
            Err(_) if !ok => Err(DashboardError::Status { section, status }),
            Err(e) => Err(DashboardError::Parse {
                section,
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flash_messages() {
        let messages = parse_flash_messages(
            r#"[{"level":"success","text":"Product saved"},{"level":"danger","text":"Oops"}]"#,
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].level, FlashLevel::Error);
    }

    #[test]
    fn test_blank_flash_script() {
        assert!(parse_flash_messages("  \n").is_empty());
    }

    #[test]
    fn test_level_from_alert_class() {
        assert_eq!(level_from_class("alert alert-danger alert-dismissible"), FlashLevel::Error);
        assert_eq!(level_from_class("alert alert-success fade show"), FlashLevel::Success);
        assert_eq!(level_from_class("alert"), FlashLevel::Info);
    }

    #[test]
    fn test_alert_text_drops_close_button() {
        assert_eq!(alert_text("\n  Order #17 updated.\n  ×\n"), "Order #17 updated.");
    }
}
