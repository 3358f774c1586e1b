//! Derived page metadata for a resolved tenant.

use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Position, Url};

use revu_tenant::TenantConfig;

/// Page-screenshot service endpoint (opaque third-party collaborator).
pub const SCREENSHOT_SERVICE_BASE: &str = "https://s0.wp.com/mshots/v1/";

/// Social preview image dimensions requested from the screenshot service.
pub const PREVIEW_WIDTH: u32 = 1200;
pub const PREVIEW_HEIGHT: u32 = 630;

/// The meta properties the rewriter replaces, besides the title element.
pub const REWRITTEN_PROPERTIES: &[&str] = &[
    "og:title",
    "og:description",
    "og:url",
    "og:image",
    "twitter:title",
    "twitter:description",
    "twitter:url",
    "twitter:image",
];

/// Derived metadata values for one tenant on one page URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page title and og/twitter title.
    pub title: String,
    /// og/twitter description.
    pub description: String,
    /// Tenant-qualified canonical URL: `<scheme>://<host><path>?config=<key>`.
    pub canonical_url: String,
    /// Screenshot-preview image URL keyed on the canonical URL.
    pub image_url: String,
}

impl PageMeta {
    /// Derive metadata from a tenant config, the requested page URL and
    /// the resolved tenant key.
    pub fn derive(config: &TenantConfig, page_url: &Url, key: &str) -> Self {
        let display_name = config.display_name();
        let title = format!("Share your experience about {}!", display_name);
        let description = format!(
            "Help {} grow by sharing your feedback. Quick, interactive, and takes less than a minute!",
            display_name
        );

        let canonical_url = format!(
            "{}://{}{}?config={}",
            page_url.scheme(),
            &page_url[Position::BeforeHost..Position::AfterPort],
            page_url.path(),
            key
        );
        let image_url = screenshot_url(&canonical_url);

        Self {
            title,
            description,
            canonical_url,
            image_url,
        }
    }

    /// The replacement value for a `property` attribute, when the
    /// property is one the rewriter owns.
    pub fn value_for(&self, property: &str) -> Option<&str> {
        match property {
            "og:title" | "twitter:title" => Some(&self.title),
            "og:description" | "twitter:description" => Some(&self.description),
            "og:url" | "twitter:url" => Some(&self.canonical_url),
            "og:image" | "twitter:image" => Some(&self.image_url),
            _ => None,
        }
    }
}

/// Build the screenshot-preview URL for a canonical page URL.
pub fn screenshot_url(canonical_url: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(canonical_url.as_bytes()).collect();
    format!(
        "{}{}?w={}&h={}",
        SCREENSHOT_SERVICE_BASE, encoded, PREVIEW_WIDTH, PREVIEW_HEIGHT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summit_config() -> TenantConfig {
        TenantConfig {
            company_name: Some("Summit Roofing".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_canonical_url_echoes_tenant_key() {
        let url = Url::parse("https://summit.reviewsite.com/index.html?config=summit").unwrap();
        let meta = PageMeta::derive(&summit_config(), &url, "summit");
        assert_eq!(
            meta.canonical_url,
            "https://summit.reviewsite.com/index.html?config=summit"
        );
    }

    #[test]
    fn test_canonical_url_strips_other_query_params() {
        let url = Url::parse("https://reviewsite.com/?utm_source=qr&config=summit").unwrap();
        let meta = PageMeta::derive(&summit_config(), &url, "summit");
        assert_eq!(meta.canonical_url, "https://reviewsite.com/?config=summit");
    }

    #[test]
    fn test_canonical_url_keeps_port() {
        let url = Url::parse("http://reviewsite.com:8080/page").unwrap();
        let meta = PageMeta::derive(&summit_config(), &url, "summit");
        assert_eq!(
            meta.canonical_url,
            "http://reviewsite.com:8080/page?config=summit"
        );
    }

    #[test]
    fn test_titles_use_display_name() {
        let url = Url::parse("https://reviewsite.com/").unwrap();
        let meta = PageMeta::derive(&summit_config(), &url, "summit");
        assert_eq!(meta.title, "Share your experience about Summit Roofing!");
        assert!(meta.description.starts_with("Help Summit Roofing grow"));
    }

    #[test]
    fn test_fallback_display_name_for_empty_config() {
        let url = Url::parse("https://reviewsite.com/").unwrap();
        let meta = PageMeta::derive(&TenantConfig::default(), &url, "summit");
        assert_eq!(meta.title, "Share your experience about Roofer!");
    }

    #[test]
    fn test_screenshot_url_is_percent_encoded() {
        let meta_url = screenshot_url("https://reviewsite.com/?config=summit");
        assert!(meta_url.starts_with(SCREENSHOT_SERVICE_BASE));
        assert!(meta_url.ends_with("?w=1200&h=630"));
        // the canonical URL must not appear with raw separators
        assert!(!meta_url[SCREENSHOT_SERVICE_BASE.len()..].contains("://"));
        assert!(meta_url.contains("https%3A%2F%2Freviewsite.com"));
    }

    #[test]
    fn test_value_for_maps_all_rewritten_properties() {
        let url = Url::parse("https://reviewsite.com/").unwrap();
        let meta = PageMeta::derive(&summit_config(), &url, "summit");
        for property in REWRITTEN_PROPERTIES {
            assert!(meta.value_for(property).is_some(), "{}", property);
        }
        assert_eq!(meta.value_for("og:type"), None);
    }
}
