//! The tenant config file contract and merged profile.

use serde::{Deserialize, Serialize};

/// Display name used when a config names neither a company nor a person.
pub const FALLBACK_DISPLAY_NAME: &str = "Roofer";

/// Behavior variant for a tenant site.
///
/// Selects validation rules, slider label sets and phrase-pool structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteVariant {
    /// Shared phrase pools parameterized by label text; city required.
    #[default]
    Classic,
    /// Per-label curated phrase pools; service area instead of city.
    Curated,
}

impl SiteVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteVariant::Classic => "classic",
            SiteVariant::Curated => "curated",
        }
    }
}

/// One tenant's `configs/<key>.json` file.
///
/// All fields are optional; the file may be partial. Unknown fields are
/// ignored so configs can be authored ahead of the site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantConfig {
    /// Informal operator name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Branded display name; preferred over `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Pre-filled city for the wizard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Broader location string used by the curated variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_area: Option<String>,
    /// Outbound review-platform URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_review_link: Option<String>,
    /// Behavior variant; defaults to classic when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<SiteVariant>,
}

impl TenantConfig {
    /// Derive the display name the way the rewriter does: company name,
    /// else operator name, else the generic fallback.
    pub fn display_name(&self) -> &str {
        self.company_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }
}

/// A tenant config merged over the built-in defaults.
///
/// The page always renders from a profile, so every field is populated;
/// the defaults are the flagship tenant's branding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantProfile {
    pub name: String,
    pub company_name: String,
    pub city: String,
    pub service_area: String,
    pub google_review_link: String,
    pub variant: SiteVariant,
}

impl Default for TenantProfile {
    fn default() -> Self {
        Self {
            name: "Roofer".to_string(),
            company_name: "Roofing Experts".to_string(),
            city: "Austin".to_string(),
            service_area: "Texas".to_string(),
            google_review_link: "#".to_string(),
            variant: SiteVariant::Classic,
        }
    }
}

impl TenantProfile {
    /// Build a profile by shallow-merging a fetched config over defaults.
    pub fn merged(config: &TenantConfig) -> Self {
        let mut profile = Self::default();
        profile.apply(config);
        profile
    }

    /// Shallow merge: fetched fields win when present.
    pub fn apply(&mut self, config: &TenantConfig) {
        if let Some(name) = &config.name {
            self.name = name.clone();
        }
        if let Some(company_name) = &config.company_name {
            self.company_name = company_name.clone();
        }
        if let Some(city) = &config.city {
            self.city = city.clone();
        }
        if let Some(service_area) = &config.service_area {
            self.service_area = service_area.clone();
        }
        if let Some(link) = &config.google_review_link {
            self.google_review_link = link.clone();
        }
        if let Some(variant) = config.variant {
            self.variant = variant;
        }
    }

    /// Display name for headings and the document title.
    pub fn display_name(&self) -> &str {
        if !self.company_name.is_empty() {
            &self.company_name
        } else if !self.name.is_empty() {
            &self.name
        } else {
            FALLBACK_DISPLAY_NAME
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_parses() {
        let config: TenantConfig =
            serde_json::from_str(r#"{"companyName": "Summit Roofing"}"#).unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Summit Roofing"));
        assert_eq!(config.name, None);
        assert_eq!(config.variant, None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let config: TenantConfig =
            serde_json::from_str(r##"{"city": "Dallas", "themeColor": "#facc15"}"##).unwrap();
        assert_eq!(config.city.as_deref(), Some("Dallas"));
    }

    #[test]
    fn test_display_name_precedence() {
        let mut config = TenantConfig {
            name: Some("Saad".to_string()),
            company_name: Some("Saad Roofing".to_string()),
            ..Default::default()
        };
        assert_eq!(config.display_name(), "Saad Roofing");

        config.company_name = None;
        assert_eq!(config.display_name(), "Saad");

        config.name = None;
        assert_eq!(config.display_name(), FALLBACK_DISPLAY_NAME);
    }

    #[test]
    fn test_empty_strings_do_not_count_as_names() {
        let config = TenantConfig {
            name: Some(String::new()),
            company_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.display_name(), FALLBACK_DISPLAY_NAME);
    }

    #[test]
    fn test_merge_keeps_defaults_for_absent_fields() {
        let config = TenantConfig {
            company_name: Some("Summit Roofing".to_string()),
            variant: Some(SiteVariant::Curated),
            ..Default::default()
        };

        let profile = TenantProfile::merged(&config);
        assert_eq!(profile.company_name, "Summit Roofing");
        assert_eq!(profile.variant, SiteVariant::Curated);
        // untouched fields keep defaults
        assert_eq!(profile.city, "Austin");
        assert_eq!(profile.google_review_link, "#");
    }

    #[test]
    fn test_variant_parses_from_config() {
        let config: TenantConfig = serde_json::from_str(r#"{"variant": "curated"}"#).unwrap();
        assert_eq!(config.variant, Some(SiteVariant::Curated));

        let config: TenantConfig = serde_json::from_str(r#"{"variant": "classic"}"#).unwrap();
        assert_eq!(config.variant, Some(SiteVariant::Classic));
    }
}
