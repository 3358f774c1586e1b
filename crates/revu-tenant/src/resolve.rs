//! Tenant key resolution from the request URL.

use url::Url;

/// Reserved key: the flagship tenant whose branding is the page's
/// built-in default content. The edge rewriter bypasses this key and the
/// page falls back to it when nothing else resolves.
pub const DEFAULT_TENANT: &str = "default";

/// Query parameter carrying an explicit tenant key.
pub const TENANT_QUERY_PARAM: &str = "config";

/// Check whether a host is a local address (no tenant subdomains there).
pub fn is_local_host(host: &str) -> bool {
    host.contains("localhost") || host.starts_with("127.") || !host.contains('.')
}

/// Tenant keys are filename keys; anything else is treated as unresolved.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// First subdomain label, when the host has more than two dot-separated
/// segments and is not a local address.
pub fn subdomain_label(host: &str) -> Option<&str> {
    if is_local_host(host) {
        return None;
    }
    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() > 2 {
        Some(parts[0])
    } else {
        None
    }
}

/// Resolve the tenant key for a request URL.
///
/// Precedence: explicit `config` query parameter, else subdomain label,
/// else none. Malformed keys resolve to none.
pub fn resolve_tenant(url: &Url) -> Option<String> {
    let explicit = url
        .query_pairs()
        .find(|(k, _)| k == TENANT_QUERY_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty());

    let key = match explicit {
        Some(key) => Some(key),
        None => url
            .host_str()
            .and_then(subdomain_label)
            .map(|s| s.to_string()),
    };

    key.filter(|k| is_valid_key(k))
}

/// Resolve the tenant key for the page, falling back to the reserved
/// default key.
pub fn resolve_tenant_or_default(url: &Url) -> String {
    resolve_tenant(url).unwrap_or_else(|| DEFAULT_TENANT.to_string())
}

/// Path of a tenant's config file, relative to the site origin.
pub fn config_path(key: &str) -> String {
    format!("configs/{}.json", key)
}

/// Absolute URL of a tenant's config file on the given origin.
pub fn config_url(origin: &Url, key: &str) -> Result<Url, url::ParseError> {
    origin.join(&format!("/{}", config_path(key)))
}
