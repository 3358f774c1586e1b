//! Interception rules: which requests the rewriter touches.

/// Extensions served as static assets; never intercepted.
pub const STATIC_ASSET_EXTENSIONS: &[&str] = &[
    "js", "css", "json", "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "woff", "woff2",
];

/// Check whether a path names a static asset by extension.
pub fn is_static_asset(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((_, ext)) => STATIC_ASSET_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        None => false,
    }
}

/// Check whether a path points into the configs storage area.
pub fn is_config_path(path: &str) -> bool {
    path.contains("/configs/")
}

/// Check whether the rewriter should leave a request alone entirely
/// (no config fetch, response passes through untouched).
pub fn should_bypass(path: &str) -> bool {
    is_static_asset(path) || is_config_path(path)
}

/// Check whether a response content type is rewritable HTML.
pub fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html")
}
