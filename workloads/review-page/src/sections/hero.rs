//! Hero section with the tenant's branding.

use revu_sdk::revu_tenant::TenantProfile;

use super::html_escape;

/// Render the hero banner.
pub fn render_hero(profile: &TenantProfile) -> String {
    format!(
        r##"<section class="hero" data-section="hero">
    <div class="hero-content">
        <h1 class="hero-title">
            <span class="line">Loved the work by</span>
            <span class="line company-name" id="titleCompanyName">{}</span>
        </h1>
        <p class="hero-subtitle">Share your experience in under a minute and help your neighbors find a roofer they can trust.</p>
        <a href="#review-engine" class="hero-cta">Write my review</a>
    </div>
</section>"##,
        html_escape(profile.display_name())
    )
}
