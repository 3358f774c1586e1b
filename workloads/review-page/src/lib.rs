//! Review solicitation landing page - streaming SSR workload.
//!
//! This workload demonstrates the full tenant flow:
//! - Tenant resolution (query param > subdomain > default key)
//! - Config fetched from static storage, merged over defaults
//! - Branding applied to title, hero, city field and the review link
//! - The wizard rendered head-first as streamed sections
//! - `GET /api/review` synthesizing the review text server-side

mod api;
mod sections;

use spin_sdk::http::{Fields, IncomingRequest, Method, OutgoingResponse, ResponseOutparam};
use spin_sdk::http_component;
use url::Url;

use revu_sdk::revu_core::{RequestContext, WorkloadManifest};
use revu_sdk::revu_observability::StructuredLogger;
use revu_sdk::revu_rewrite::PageMeta;
use revu_sdk::revu_streaming::{HeadContent, PageShell, StreamingSink};
use revu_sdk::revu_tenant::{
    config_path, resolve_tenant_or_default, ConfigClient, SpinConfigSource, TenantConfig,
    TenantProfile, DEFAULT_TENANT,
};
use revu_sdk::revu_wizard::{axis_labels, SatisfactionAxis, WizardFlow};

use sections::{render_hero, render_wizard};

fn manifest() -> WorkloadManifest {
    WorkloadManifest::new("review-page", env!("CARGO_PKG_VERSION"))
}

/// Review landing page handler.
#[http_component]
async fn handle_review_page(req: IncomingRequest, response_out: ResponseOutparam) {
    // Only handle GET requests
    if req.method() != Method::Get {
        let headers = Fields::from_list(&[]).unwrap();
        let response = OutgoingResponse::new(headers);
        response.set_status_code(405).unwrap();
        response_out.set(response);
        return;
    }

    let path_with_query = req.path_with_query().unwrap_or_else(|| "/".to_string());
    let ctx = RequestContext::new(revu_sdk::revu_core::Method::Get, path_with_query.clone());

    let page_url = request_url(&req, &path_with_query);
    let key = page_url
        .as_ref()
        .map(resolve_tenant_or_default)
        .unwrap_or_else(|| DEFAULT_TENANT.to_string());

    let logger = StructuredLogger::new(ctx.request_id.clone())
        .with_workload(manifest().name)
        .with_tenant(key.clone())
        .with_route(path_with_query.clone());

    // Load the tenant config relative to the site origin; failure is
    // logged and the page stays usable on defaults.
    let mut profile = TenantProfile::default();
    let mut config = TenantConfig::default();
    match ConfigClient::new(SpinConfigSource)
        .fetch_config(&format!("/{}", config_path(&key)))
        .await
    {
        Ok(fetched) => {
            profile.apply(&fetched);
            config = fetched;
            logger
                .info_builder("tenant config applied")
                .field("variant", profile.variant.as_str())
                .emit();
        }
        Err(e) => {
            logger
                .warn_builder("config fetch failed, using defaults")
                .field("error", e.to_string())
                .emit();
        }
    }

    // Review generation endpoint
    let path = page_url
        .as_ref()
        .map(|u| u.path().to_string())
        .unwrap_or_else(|| path_with_query.clone());
    if path.ends_with("/api/review") {
        let body = match &page_url {
            Some(url) => api::review_response(&profile, url),
            None => serde_json::json!({ "review": "" }).to_string(),
        };
        let header_list: Vec<(String, Vec<u8>)> = vec![
            ("content-type".to_owned(), "application/json".into()),
            ("cache-control".to_owned(), "no-store".into()),
            ("x-request-id".to_owned(), ctx.request_id.to_string().into()),
        ];
        let headers = Fields::from_list(&header_list).unwrap();
        let response = OutgoingResponse::new(headers);
        response.set_status_code(200).unwrap();
        let body_sink = response.take_body();
        response_out.set(response);
        let mut sink = StreamingSink::new(body_sink, ctx.timing.clone());
        let _ = sink.send_head(&body).await;
        let _ = sink.complete();
        return;
    }

    // Build response headers
    let header_list: Vec<(String, Vec<u8>)> = vec![
        ("content-type".to_owned(), "text/html; charset=utf-8".into()),
        ("x-request-id".to_owned(), ctx.request_id.to_string().into()),
        (
            "cache-control".to_owned(),
            "public, max-age=300, stale-while-revalidate=60".into(),
        ),
    ];
    let headers = Fields::from_list(&header_list).unwrap();
    let response = OutgoingResponse::new(headers);
    response.set_status_code(200).unwrap();

    let body = response.take_body();
    response_out.set(response);
    let mut sink = StreamingSink::new(body, ctx.timing.clone());

    let flow = WizardFlow::new(profile.variant).with_city(profile.city.clone());
    let shell = create_shell(&profile, &config, &key, page_url.as_ref());

    // Send shell first (streaming SSR)
    if let Err(e) = sink.send_head(&shell.render_opening()).await {
        logger.error(&format!("Failed to send shell: {}", e));
        return;
    }

    let _ = sink.send_section("hero", &render_hero(&profile)).await;
    let _ = sink
        .send_section("wizard", &render_wizard(&flow, &profile))
        .await;

    // Send closing shell with the client glue script
    let closing = format!("{}\n{}", shell.render_closing(), page_scripts(&flow, &key));
    let _ = sink.send_section("closing", &closing).await;
    let _ = sink.complete();
}

/// Create the page shell with tenant branding applied.
fn create_shell(
    profile: &TenantProfile,
    config: &TenantConfig,
    key: &str,
    page_url: Option<&Url>,
) -> PageShell {
    let display_name = profile.display_name();
    let mut head = HeadContent::new(format!("{} - Leave a Review", display_name))
        .with_meta("viewport", "width=device-width, initial-scale=1")
        .with_meta(
            "description",
            &format!(
                "Help {} grow by sharing your feedback. Quick, interactive, and takes less than a minute!",
                display_name
            ),
        )
        .with_style(PAGE_STYLES);

    // Social metadata: tenant-qualified when a real tenant resolved, so
    // shared links preview correctly even without the edge rewriter.
    if let Some(url) = page_url {
        if key != DEFAULT_TENANT {
            let meta = PageMeta::derive(config, url, key);
            for property in ["og:title", "twitter:title"] {
                head = head.with_property_meta(property, &meta.title);
            }
            for property in ["og:description", "twitter:description"] {
                head = head.with_property_meta(property, &meta.description);
            }
            for property in ["og:url", "twitter:url"] {
                head = head.with_property_meta(property, &meta.canonical_url);
            }
            for property in ["og:image", "twitter:image"] {
                head = head.with_property_meta(property, &meta.image_url);
            }
        }
    }

    PageShell::new(head)
        .with_body_start(
            r#"<body>
<main>
"#,
        )
        .with_body_end(
            r#"
</main>
<footer class="site-footer">
    <p>Powered by Revu</p>
</footer>
</body>
</html>"#,
        )
}

/// Client glue: wires the rendered wizard to the review endpoint.
///
/// The state machine rules mirror `revu_wizard::WizardFlow`; the label
/// tables are injected from the same Rust source of truth.
fn page_scripts(flow: &WizardFlow, key: &str) -> String {
    let labels = serde_json::json!({
        "professionalism": axis_labels(SatisfactionAxis::Professionalism, flow.variant),
        "communication": axis_labels(SatisfactionAxis::Communication, flow.variant),
        "timeliness": axis_labels(SatisfactionAxis::Timeliness, flow.variant),
    });

    let bootstrap = format!(
        "const siteVariant = {};\nconst tenantKey = {};\nconst sliderLabels = {};\nconst wizardState = {{ step: 1, service: '', city: {}, professionalism: {}, communication: {}, timeliness: {} }};",
        js_string(flow.variant.as_str()),
        js_string(key),
        labels,
        js_string(&flow.city),
        js_string(flow.label(SatisfactionAxis::Professionalism)),
        js_string(flow.label(SatisfactionAxis::Communication)),
        js_string(flow.label(SatisfactionAxis::Timeliness)),
    );

    format!("<script>\n{}\n{}</script>", bootstrap, WIZARD_SCRIPT)
}

fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Reconstruct the request URL from Spin's forwarded header, else the
/// host header.
fn request_url(req: &IncomingRequest, path_with_query: &str) -> Option<Url> {
    if let Some(full) = header_value(req, "spin-full-url") {
        if let Ok(url) = Url::parse(&full) {
            return Some(url);
        }
    }

    let host = header_value(req, "host")?;
    let scheme = if host.contains("localhost") || host.starts_with("127.") {
        "http"
    } else {
        "https"
    };
    Url::parse(&format!("{}://{}{}", scheme, host, path_with_query)).ok()
}

fn header_value(req: &IncomingRequest, name: &str) -> Option<String> {
    req.headers()
        .get(&name.to_string())
        .into_iter()
        .next()
        .map(|v| String::from_utf8_lossy(&v).into_owned())
}

const WIZARD_SCRIPT: &str = r#"
const requireCity = siteVariant === 'classic';

function qs(sel) { return document.querySelector(sel); }
function qsa(sel) { return Array.from(document.querySelectorAll(sel)); }

function validateStep(step) {
    if (step === 1) return wizardState.service !== '' && (!requireCity || wizardState.city.trim() !== '');
    return true;
}

function updateUI(shouldScroll) {
    if (shouldScroll) {
        qs('#review-engine').scrollIntoView({ behavior: 'smooth', block: 'start' });
    }
    const progress = ((wizardState.step - 1) / 3) * 100;
    qs('#progressBar').style.width = progress + '%';
    qsa('.step-dot').forEach((dot, idx) => {
        dot.classList.toggle('active', idx + 1 === wizardState.step);
        dot.classList.toggle('completed', idx + 1 < wizardState.step);
    });
    qsa('.wizard-step').forEach(s => {
        s.classList.toggle('active', parseInt(s.dataset.step) === wizardState.step);
    });
}

function shake(step) {
    const el = qs('.wizard-step[data-step="' + step + '"]');
    el.classList.remove('shake');
    void el.offsetWidth;
    el.classList.add('shake');
}

function nextStep() {
    if (!validateStep(wizardState.step)) {
        shake(wizardState.step);
        return;
    }
    if (wizardState.step < 4) {
        wizardState.step++;
        updateUI(true);
    }
    if (wizardState.step === 4) {
        generateReview();
    }
}

function prevStep() {
    if (wizardState.step > 1) {
        wizardState.step--;
        updateUI(true);
    }
}

async function generateReview() {
    const params = new URLSearchParams({
        config: tenantKey,
        service: wizardState.service,
        city: wizardState.city,
        professionalism: wizardState.professionalism,
        communication: wizardState.communication,
        timeliness: wizardState.timeliness,
        comments: qs('#additionalComments').value
    });
    try {
        const resp = await fetch('/api/review?' + params.toString());
        const data = await resp.json();
        qs('#reviewText').innerText = data.review;
    } catch (err) {
        console.error('Review generation failed:', err);
    }
}

document.addEventListener('DOMContentLoaded', () => {
    qsa('.shape-option').forEach(opt => {
        opt.addEventListener('click', () => {
            wizardState.service = opt.dataset.value;
            qsa('.shape-option').forEach(o => o.classList.remove('selected'));
            opt.classList.add('selected');
        });
    });

    qs('#cityInput').addEventListener('input', e => {
        wizardState.city = e.target.value;
        qs('#cityBadge').classList.add('hidden');
    });

    qs('#confirmCityBtn').addEventListener('click', () => {
        const badge = qs('#cityBadge');
        badge.innerText = '✅ Confirmed';
        badge.classList.remove('hidden');
        setTimeout(() => {
            badge.classList.add('hidden');
            if (wizardState.service) nextStep();
        }, 800);
    });

    ['professionalism', 'communication', 'timeliness'].forEach(axis => {
        const slider = qs('#' + axis + 'Slider');
        if (!slider) return;
        slider.addEventListener('input', e => {
            const val = parseInt(e.target.value);
            const label = sliderLabels[axis][val - 1];
            wizardState[axis] = label;
            qs('#' + axis + 'Display').innerText = label;
            slider.style.setProperty('--range-percent', ((val - 1) * 50) + '%');
            if (siteVariant === 'curated') {
                qsa('.slider-label[data-axis="' + axis + '"]').forEach(el => {
                    el.classList.toggle('highlighted', parseInt(el.dataset.index) === val);
                });
            }
        });
    });

    qsa('.next-btn').forEach(btn => btn.addEventListener('click', nextStep));
    qsa('.prev-btn').forEach(btn => btn.addEventListener('click', prevStep));

    qs('#copyBtn').addEventListener('click', () => {
        const btn = qs('#copyBtn');
        const text = qs('#reviewText').innerText;
        navigator.clipboard.writeText(text).catch(err => console.error('Clipboard write failed:', err));
        const original = btn.innerHTML;
        btn.innerHTML = '✅ Copied!';
        btn.classList.add('copied');
        setTimeout(() => {
            btn.innerHTML = original;
            btn.classList.remove('copied');
        }, 2000);
    });

    updateUI(false);
});
"#;

const PAGE_STYLES: &str = r##"
:root {
    --accent: #facc15;
    --accent-dark: #ca8a04;
    --bg: #0f172a;
    --surface: #1e293b;
    --text: #f8fafc;
    --text-muted: #94a3b8;
    --border: #334155;
    --success: #10b981;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    line-height: 1.6;
}

/* Hero */
.hero {
    padding: 6rem 2rem 4rem;
    text-align: center;
}

.hero-title .line {
    display: block;
    font-size: 2.5rem;
    font-weight: 800;
    line-height: 1.15;
}

.hero-title .company-name {
    color: var(--accent);
}

.hero-subtitle {
    max-width: 520px;
    margin: 1.25rem auto 2rem;
    color: var(--text-muted);
}

.hero-cta {
    display: inline-block;
    background: var(--accent);
    color: #1c1917;
    padding: 0.875rem 2rem;
    border-radius: 8px;
    font-weight: 600;
    text-decoration: none;
}

/* Wizard */
.review-engine {
    max-width: 640px;
    margin: 0 auto;
    padding: 2rem;
}

.wizard-progress {
    margin-bottom: 2rem;
}

.progress-track {
    height: 6px;
    background: var(--border);
    border-radius: 3px;
    overflow: hidden;
}

.progress-bar {
    height: 100%;
    background: var(--accent);
    transition: width 0.3s ease;
}

.step-dots {
    display: flex;
    justify-content: space-between;
    margin-top: 0.75rem;
}

.step-dot {
    width: 12px;
    height: 12px;
    border-radius: 50%;
    background: var(--border);
}

.step-dot.active { background: var(--accent); }
.step-dot.completed { background: var(--success); }

.wizard-step { display: none; }
.wizard-step.active { display: block; }

.wizard-step h2 {
    margin-bottom: 1.25rem;
}

.wizard-step.shake {
    animation: shake 0.4s;
}

@keyframes shake {
    0%, 100% { transform: translateX(0); }
    20%, 60% { transform: translateX(10px); }
    40%, 80% { transform: translateX(-10px); }
}

.shape-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
    gap: 0.75rem;
    margin-bottom: 1.5rem;
}

.shape-option {
    background: var(--surface);
    border: 1px solid var(--border);
    border-radius: 10px;
    color: var(--text);
    padding: 1rem;
    cursor: pointer;
    font-size: 0.9375rem;
}

.shape-option.selected {
    border-color: var(--accent);
    background: rgba(250, 204, 21, 0.08);
}

.option-icon {
    display: block;
    font-size: 1.5rem;
    margin-bottom: 0.375rem;
}

.city-row {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    margin-bottom: 1.5rem;
}

.city-row input {
    flex: 1;
    padding: 0.75rem 1rem;
    background: var(--surface);
    border: 1px solid var(--border);
    border-radius: 8px;
    color: var(--text);
}

.city-badge {
    background: var(--success);
    color: #fff;
    padding: 0.25rem 0.625rem;
    border-radius: 999px;
    font-size: 0.8125rem;
}

.city-badge.hidden { display: none; }

.confirm-city-btn {
    background: transparent;
    border: 1px solid var(--border);
    color: var(--text);
    padding: 0.625rem 1rem;
    border-radius: 8px;
    cursor: pointer;
}

/* Sliders */
.slider-group {
    margin-bottom: 1.75rem;
}

.slider-head {
    display: flex;
    justify-content: space-between;
    margin-bottom: 0.5rem;
}

.slider-display {
    color: var(--accent);
    font-weight: 600;
}

.slider-group input[type="range"] {
    width: 100%;
    appearance: none;
    height: 6px;
    border-radius: 3px;
    background: linear-gradient(to right, var(--accent) var(--range-percent, 100%), var(--border) var(--range-percent, 100%));
}

.slider-group input[type="range"]::-webkit-slider-thumb {
    appearance: none;
    width: 20px;
    height: 20px;
    border-radius: 50%;
    background: var(--accent);
    cursor: pointer;
}

.slider-labels {
    display: flex;
    justify-content: space-between;
    margin-top: 0.375rem;
    font-size: 0.8125rem;
    color: var(--text-muted);
}

.slider-label.highlighted {
    color: var(--accent);
    font-weight: 600;
}

/* Comments */
#additionalComments {
    width: 100%;
    background: var(--surface);
    border: 1px solid var(--border);
    border-radius: 8px;
    color: var(--text);
    padding: 0.875rem 1rem;
    margin-bottom: 1.5rem;
    resize: vertical;
}

/* Review */
.review-text {
    background: var(--surface);
    border: 1px solid var(--border);
    border-radius: 10px;
    padding: 1.25rem;
    min-height: 7rem;
    margin-bottom: 1.25rem;
}

.review-actions {
    display: flex;
    gap: 0.75rem;
    flex-wrap: wrap;
    margin-bottom: 1.5rem;
}

.copy-btn {
    background: var(--accent);
    border: none;
    color: #1c1917;
    padding: 0.75rem 1.25rem;
    border-radius: 8px;
    font-weight: 600;
    cursor: pointer;
}

.copy-btn.copied { background: var(--success); color: #fff; }

.google-btn {
    background: transparent;
    border: 1px solid var(--border);
    color: var(--text);
    padding: 0.75rem 1.25rem;
    border-radius: 8px;
    text-decoration: none;
}

/* Navigation */
.step-nav {
    display: flex;
    justify-content: space-between;
    gap: 0.75rem;
}

.step-nav .next-btn {
    margin-left: auto;
    background: var(--accent);
    border: none;
    color: #1c1917;
    padding: 0.75rem 1.75rem;
    border-radius: 8px;
    font-weight: 600;
    cursor: pointer;
}

.step-nav .prev-btn {
    background: transparent;
    border: 1px solid var(--border);
    color: var(--text-muted);
    padding: 0.75rem 1.25rem;
    border-radius: 8px;
    cursor: pointer;
}

/* Footer */
.site-footer {
    text-align: center;
    padding: 3rem 1rem 2rem;
    color: var(--text-muted);
    font-size: 0.875rem;
}

@media (max-width: 600px) {
    .hero-title .line { font-size: 1.875rem; }
    .city-row { flex-wrap: wrap; }
}
"##;
