//! Per-tenant metadata rewriter - edge middleware workload.
//!
//! Sits in front of the static site and rewrites the page head (title
//! and og/twitter tags) for the tenant resolved from the request. Every
//! failure on this path serves the upstream response unmodified; the
//! rewriter must never be the reason a visitor sees an error.

use spin_sdk::http::{Fields, IncomingRequest, Method, OutgoingResponse, ResponseOutparam};
use spin_sdk::http_component;
use url::Url;

use revu_sdk::revu_core::{RequestContext, WorkloadManifest};
use revu_sdk::revu_observability::StructuredLogger;
use revu_sdk::revu_rewrite::{is_html, should_bypass, MetaRewriter, PageMeta};
use revu_sdk::revu_streaming::StreamingSink;
use revu_sdk::revu_tenant::{
    config_url, resolve_tenant, ConfigClient, FetchError, SpinConfigSource, DEFAULT_TENANT,
};

/// Route prefix of the static fileserver component serving the site.
const ASSET_ROUTE: &str = "/assets";

/// Chunk size for streaming the upstream body through the rewriter.
const STREAM_CHUNK_BYTES: usize = 16 * 1024;

fn manifest() -> WorkloadManifest {
    WorkloadManifest::new("meta-rewriter", env!("CARGO_PKG_VERSION"))
}

/// Metadata rewriter handler.
#[http_component]
async fn handle_rewrite(req: IncomingRequest, response_out: ResponseOutparam) {
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
    let path = page_url
        .as_ref()
        .map(|u| u.path().to_string())
        .unwrap_or_else(|| path_with_query.clone());

    let mut logger = StructuredLogger::new(ctx.request_id.clone())
        .with_workload(manifest().name)
        .with_route(path.clone());

    // Static assets and the configs storage area are never intercepted.
    let mut meta = None;
    if !should_bypass(&path) {
        if let Some(url) = page_url.as_ref() {
            match resolve_tenant(url) {
                Some(key) if key != DEFAULT_TENANT => {
                    logger = logger.with_tenant(key.clone());
                    match fetch_tenant_meta(url, &key).await {
                        Ok(derived) => meta = Some(derived),
                        Err(e) => {
                            // missing/invalid config: serve the page as-is
                            logger
                                .warn_builder("config fetch failed, serving unmodified")
                                .field("error", e.to_string())
                                .emit();
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let upstream = match fetch_upstream(&path).await {
        Ok(upstream) => upstream,
        Err(e) => {
            logger
                .warn_builder("upstream fetch failed")
                .field("error", e.to_string())
                .emit();
            let headers = Fields::from_list(&[]).unwrap();
            let response = OutgoingResponse::new(headers);
            response.set_status_code(502).unwrap();
            response_out.set(response);
            return;
        }
    };

    let header_list: Vec<(String, Vec<u8>)> = vec![
        ("content-type".to_owned(), upstream.content_type.clone().into_bytes()),
        ("x-request-id".to_owned(), ctx.request_id.to_string().into()),
    ];
    let headers = Fields::from_list(&header_list).unwrap();
    let response = OutgoingResponse::new(headers);
    response.set_status_code(upstream.status).unwrap();

    let body = response.take_body();
    response_out.set(response);
    let mut sink = StreamingSink::new(body, ctx.timing.clone());

    // Only transform successful HTML responses for a resolved tenant.
    let rewritable = upstream.status == 200 && is_html(&upstream.content_type);
    let result = match meta {
        Some(meta) if rewritable => {
            logger.info("rewriting page metadata");
            stream_rewritten(&mut sink, &upstream.body, meta).await
        }
        _ => stream_passthrough(&mut sink, &upstream.body).await,
    };

    if let Err(e) = result {
        logger.error(&format!("response streaming failed: {}", e));
        return;
    }
    let _ = sink.complete();
}

/// Derive the page metadata for a tenant from its config file.
async fn fetch_tenant_meta(page_url: &Url, key: &str) -> Result<PageMeta, FetchError> {
    let url = config_url(page_url, key)
        .map_err(|e| FetchError::Request(e.to_string()))?;
    let config = ConfigClient::new(SpinConfigSource)
        .fetch_config(url.as_str())
        .await?;
    Ok(PageMeta::derive(&config, page_url, key))
}

struct UpstreamResponse {
    status: u16,
    content_type: String,
    body: Vec<u8>,
}

/// Fetch the original response from the static fileserver component.
///
/// Relative URLs route back into the application, so the fileserver
/// answers without leaving the deployment.
async fn fetch_upstream(path: &str) -> Result<UpstreamResponse, FetchError> {
    let file_path = if path == "/" { "/index.html" } else { path };
    let upstream_url = format!("{}{}", ASSET_ROUTE, file_path);

    let req = spin_sdk::http::Request::get(upstream_url.as_str());
    let resp: spin_sdk::http::Response = spin_sdk::http::send(req)
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let content_type = resp
        .header("content-type")
        .and_then(|v| v.as_str())
        .unwrap_or("application/octet-stream")
        .to_string();

    Ok(UpstreamResponse {
        status: *resp.status(),
        content_type,
        body: resp.body().to_vec(),
    })
}

/// Stream the upstream body through the head rewriter.
async fn stream_rewritten<S, E>(
    sink: &mut StreamingSink<S, E>,
    body: &[u8],
    meta: PageMeta,
) -> Result<(), revu_sdk::revu_core::WorkloadError>
where
    S: futures::Sink<Vec<u8>, Error = E> + Unpin,
    E: std::fmt::Display,
{
    let mut rewriter = MetaRewriter::new(meta);
    let mut head_sent = false;

    for chunk in body.chunks(STREAM_CHUNK_BYTES) {
        let out = rewriter.push(chunk);
        if out.is_empty() {
            continue;
        }
        if !head_sent {
            match String::from_utf8(out) {
                Ok(text) => sink.send_head(&text).await?,
                Err(err) => {
                    sink.send_head("").await?;
                    sink.send_raw(err.into_bytes()).await?;
                }
            }
            head_sent = true;
        } else {
            sink.send_raw(out).await?;
        }
    }

    let tail = rewriter.finish();
    if !head_sent {
        sink.send_head("").await?;
    }
    if !tail.is_empty() {
        sink.send_raw(tail).await?;
    }

    Ok(())
}

/// Stream the upstream body byte-for-byte.
async fn stream_passthrough<S, E>(
    sink: &mut StreamingSink<S, E>,
    body: &[u8],
) -> Result<(), revu_sdk::revu_core::WorkloadError>
where
    S: futures::Sink<Vec<u8>, Error = E> + Unpin,
    E: std::fmt::Display,
{
    sink.send_head("").await?;
    for chunk in body.chunks(STREAM_CHUNK_BYTES) {
        sink.send_raw(chunk.to_vec()).await?;
    }
    Ok(())
}

/// Reconstruct the request URL.
///
/// Spin forwards the externally visible URL in the `spin-full-url`
/// header; fall back to the host header otherwise.
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
