//! Page Cache Middleware
//!
//! Whole-response cache wrapping an endpoint: within the TTL window a request
//! is answered from the stored body without invoking the handler at all. The
//! layer is independent of the property collection cache, so both expirations
//! stack on the list endpoint.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::RwLock;
use tracing::debug;

// == Page Key Function ==
/// Derives the cache key for a request.
pub type PageKeyFn = fn(&Method, &Uri) -> String;

/// Default key derivation: method + path + query.
pub fn default_page_key(method: &Method, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{} {}?{}", method, uri.path(), query),
        None => format!("{} {}", method, uri.path()),
    }
}

// == Page Entry ==
/// A stored response with its expiration deadline.
#[derive(Debug, Clone)]
struct PageEntry {
    body: Bytes,
    headers: HeaderMap,
    expires_at: Instant,
}

impl PageEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// == Page Cache ==
/// Keyed store of rendered responses with a fixed TTL.
#[derive(Clone)]
pub struct PageCache {
    /// Stored pages by derived request key
    entries: Arc<RwLock<HashMap<String, PageEntry>>>,
    /// Expiry applied to every stored page
    ttl: Duration,
    /// Cache key derivation
    key_fn: PageKeyFn,
}

impl PageCache {
    // == Constructor ==
    /// Creates a page cache with the given TTL in seconds and the default
    /// method + path + query key derivation.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_seconds),
            key_fn: default_page_key,
        }
    }

    // == Key Function Override ==
    /// Replaces the key derivation function.
    pub fn with_key_fn(mut self, key_fn: PageKeyFn) -> Self {
        self.key_fn = key_fn;
        self
    }

    // == Lookup ==
    /// Returns the stored page for `key` if present and unexpired.
    async fn lookup(&self, key: &str) -> Option<PageEntry> {
        let entries = self.entries.read().await;
        entries.get(key).filter(|entry| !entry.is_expired()).cloned()
    }

    // == Store ==
    /// Stores a rendered page under `key`.
    async fn store(&self, key: String, body: Bytes, headers: HeaderMap) {
        let entry = PageEntry {
            body,
            headers,
            expires_at: Instant::now() + self.ttl,
        };
        let mut entries = self.entries.write().await;
        entries.insert(key, entry);
    }

    // == Sweep Expired ==
    /// Removes expired pages and returns how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    /// Current number of stored pages, live or expired.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when no pages are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// == Middleware ==
/// Serves GET responses from the page cache, filling it on the way out.
///
/// Only successful (200) GET responses are stored; everything else passes
/// through untouched. A replayed page carries the stored response's full
/// header map and body, so it is indistinguishable from the first render.
pub async fn page_cache_middleware(
    State(cache): State<PageCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = (cache.key_fn)(request.method(), request.uri());

    if let Some(entry) = cache.lookup(&key).await {
        debug!("Page cache hit: {}", key);
        let mut response = Response::new(Body::from(entry.body));
        *response.headers_mut() = entry.headers;
        return response;
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    cache.store(key, bytes.clone(), parts.headers.clone()).await;

    Response::from_parts(parts, Body::from(bytes))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use tower::util::ServiceExt;

    /// Router whose handler stamps each render with a fresh counter value,
    /// so tests can tell a replayed page from a re-rendered one.
    fn counting_app(cache: PageCache) -> (Router, Arc<AtomicUsize>) {
        let renders = Arc::new(AtomicUsize::new(0));
        let handler_renders = renders.clone();

        let app = Router::new()
            .route(
                "/",
                get(move || {
                    let renders = handler_renders.clone();
                    async move {
                        let n = renders.fetch_add(1, Ordering::SeqCst);
                        ([("x-render-id", n.to_string())], format!("render {}", n))
                    }
                }),
            )
            .layer(from_fn_with_state(cache, page_cache_middleware));

        (app, renders)
    }

    async fn get_response(app: Router, uri: &str) -> Response {
        app.oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_default_page_key_without_query() {
        let uri: Uri = "/properties/".parse().unwrap();
        assert_eq!(default_page_key(&Method::GET, &uri), "GET /properties/");
    }

    #[test]
    fn test_default_page_key_with_query() {
        let uri: Uri = "/properties/?page=2".parse().unwrap();
        assert_eq!(
            default_page_key(&Method::GET, &uri),
            "GET /properties/?page=2"
        );
    }

    #[tokio::test]
    async fn test_lookup_returns_stored_page() {
        let cache = PageCache::new(900);
        cache
            .store(
                "GET /x".to_string(),
                Bytes::from_static(b"body"),
                HeaderMap::new(),
            )
            .await;

        let entry = cache.lookup("GET /x").await.unwrap();
        assert_eq!(entry.body, Bytes::from_static(b"body"));
    }

    #[tokio::test]
    async fn test_lookup_ignores_expired_page() {
        let cache = PageCache::new(0);
        cache
            .store(
                "GET /x".to_string(),
                Bytes::from_static(b"body"),
                HeaderMap::new(),
            )
            .await;

        assert!(cache.lookup("GET /x").await.is_none());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired_pages() {
        let live = PageCache::new(900);
        live.store(
            "GET /live".to_string(),
            Bytes::from_static(b"a"),
            HeaderMap::new(),
        )
        .await;
        assert_eq!(live.sweep_expired().await, 0);
        assert_eq!(live.len().await, 1);

        let expired = PageCache::new(0);
        expired
            .store(
                "GET /dead".to_string(),
                Bytes::from_static(b"b"),
                HeaderMap::new(),
            )
            .await;
        assert_eq!(expired.sweep_expired().await, 1);
        assert!(expired.is_empty().await);
    }

    #[tokio::test]
    async fn test_replayed_page_keeps_original_headers() {
        let (app, renders) = counting_app(PageCache::new(900));

        let first = get_response(app.clone(), "/").await;
        assert_eq!(first.headers()["x-render-id"], "0");

        let second = get_response(app, "/").await;

        // Served from cache: the handler ran once, and the replay carries
        // the first render's headers
        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(second.headers()["x-render-id"], "0");
        assert_eq!(
            second.headers()["content-type"],
            first.headers()["content-type"]
        );
    }

    #[tokio::test]
    async fn test_custom_key_fn_collapses_query_strings() {
        // Path-only keys treat every query variant as the same page
        fn path_only_key(_method: &Method, uri: &Uri) -> String {
            uri.path().to_string()
        }

        let cache = PageCache::new(900).with_key_fn(path_only_key);
        let (app, renders) = counting_app(cache);

        let first = get_response(app.clone(), "/?page=1").await;
        let second = get_response(app, "/?page=2").await;

        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(first.headers()["x-render-id"], "0");
        assert_eq!(second.headers()["x-render-id"], "0");
    }

    #[tokio::test]
    async fn test_default_key_fn_separates_query_strings() {
        let (app, renders) = counting_app(PageCache::new(900));

        get_response(app.clone(), "/?page=1").await;
        get_response(app, "/?page=2").await;

        assert_eq!(renders.load(Ordering::SeqCst), 2);
    }
}
