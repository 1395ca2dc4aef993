//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, and dispatching.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler::cafe;
use crate::http;
use crate::logger;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let is_head = *method == Method::HEAD;

    let response = respond(method, uri.path(), uri.query(), is_head, &state);

    if state.config.logging.access_log {
        logger::log_access(method, uri, response.status().as_u16());
    }

    Ok(response)
}

/// Dispatch a request described by its components
///
/// Split out from [`handle_request`] so the full routing behavior is
/// exercisable without a live connection.
fn respond(
    method: &Method,
    path: &str,
    query: Option<&str>,
    is_head: bool,
    state: &AppState,
) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    // 2. Health probe (highest priority, always fast)
    if state.config.http.health_enabled && path == state.config.http.health_path {
        return http::build_health_response("ok");
    }

    // 3. Café listing endpoint
    if path == "/cafe" {
        return cafe::handle(query, &state.directory, is_head);
    }

    // 4. No other routes are defined
    http::build_404_response()
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        Config, DirectoryConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    };
    use crate::directory::CafeDirectory;
    use http_body_util::BodyExt;

    fn test_state() -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                server_name: "Cafe-Server/0.1".to_string(),
                enable_cors: false,
                health_enabled: true,
                health_path: "/healthz".to_string(),
            },
            directory: DirectoryConfig::default(),
        };
        AppState::new(config, CafeDirectory::built_in())
    }

    fn get(path: &str, query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
        respond(&Method::GET, path, query, false, state)
    }

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_cafe_negative() {
        let state = test_state();
        let cases = [
            (None, "unknown city"),
            (Some("city=omsk"), "unknown city"),
            (Some("city=tula&count=na"), "incorrect count"),
        ];

        for (query, message) in cases {
            let response = get("/cafe", query, &state);
            assert_eq!(response.status(), 400, "query={query:?}");
            assert_eq!(body_text(response).await.trim(), message);
        }
    }

    #[tokio::test]
    async fn test_cafe_when_ok() {
        let state = test_state();
        let queries = [
            Some("count=2&city=moscow"),
            Some("city=tula"),
            Some("city=moscow&search=ложка"),
        ];

        for query in queries {
            let response = get("/cafe", query, &state);
            assert_eq!(response.status(), 200, "query={query:?}");
        }
    }

    #[tokio::test]
    async fn test_cafe_count() {
        let state = test_state();
        let total = state.directory.get("moscow").unwrap().len();
        let cases = [(0, 0), (1, 1), (2, 2), (100, total.min(100))];

        for (count, want) in cases {
            let query = format!("city=moscow&count={count}");
            let response = get("/cafe", Some(&query), &state);
            assert_eq!(response.status(), 200);

            let body = body_text(response).await;
            let got = if body.trim().is_empty() {
                0
            } else {
                body.trim().split(',').count()
            };
            assert_eq!(got, want, "count={count}");
        }
    }

    #[tokio::test]
    async fn test_cafe_search() {
        let state = test_state();
        let cases = [("фасоль", 0), ("кофе", 2), ("вилка", 1)];

        for (search, want) in cases {
            let query = format!("city=moscow&search={search}");
            let response = get("/cafe", Some(&query), &state);
            assert_eq!(response.status(), 200);

            let body = body_text(response).await;
            if body.trim().is_empty() {
                assert_eq!(want, 0, "search={search}");
                continue;
            }

            let cafes: Vec<&str> = body.trim().split(',').collect();
            assert_eq!(cafes.len(), want, "search={search}");
            for cafe in cafes {
                assert!(cafe.to_lowercase().contains(search));
            }
        }
    }

    #[tokio::test]
    async fn test_head_cafe_has_empty_body() {
        let state = test_state();
        let response = respond(&Method::HEAD, "/cafe", Some("city=moscow"), true, &state);
        assert_eq!(response.status(), 200);
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = test_state();
        let response = get("/coffee", None, &state);
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_health_probe() {
        let state = test_state();
        let response = get("/healthz", None, &state);
        assert_eq!(response.status(), 200);
        assert_eq!(body_text(response).await, "ok");
    }

    #[test]
    fn test_post_is_rejected() {
        let state = test_state();
        let response = respond(&Method::POST, "/cafe", Some("city=moscow"), false, &state);
        assert_eq!(response.status(), 405);
    }

    #[test]
    fn test_options_preflight() {
        let state = test_state();
        let response = respond(&Method::OPTIONS, "/cafe", None, false, &state);
        assert_eq!(response.status(), 204);
    }
}
