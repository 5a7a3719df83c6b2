/// HTTP endpoint exposing the aggregate temperature.
///
/// Endpoints:
/// - GET /            - Informational message
/// - GET /version     - Service version
/// - GET /temperature - Average temperature for the configured region
///
/// `/temperature` only fails (HTTP 500) when the pipeline itself cannot run:
/// a malformed upstream timestamp or an HTTP client that cannot be built.
/// Upstream outages degrade to `0.0`.

use crate::config::ServiceConfig;
use crate::model::SenseBoxError;
use crate::pipeline::get_average_temperature;
use crate::version::get_version;
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;
use threadpool::ThreadPool;
use tiny_http::{Header, Response, Server, StatusCode};
use tracing::{debug, error, info, warn};

/// Requests served concurrently; `/temperature` can block for a while.
const HANDLER_THREADS: usize = 4;

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("failed to start HTTP server on {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// JSON key of the `/temperature` response.
pub fn temperature_label(region: &str) -> String {
    format!("avg_temperature in {} is", region)
}

/// Routes one request to a status code and JSON body.
///
/// `temperature` is only invoked for `GET /temperature`, so the other
/// endpoints never touch the upstream API. Query strings are ignored.
pub fn route<F>(method: &str, url: &str, region: &str, temperature: F) -> (u16, Value)
where
    F: FnOnce() -> Result<f64, SenseBoxError>,
{
    let path = url.split('?').next().unwrap_or(url);

    if !method.eq_ignore_ascii_case("GET") {
        return (405, json!({ "error": "Method not allowed", "allowed": ["GET"] }));
    }

    match path {
        "/" => (
            200,
            json!({ "Hello": format!("to get the temperature in {}, go to /temperature", region) }),
        ),
        "/version" => (200, json!({ "version": get_version() })),
        "/temperature" => match temperature() {
            Ok(average) => {
                let mut body = serde_json::Map::new();
                body.insert(temperature_label(region), json!(average));
                (200, Value::Object(body))
            }
            Err(e) => {
                error!(error = %e, "temperature pipeline failed");
                (500, json!({ "error": e.to_string() }))
            }
        },
        _ => (
            404,
            json!({
                "error": "Not found",
                "available_endpoints": ["/", "/version", "/temperature"]
            }),
        ),
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Starts the HTTP server on the configured host and port and serves until
/// the listener closes.
pub fn start_endpoint_server(config: ServiceConfig) -> Result<(), EndpointError> {
    let addr = format!("{}:{}", config.endpoint.host, config.endpoint.port);
    let server = Server::http(&addr).map_err(|e| EndpointError::Bind {
        addr: addr.clone(),
        reason: e.to_string(),
    })?;

    info!(addr = %addr, "HTTP endpoint listening");
    info!("   GET /            - Informational message");
    info!("   GET /version     - Service version");
    info!("   GET /temperature - Average temperature in {}", config.region.name);

    let config = Arc::new(config);
    let pool = ThreadPool::new(HANDLER_THREADS);

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        pool.execute(move || {
            let method = request.method().as_str().to_string();
            let url = request.url().to_string();

            let (status, body) = route(&method, &url, &config.region.name, || {
                get_average_temperature(&config)
            });
            debug!(method = %method, url = %url, status, "handled request");

            if let Err(e) = request.respond(create_response(status, body)) {
                warn!(error = %e, "failed to send response");
            }
        });
    }

    Ok(())
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: Value) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());

    let response = Response::from_data(body.into_bytes()).with_status_code(StatusCode(status_code));
    match Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
