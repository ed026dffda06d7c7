//! HTTP transport implementation.
//!
//! Plain JSON over HTTP:
//!
//! | Method | Path           | Response                                   |
//! |--------|----------------|--------------------------------------------|
//! | GET    | `/mcp/info`    | server identity                            |
//! | GET    | `/mcp/tools`   | `{ "tools": [...] }`                       |
//! | POST   | `/mcp/execute` | tool result; 400 for unknown tool or bad body |
//! | GET    | `/health`      | liveness probe                             |

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use super::{HttpConfig, TransportError};
use crate::core::{McpServer, ServerInfo};
use crate::domains::tools::{InvocationRequest, ToolResult};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until a shutdown signal arrives.
    pub async fn run(self, server: McpServer) -> crate::core::Result<()> {
        let addr = self.address();
        info!("Starting transport: {}", self.config.description());

        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on http://{}", addr);
        info!("  → Info:    GET  /mcp/info");
        info!("  → Tools:   GET  /mcp/tools");
        info!("  → Execute: POST /mcp/execute");
        info!("  → Health:  GET  /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(TransportError::serve)?;

        info!("HTTP transport finished");
        Ok(())
    }
}

/// Build the router with every endpoint and the middleware stack.
pub fn build_router(server: McpServer, config: &HttpConfig) -> Router {
    let state = AppState { server };

    let mut app = Router::new()
        .route("/", get(root_handler))
        .route("/mcp/info", get(server_info))
        .route("/mcp/tools", get(list_tools))
        .route("/mcp/execute", post(execute_tool))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::new()),
        );

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "info": "GET /mcp/info",
            "tools": "GET /mcp/tools",
            "execute": "POST /mcp/execute",
            "health": "GET /health"
        }
    }))
}

/// Server identity.
async fn server_info(State(state): State<AppState>) -> Json<ServerInfo> {
    Json(state.server.info())
}

/// List all registered tools.
async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "tools": state.server.list_tools()
    }))
}

/// Execute a tool.
///
/// Known tools answer 200 even when the tool itself failed; an unknown tool
/// or an unreadable body answers 400.
#[instrument(skip_all, fields(tool))]
async fn execute_tool(
    State(state): State<AppState>,
    payload: Result<Json<InvocationRequest>, JsonRejection>,
) -> (StatusCode, Json<ToolResult>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected execute request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ToolResult::failure(format!(
                    "invalid request: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    let (name, parameters) = request.into_parts();
    tracing::Span::current().record("tool", name.as_str());
    info!("Received execute request for tool: {}", name);

    match state.server.call_tool(&name, &parameters) {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(e) => (StatusCode::BAD_REQUEST, Json(ToolResult::failure(e.to_string()))),
    }
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Resolve when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        build_router(McpServer::new(Config::default()), &HttpConfig::default())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn execute_request(body: impl Into<String>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/mcp/execute")
            .header("content-type", "application/json")
            .body(Body::from(body.into()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_info_endpoint() {
        let (status, body) = send(test_app(), get_request("/mcp/info")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "tool-mcp-server");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["protocol"], "mcp/1.0");
        assert!(body["description"].is_string());
    }

    #[tokio::test]
    async fn test_tools_endpoint() {
        let (status, body) = send(test_app(), get_request("/mcp/tools")).await;
        assert_eq!(status, StatusCode::OK);

        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "calculator");
        assert_eq!(tools[0]["parameters"]["expression"]["type"], "string");
        assert_eq!(tools[0]["parameters"]["expression"]["required"], true);
        assert_eq!(tools[1]["name"], "get_time");
        assert_eq!(tools[1]["parameters"]["format"]["required"], false);
    }

    #[tokio::test]
    async fn test_execute_calculator() {
        let request = json!({ "toolName": "calculator", "parameters": { "expression": "2+2" } });
        let (status, body) = send(test_app(), execute_request(request.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "content": "result: 2+2 = 4" }));
    }

    #[tokio::test]
    async fn test_execute_tool_failure_is_still_ok() {
        let request = json!({ "toolName": "calculator", "parameters": {} });
        let (status, body) = send(test_app(), execute_request(request.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": false, "error": "missing expression parameter" })
        );
    }

    #[tokio::test]
    async fn test_execute_get_time_without_parameters() {
        let request = json!({ "toolName": "get_time" });
        let (status, body) = send(test_app(), execute_request(request.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["content"].as_str().unwrap().starts_with("current time: "));
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let request = json!({ "toolName": "bogus_tool", "parameters": {} });
        let (status, body) = send(test_app(), execute_request(request.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("bogus_tool"));
    }

    #[tokio::test]
    async fn test_execute_missing_tool_name() {
        let (status, body) = send(test_app(), execute_request("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown tool: ");
    }

    #[tokio::test]
    async fn test_execute_malformed_body() {
        let (status, body) = send(test_app(), execute_request("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("invalid request: "));

        let request = json!({ "toolName": "calculator", "parameters": [1, 2] });
        let (status, _) = send(test_app(), execute_request(request.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_request_does_not_affect_next_request() {
        let app = test_app();
        let (status, _) = send(app.clone(), execute_request("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = json!({ "toolName": "calculator", "parameters": { "expression": "6*7" } });
        let (status, body) = send(app, execute_request(request.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "result: 6*7 = 42");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = send(test_app(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let (status, body) = send(test_app(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["execute"], "POST /mcp/execute");
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let request = Request::builder()
            .uri("/health")
            .header("origin", "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );

        let mut config = HttpConfig::default();
        config.enable_cors = false;
        let app = build_router(McpServer::new(Config::default()), &config);
        let request = Request::builder()
            .uri("/health")
            .header("origin", "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(!response.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_run_reports_bind_failure() {
        let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = occupied.local_addr().unwrap().port();

        let config = HttpConfig::new(port, "127.0.0.1");
        let result = HttpTransport::new(config)
            .run(McpServer::new(Config::default()))
            .await;

        match result {
            Err(crate::core::Error::Transport(TransportError::BindError { address, .. })) => {
                assert_eq!(address, format!("127.0.0.1:{}", port));
            }
            other => panic!("Expected bind error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = test_app().oneshot(get_request("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
