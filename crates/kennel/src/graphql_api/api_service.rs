use crate::{
    graphql_api::{
        Config,
        query_log_extension::QueryLogExtension,
    },
    ports::RecordSource,
    schema::{
        KennelSchema,
        KennelSchemaBuilder,
    },
};
use anyhow::Context;
use async_graphql::{
    Request,
    Response,
    ServerError,
    Variables,
    http::GraphiQLSource,
};
use axum::{
    Json,
    Router,
    extract::{
        Extension,
        Query,
        rejection::QueryRejection,
    },
    http::{
        HeaderValue,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    response::{
        Html,
        IntoResponse,
    },
    routing::{
        any,
        get,
    },
};
use serde_json::json;
use std::{
    net::{
        SocketAddr,
        TcpListener,
    },
    sync::Arc,
};
use tokio::{
    sync::oneshot,
    task::JoinHandle,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub type SharedSource = Arc<dyn RecordSource>;

pub const GRAPHQL_ENDPOINT: &str = "/graphql";
pub const PLAYGROUND_ENDPOINT: &str = "/playground";
pub const HEALTH_ENDPOINT: &str = "/health";

/// Parameters of a GraphQL request carried in the URL query string.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GraphqlParams {
    pub query: String,
    pub operation_name: Option<String>,
    /// JSON encoded variables object.
    pub variables: Option<String>,
}

impl GraphqlParams {
    /// Collects the parameters from decoded query string pairs.
    ///
    /// Only the first value of a repeated key is used, unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = None;
        let mut operation_name = None;
        let mut variables = None;

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "query" => &mut query,
                "operationName" => &mut operation_name,
                "variables" => &mut variables,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        Self {
            query: query.unwrap_or_default(),
            operation_name,
            variables,
        }
    }

    fn into_request(self) -> Result<Request, ServerError> {
        let mut request = Request::new(self.query);

        if let Some(operation_name) = self.operation_name {
            request = request.operation_name(operation_name);
        }

        if let Some(variables) = self.variables.filter(|v| !v.trim().is_empty()) {
            let variables: serde_json::Value = serde_json::from_str(&variables)
                .map_err(|e| {
                    ServerError::new(format!("Invalid `variables` parameter: {e}"), None)
                })?;
            if !variables.is_object() {
                return Err(ServerError::new(
                    "Invalid `variables` parameter: expected a JSON object",
                    None,
                ))
            }
            request = request.variables(Variables::from_json(variables));
        }

        Ok(request)
    }
}

pub fn build_router(schema: KennelSchema, config: &Config) -> Router {
    Router::new()
        .route(
            GRAPHQL_ENDPOINT,
            any(graphql_handler)
                .layer(ConcurrencyLimitLayer::new(config.max_concurrent_queries)),
        )
        .route(PLAYGROUND_ENDPOINT, get(render_graphql_playground))
        .route(HEALTH_ENDPOINT, get(health))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.api_request_timeout))
        .layer(SetResponseHeaderLayer::<_>::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::<_>::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::<_>::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        ))
}

pub fn finish_schema(
    schema: KennelSchemaBuilder,
    config: &Config,
    source: SharedSource,
) -> KennelSchema {
    schema
        .limit_depth(config.max_queries_depth)
        .limit_complexity(config.max_queries_complexity)
        .extension(QueryLogExtension::new(config.query_log_threshold_time))
        .extension(async_graphql::extensions::Tracing)
        .data(source)
        .finish()
}

/// Binds the listener and spawns the server task.
///
/// The server stops gracefully once `stop` receives a value. If the sender is
/// dropped instead, the server keeps running.
pub fn start_server(
    config: Config,
    schema: KennelSchemaBuilder,
    source: SharedSource,
    stop: oneshot::Receiver<()>,
) -> anyhow::Result<(SocketAddr, JoinHandle<anyhow::Result<()>>)> {
    let network_addr = config.addr;
    let schema = finish_schema(schema, &config, source);
    let router = build_router(schema, &config);

    let listener = TcpListener::bind(network_addr)
        .with_context(|| format!("Failed to bind GraphQL service to {network_addr}"))?;
    let bound_address = listener.local_addr()?;

    tracing::info!("Binding GraphQL provider to {}", bound_address);

    let server = axum::Server::from_tcp(listener)?
        .serve(router.into_make_service())
        .with_graceful_shutdown(async move {
            if stop.await.is_err() {
                // If the handle is dropped we don't want
                // this to ever shutdown the server.
                futures::future::pending::<()>().await;
            }
        });

    let handle = tokio::spawn(async move {
        server.await?;
        tracing::info!("GraphQL service at {} is stopped", bound_address);
        Ok::<_, anyhow::Error>(())
    });

    Ok((bound_address, handle))
}

async fn render_graphql_playground() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(GRAPHQL_ENDPOINT)
            .title("Kennel GraphQL Playground")
            .finish(),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "up": true }))
}

async fn graphql_handler(
    schema: Extension<KennelSchema>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<Response> {
    let request = pairs
        .map_err(|rejection| ServerError::new(rejection.to_string(), None))
        .and_then(|Query(pairs)| GraphqlParams::from_pairs(pairs).into_request());

    let response = match request {
        Ok(request) => schema.execute(request).await,
        Err(err) => Response::from_errors(vec![err]),
    };

    if response.is_err() {
        tracing::warn!(
            "GraphQL request finished with errors: {:?}",
            response.errors
        );
    }

    Json(response)
}
