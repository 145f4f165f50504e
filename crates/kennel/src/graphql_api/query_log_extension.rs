use async_graphql::{
    Response,
    ServerResult,
    Value,
    Variables,
    extensions::{
        Extension,
        ExtensionContext,
        ExtensionFactory,
        NextParseQuery,
        NextRequest,
        NextResolve,
        ResolveInfo,
    },
    parser::types::ExecutableDocument,
};
use std::{
    sync::{
        Arc,
        OnceLock,
    },
    time::Duration,
};
use tokio::time::Instant;

/// Logs the query text of requests whose top-level fields resolve slower
/// than the threshold.
pub(crate) struct QueryLogExtension {
    log_threshold: Duration,
}

impl QueryLogExtension {
    pub fn new(log_threshold: Duration) -> Self {
        QueryLogExtension { log_threshold }
    }
}

impl ExtensionFactory for QueryLogExtension {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(QueryLogExtInner {
            log_threshold: self.log_threshold,
            current_query: OnceLock::new(),
        })
    }
}

pub(crate) struct QueryLogExtInner {
    log_threshold: Duration,
    current_query: OnceLock<String>,
}

#[async_trait::async_trait]
impl Extension for QueryLogExtInner {
    async fn request(
        &self,
        ctx: &ExtensionContext<'_>,
        next: NextRequest<'_>,
    ) -> Response {
        let start_time = Instant::now();
        let response = next.run(ctx).await;
        tracing::debug!(
            "GraphQL request finished in {:?} seconds",
            start_time.elapsed().as_secs_f64()
        );

        response
    }

    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let doc = next.run(ctx, query, variables).await?;
        let set_query_res = self.current_query.set(query.to_string());
        if set_query_res.is_err() {
            tracing::warn!("Failed to save current query {query:?}");
        }
        Ok(doc)
    }

    async fn resolve(
        &self,
        ctx: &ExtensionContext<'_>,
        info: ResolveInfo<'_>,
        next: NextResolve<'_>,
    ) -> ServerResult<Option<Value>> {
        // Only the root fields are timed, nested fields are plain passthroughs.
        let is_root_field = info.path_node.parent.is_none();

        let start_time = Instant::now();
        let res = next.run(ctx, info).await;
        let elapsed = start_time.elapsed();

        if is_root_field && elapsed > self.log_threshold {
            let query = self
                .current_query
                .get()
                .map(String::as_str)
                .unwrap_or("UNKNOWN");
            tracing::info!(
                "Query {:?} exceeded threshold of {:?} seconds at {:?} seconds",
                query,
                self.log_threshold.as_secs_f64(),
                elapsed.as_secs_f64()
            );
        }

        res
    }
}
