use kennel::{
    service::{
        Config,
        KennelService,
    },
    store::RecordStore,
};
use serde_json::Value;

pub struct TestContext {
    pub srv: KennelService,
    pub client: reqwest::Client,
}

pub struct GraphqlResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Value,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_store(RecordStore::reference()).await
    }

    pub async fn with_store(store: RecordStore) -> Self {
        let srv = KennelService::from_store(store, Config::local_node())
            .await
            .unwrap();

        Self {
            srv,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.srv.bound_address, path)
    }

    /// Sends `query` in the URL query string with a `GET` request.
    pub async fn query(&self, query: &str) -> GraphqlResponse {
        self.query_with_params(&[("query", query)]).await
    }

    pub async fn query_with_params(&self, params: &[(&str, &str)]) -> GraphqlResponse {
        let request = self.client.get(self.url("/graphql")).query(params);
        Self::send_graphql_request(request).await
    }

    pub async fn send_graphql_request(request: reqwest::RequestBuilder) -> GraphqlResponse {
        let response = request.send().await.unwrap();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = response.text().await.unwrap();
        let body = serde_json::from_str(&text).unwrap();

        GraphqlResponse {
            status,
            content_type,
            body,
        }
    }
}

impl GraphqlResponse {
    pub fn errors(&self) -> &[Value] {
        self.body["errors"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
