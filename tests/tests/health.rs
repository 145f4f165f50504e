use crate::helpers::TestContext;
use kennel::service::{
    Config,
    KennelService,
};

#[tokio::test]
async fn health() {
    let ctx = TestContext::new().await;

    let response = ctx.client.get(ctx.url("/health")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value =
        serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "up": true }));
}

#[tokio::test]
async fn playground_is_served() {
    let ctx = TestContext::new().await;

    let response = ctx.client.get(ctx.url("/playground")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let page = response.text().await.unwrap();
    assert!(page.contains("Kennel GraphQL Playground"));
}

#[tokio::test]
async fn can_restart_node() {
    let first = KennelService::new_node(Config::local_node()).await.unwrap();
    let address = first.bound_address;
    first.send_stop_signal_and_await_shutdown().await.unwrap();

    let mut config = Config::local_node();
    config.addr = address;
    let second = KennelService::new_node(config).await.unwrap();

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/health", second.bound_address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    second.send_stop_signal_and_await_shutdown().await.unwrap();
}

#[tokio::test]
async fn stopped_node_refuses_connections() {
    let ctx = TestContext::new().await;
    let url = ctx.url("/health");

    ctx.srv.send_stop_signal_and_await_shutdown().await.unwrap();

    let result = ctx.client.get(url).send().await;
    assert!(result.is_err());
}
