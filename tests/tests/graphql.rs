use crate::helpers::TestContext;
use kennel::store::{
    Record,
    RecordStore,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const ALL_FIELDS_LIST: &str = "{ list { id name category age } }";

fn reference_list() -> serde_json::Value {
    json!({
        "data": {
            "list": [
                { "id": 1, "name": "Ted", "category": "Husky", "age": 3 },
                { "id": 2, "name": "Bob", "category": "Rottweiler", "age": 2 },
                { "id": 3, "name": "Trap", "category": "Dalmata", "age": 4 },
            ]
        }
    })
}

#[tokio::test]
async fn by_id__returns_reference_records() {
    let ctx = TestContext::new().await;

    let ted = ctx.query("{ byId(id: 1) { id name category age } }").await;
    let bob = ctx.query("{ byId(id: 2) { id name category age } }").await;

    assert_eq!(
        ted.body,
        json!({ "data": { "byId": { "id": 1, "name": "Ted", "category": "Husky", "age": 3 } } })
    );
    assert_eq!(
        bob.body,
        json!({ "data": { "byId": { "id": 2, "name": "Bob", "category": "Rottweiler", "age": 2 } } })
    );
}

#[tokio::test]
async fn by_id__unknown_id_returns_zero_value_record() {
    let ctx = TestContext::new().await;

    for id in [0, 4, 1000, -5] {
        let query = format!("{{ byId(id: {id}) {{ id name category age }} }}");
        let response = ctx.query(&query).await;

        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            json!({ "data": { "byId": { "id": 0, "name": "", "category": "", "age": 0 } } })
        );
    }
}

#[tokio::test]
async fn list__returns_reference_records_in_order_every_time() {
    let ctx = TestContext::new().await;

    for _ in 0..3 {
        let response = ctx.query(ALL_FIELDS_LIST).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body, reference_list());
    }
}

#[tokio::test]
async fn response_is_json() {
    let ctx = TestContext::new().await;

    let response = ctx.query(ALL_FIELDS_LIST).await;

    let content_type = response.content_type.expect("content type is set");
    assert!(content_type.starts_with("application/json"));
}

#[tokio::test]
async fn unknown_field__reports_errors_with_ok_status() {
    let ctx = TestContext::new().await;

    let response = ctx.query("{ list { unknownField } }").await;

    assert_eq!(response.status, 200);
    assert!(!response.errors().is_empty());
}

#[tokio::test]
async fn malformed_query__reports_errors_and_keeps_serving() {
    let ctx = TestContext::new().await;

    let broken = ctx.query("{ list { id name ").await;
    assert_eq!(broken.status, 200);
    assert!(!broken.errors().is_empty());
    assert_eq!(broken.body["data"], serde_json::Value::Null);

    let next = ctx.query(ALL_FIELDS_LIST).await;
    assert_eq!(next.body, reference_list());
}

#[tokio::test]
async fn missing_query_parameter__reports_errors() {
    let ctx = TestContext::new().await;

    let response = ctx.query_with_params(&[]).await;

    assert_eq!(response.status, 200);
    assert!(!response.errors().is_empty());
}

#[tokio::test]
async fn route_accepts_any_method() {
    let ctx = TestContext::new().await;

    let request = ctx
        .client
        .post(ctx.url("/graphql"))
        .query(&[("query", ALL_FIELDS_LIST)]);
    let response = TestContext::send_graphql_request(request).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body, reference_list());
}

#[tokio::test]
async fn variables_and_operation_name_are_honoured() {
    let ctx = TestContext::new().await;
    let query = r#"
        query First { list { id } }
        query Second($id: Int) { byId(id: $id) { name } }
    "#;

    let response = ctx
        .query_with_params(&[
            ("query", query),
            ("operationName", "Second"),
            ("variables", r#"{"id": 3}"#),
        ])
        .await;

    assert_eq!(response.body, json!({ "data": { "byId": { "name": "Trap" } } }));
}

#[tokio::test]
async fn malformed_variables__reports_errors_with_ok_status() {
    let ctx = TestContext::new().await;

    let response = ctx
        .query_with_params(&[
            ("query", "query($id: Int) { byId(id: $id) { name } }"),
            ("variables", "{ id: "),
        ])
        .await;

    assert_eq!(response.status, 200);
    assert!(!response.errors().is_empty());
}

#[tokio::test]
async fn non_object_variables__report_errors_with_ok_status() {
    let ctx = TestContext::new().await;

    let response = ctx
        .query_with_params(&[
            ("query", "query($id: Int) { byId(id: $id) { name } }"),
            ("variables", "[1]"),
        ])
        .await;

    assert_eq!(response.status, 200);
    assert!(!response.errors().is_empty());
}

#[tokio::test]
async fn repeated_query_parameter__uses_first_value() {
    let ctx = TestContext::new().await;

    let response = ctx
        .query_with_params(&[
            ("query", "{ list { id } }"),
            ("query", "{ list { name } }"),
        ])
        .await;

    assert_eq!(response.status, 200);
    let content_type = response.content_type.as_deref().unwrap_or_default();
    assert!(content_type.starts_with("application/json"));
    assert_eq!(
        response.body,
        json!({ "data": { "list": [{ "id": 1 }, { "id": 2 }, { "id": 3 }] } })
    );
}

#[tokio::test]
async fn cors_headers_are_set() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .get(ctx.url("/graphql"))
        .query(&[("query", ALL_FIELDS_LIST)])
        .send()
        .await
        .unwrap();

    let origin = response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|value| value.to_str().ok());
    assert_eq!(origin, Some("*"));
}

#[tokio::test]
async fn concurrent_requests_see_consistent_records() {
    let ctx = TestContext::new().await;

    let requests = (0..32).map(|i| {
        let ctx = &ctx;
        async move {
            if i % 2 == 0 {
                (i, ctx.query(ALL_FIELDS_LIST).await)
            } else {
                (i, ctx.query("{ byId(id: 3) { id name category age } }").await)
            }
        }
    });
    let responses = futures::future::join_all(requests).await;

    for (i, response) in responses {
        if i % 2 == 0 {
            assert_eq!(response.body, reference_list());
        } else {
            assert_eq!(
                response.body,
                json!({ "data": { "byId": { "id": 3, "name": "Trap", "category": "Dalmata", "age": 4 } } })
            );
        }
    }
}

#[tokio::test]
async fn alternate_store_is_served() {
    let store = RecordStore::new(vec![
        Record::new(21, "Sky", "Greyhound", 5),
        Record::new(20, "Ash", "Whippet", 2),
    ])
    .unwrap();
    let ctx = TestContext::with_store(store).await;

    let list = ctx.query("{ list { id name } }").await;
    let ash = ctx.query("{ byId(id: 20) { category age } }").await;

    assert_eq!(
        list.body,
        json!({ "data": { "list": [{ "id": 21, "name": "Sky" }, { "id": 20, "name": "Ash" }] } })
    );
    assert_eq!(
        ash.body,
        json!({ "data": { "byId": { "category": "Whippet", "age": 2 } } })
    );
}

#[tokio::test]
async fn too_deep_queries_are_rejected() {
    let ctx = TestContext::new().await;
    // `__schema { types { fields { type { ofType ... { name } } } } }`, 20 levels deep.
    let deep = format!(
        "{{ __schema {{ types {{ fields {{ type {{ {} name {} }} }} }} }}",
        "ofType { ".repeat(15),
        "} ".repeat(15),
    );

    let shallow = ctx.query("{ list { id __typename } }").await;
    let rejected = ctx.query(&deep).await;

    assert!(shallow.errors().is_empty());
    assert!(!rejected.errors().is_empty());
}
