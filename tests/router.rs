mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use common::{FakeSource, read_fixture, xbrl_report};
use filing_relay::server;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(source: FakeSource) -> Router {
    server::router(source.shared())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn report_body() -> String {
    read_fixture("xbrl/report.json")
}

#[tokio::test]
async fn missing_filing_url_is_bad_request_on_both_endpoints() {
    for uri in ["/fetch_10k", "/getUsefulStuff"] {
        for body in [r#"{}"#, r#"{"filing_url": ""}"#, r#"{"filing_url": null}"#] {
            let (status, json) = send(
                app(FakeSource::new("text", report_body())),
                post_json(uri, body),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
            assert_eq!(json, json!({ "error": "Missing filing_url parameter" }));
        }
    }
}

#[tokio::test]
async fn fetch_10k_returns_first_700_characters() {
    let text = read_fixture("extractor/item8.txt");
    assert!(text.chars().count() > 700);

    let (status, json) = send(
        app(FakeSource::new(text.clone(), "{}")),
        post_json("/fetch_10k", r#"{"filing_url": "https://www.sec.gov/aapl-10k.htm"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["content"].as_str().unwrap(),
        text.chars().take(700).collect::<String>()
    );
    assert_eq!(
        json["filing_url"],
        "fake://extractor?url=https://www.sec.gov/aapl-10k.htm"
    );
}

#[tokio::test]
async fn upstream_failure_is_reported_generically() {
    for uri in ["/fetch_10k", "/getUsefulStuff"] {
        let (status, json) = send(
            app(FakeSource::failing(403)),
            post_json(uri, r#"{"filing_url": "https://www.sec.gov/x.htm"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "Failed to fetch filing" }));
    }
}

#[tokio::test]
async fn get_useful_stuff_formats_statements() {
    let report = xbrl_report();

    let (status, json) = send(
        app(FakeSource::new("", report_body())),
        post_json("/getUsefulStuff", r#"{"filing_url": "https://www.sec.gov/x.htm"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["balanceSheet"], report["BalanceSheets"]);

    let income = json["statementofIncome"].as_array().unwrap();
    assert_eq!(income.len(), 4);
    assert_eq!(
        income[0]["name"],
        "RevenueFromContractWithCustomerExcludingAssessedTax"
    );
    assert_eq!(income[0]["values"].as_array().unwrap().len(), 3);
    assert_eq!(income[0]["values"][0]["value"], json!(383285000000.0));
    assert_eq!(
        income[0]["values"][0]["period"],
        json!({ "startDate": "2022-09-25", "endDate": "2023-09-30" })
    );
    assert_eq!(income[3], json!({ "name": "IncomeTaxExpenseBenefit", "values": [] }));

    let cash_flow = json["cashFlow"].as_array().unwrap();
    assert_eq!(cash_flow.len(), 2);
    assert_eq!(cash_flow[1]["name"], "PaymentsForRepurchaseOfCommonStock");
}

#[tokio::test]
async fn example_statement_from_docs() {
    let upstream = json!({
        "StatementsOfIncome": {
            "Revenue": [
                { "period": { "instant": "2023-12-31" }, "value": "100.5" },
                { "period": { "instant": "2022-12-31" }, "value": "90.0" }
            ]
        },
        "BalanceSheets": {},
        "StatementsOfCashFlows": {}
    });

    let (status, json) = send(
        app(FakeSource::new("", upstream.to_string())),
        post_json("/getUsefulStuff", r#"{"filing_url": "u"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["statementofIncome"],
        json!([{
            "name": "Revenue",
            "values": [
                { "period": { "instant": "2023-12-31" }, "value": 100.5 },
                { "period": { "instant": "2022-12-31" }, "value": 90.0 }
            ]
        }])
    );
}

#[tokio::test]
async fn non_numeric_value_fails_whole_request() {
    let upstream = json!({
        "StatementsOfIncome": {
            "Revenue": [{ "period": { "instant": "2023-12-31" }, "value": "100" }],
            "OperatingIncomeLoss": [{ "period": { "instant": "2023-12-31" }, "value": "--" }]
        },
        "BalanceSheets": {},
        "StatementsOfCashFlows": {}
    });

    let (status, json) = send(
        app(FakeSource::new("", upstream.to_string())),
        post_json("/getUsefulStuff", r#"{"filing_url": "u"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json.get("statementofIncome").is_none());
    assert!(json["error"].as_str().unwrap().contains("OperatingIncomeLoss"));
}

#[tokio::test]
async fn missing_section_is_server_error() {
    let upstream = json!({ "StatementsOfIncome": {}, "StatementsOfCashFlows": {} });

    let (status, json) = send(
        app(FakeSource::new("", upstream.to_string())),
        post_json("/getUsefulStuff", r#"{"filing_url": "u"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("BalanceSheets"));
}

#[tokio::test]
async fn invalid_body_is_server_error_with_message() {
    let (status, json) = send(
        app(FakeSource::new("", "{}")),
        post_json("/fetch_10k", "not json"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .method("POST")
        .uri("/fetch_10k")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"filing_url": "u"}"#))
        .unwrap();

    let response = app(FakeSource::new("text", "{}"))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn health_check() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app(FakeSource::new("", "{}")).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}
