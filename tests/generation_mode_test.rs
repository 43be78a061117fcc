mod common;

use actix_web::test;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{goa_request, lisbon_plan, StubModel, TestApp};
use trip_planner_api::services::openai_service::{OpenAiChatModel, TextGenerator};
use trip_planner_api::services::trip_planner_service::PlannerError;

fn lisbon_request() -> Value {
    json!({
        "destination": "Lisbon, Portugal",
        "duration": 3,
        "budget": "Standard",
        "interests": "tiles, seafood",
        "pace": "Moderate"
    })
}

#[actix_rt::test]
async fn test_fenced_model_reply_becomes_plan() {
    let reply = format!(
        "Here is your itinerary:\n```json\n{}\n```",
        serde_json::to_string_pretty(&lisbon_plan()).unwrap()
    );
    let model = StubModel::replying(reply);
    let test_app = TestApp::generating(model.clone());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/plan_trip")
        .set_json(&lisbon_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, lisbon_plan());
}

#[actix_rt::test]
async fn test_prompt_carries_every_field() {
    let model = StubModel::replying(lisbon_plan().to_string());
    let test_app = TestApp::generating(model.clone());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/plan_trip")
        .set_json(&lisbon_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let prompts = model.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("3-day trip to Lisbon, Portugal"));
    assert!(prompt.contains("interests in tiles, seafood"));
    assert!(prompt.contains("budget level: Standard"));
    assert!(prompt.contains("preferred pace: Moderate"));
    assert!(prompt.contains("food_recommendations"));
}

#[actix_rt::test]
async fn test_invalid_request_never_reaches_model() {
    let model = StubModel::replying(lisbon_plan().to_string());
    let test_app = TestApp::generating(model.clone());
    let app = test::init_service(test_app.create_app()).await;

    let mut request = lisbon_request();
    request["interests"] = json!("");

    let req = test::TestRequest::post()
        .uri("/plan_trip")
        .set_json(&request)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert!(model.recorded_prompts().is_empty());
}

#[actix_rt::test]
async fn test_unparseable_reply_returns_500() {
    let model = StubModel::replying("Sorry, I can't help with travel plans today.");
    let test_app = TestApp::generating(model);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/plan_trip")
        .set_json(&goa_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse model output"));
}

#[actix_rt::test]
async fn test_wrong_types_in_reply_return_500() {
    let mut plan = lisbon_plan();
    plan["itinerary"][0]["day"] = json!("first");
    let model = StubModel::replying(plan.to_string());
    let test_app = TestApp::generating(model);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/plan_trip")
        .set_json(&goa_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}

#[actix_rt::test]
async fn test_model_failure_returns_500_with_details() {
    let model = StubModel::failing("connection refused");
    let test_app = TestApp::generating(model);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/plan_trip")
        .set_json(&goa_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "error": "Internal server error",
            "details": "Model request failed: connection refused"
        })
    );
}

#[actix_rt::test]
async fn test_health_reports_model() {
    let test_app = TestApp::generating(StubModel::replying("{}"));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["mode"], "generation");
    assert_eq!(body["model"], "stub-model");
}

fn openai_model(server: &MockServer) -> OpenAiChatModel {
    OpenAiChatModel::new(
        "sk-test",
        format!("{}/v1", server.uri()),
        "gpt-3.5-turbo-0125",
        0.7,
        Duration::from_secs(5),
    )
    .expect("client builds")
}

#[actix_rt::test]
async fn test_openai_client_sends_model_and_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo-0125",
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"ok\": true}"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = openai_model(&server).generate("Plan a trip").await.unwrap();
    assert_eq!(text, "{\"ok\": true}");
}

#[actix_rt::test]
async fn test_openai_error_status_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = openai_model(&server).generate("Plan a trip").await.unwrap_err();
    assert!(matches!(err, PlannerError::Upstream(_)));
    let message = err.to_string();
    assert!(message.contains("401"));
    assert!(message.contains("invalid api key"));
}

#[actix_rt::test]
async fn test_openai_empty_choices_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = openai_model(&server).generate("Plan a trip").await.unwrap_err();
    assert!(err.to_string().contains("missing content"));
}

#[actix_rt::test]
async fn test_end_to_end_with_mocked_openai() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": format!("```json\n{}\n```", lisbon_plan())}}
            ]
        })))
        .mount(&server)
        .await;

    let test_app = TestApp::generating(Arc::new(openai_model(&server)));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/plan_trip")
        .set_json(&lisbon_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["destination"], "Lisbon, Portugal");
    assert_eq!(body["itinerary"].as_array().unwrap().len(), 3);
}
