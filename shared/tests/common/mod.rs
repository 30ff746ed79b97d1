#![allow(dead_code)]

use case_database::capabilities::{HttpRequest, HttpResponse, ViewportOperation};
use case_database::{App, Effect, Event, Model, ViewportMetrics};
use crux_core::testing::AppTester;
use crux_core::Request;
use serde_json::{json, Value};

pub type Tester = AppTester<App, Effect>;

pub fn desktop() -> ViewportMetrics {
    ViewportMetrics {
        width: 1280.0,
        scroll_y: 0.0,
    }
}

pub fn http_requests(effects: Vec<Effect>) -> Vec<Request<HttpRequest>> {
    effects.into_iter().filter_map(Effect::into_http).collect()
}

pub fn single_http(effects: Vec<Effect>) -> Request<HttpRequest> {
    let mut requests = http_requests(effects);
    assert_eq!(requests.len(), 1, "expected exactly one http request");
    requests.remove(0)
}

pub fn viewport_ops(effects: &[Effect]) -> Vec<ViewportOperation> {
    effects
        .iter()
        .filter_map(Effect::as_viewport)
        .cloned()
        .collect()
}

pub fn renders(effects: &[Effect]) -> bool {
    effects.iter().any(Effect::is_render)
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse::status(status).json(&body).build()
}

/// Resolves `request` and feeds the resulting events back through the app.
pub fn respond(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<HttpRequest>,
    response: HttpResponse,
) -> Vec<Effect> {
    let update = app
        .resolve(request, crux_http::protocol::HttpResult::Ok(response))
        .expect("request should resolve");
    let mut effects = update.effects;
    for event in update.events {
        effects.extend(app.update(event, model).effects);
    }
    effects
}

pub fn mount(app: &Tester, model: &mut Model) -> Request<HttpRequest> {
    let update = app.update(Event::Mounted { viewport: desktop() }, model);
    single_http(update.effects)
}

pub fn mount_with_cases(app: &Tester, model: &mut Model, cases: Value) {
    let mut request = mount(app, model);
    respond(app, model, &mut request, json_response(200, json!({ "cases": cases })));
}

pub fn sample_cases() -> Value {
    json!([
        {
            "id": 1,
            "caseHeading": "Unpaid wages",
            "query": "Employer has withheld salary for three months",
            "applicableArticle": "Article 23",
            "description": "Worker at a textile unit",
            "status": "assigned",
            "tags": "labour, wages"
        },
        {
            "id": 2,
            "caseHeading": "Land dispute",
            "query": "Neighbour encroached on farmland",
            "applicableArticle": "Article 300A",
            "status": "under-investigation",
            "tags": ["property", "rural"]
        },
        {
            "id": 3,
            "caseHeading": "Tenant eviction",
            "query": "Landlord evicted without notice",
            "status": "closed"
        }
    ])
}

pub fn request_body(request: &HttpRequest) -> Value {
    serde_json::from_slice(&request.body).expect("json body")
}

pub fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}
