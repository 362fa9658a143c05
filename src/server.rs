use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::input::TimeInput;

#[derive(Deserialize)]
pub struct TimeForm {
    pub time: String,
}

#[derive(Deserialize)]
pub struct TimeRequest {
    pub time: String,
}

#[derive(Deserialize)]
pub struct BlankRequest {
    pub blank: bool,
}

#[derive(Serialize)]
pub struct ClockResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

const PAGE_HEAD: &str = r#"<!doctype html>
<html>
<head><title>Clock</title></head>
<body>
<h1>Set the clock</h1>
"#;

const PAGE_FORM: &str = r#"<form method="post" action="/">
  <label for="time">Time (HHMM)</label>
  <input type="text" id="time" name="time" maxlength="4" pattern="[0-9]{4}" required>
  <input type="submit" value="Set">
</form>
<form method="post" action="/blank"><input type="submit" value="Blank display"></form>
<form method="post" action="/unblank"><input type="submit" value="Cancel blanking"></form>
</body>
</html>
"#;

fn page(message: Option<&str>) -> Html<String> {
    let notice = message.map(|m| format!("<p>{m}</p>\n")).unwrap_or_default();
    Html(format!("{PAGE_HEAD}{notice}{PAGE_FORM}"))
}

async fn index() -> Html<String> {
    page(None)
}

async fn submit_form(State(input): State<TimeInput>, Form(form): Form<TimeForm>) -> impl IntoResponse {
    match input.submit_time(&form.time) {
        Ok(time) => {
            let message = format!("Clock set to {:02}:{:02}", time.hour(), time.minute());
            (StatusCode::OK, page(Some(&message)))
        }
        Err(e) => (StatusCode::BAD_REQUEST, page(Some(&format!("Invalid time: {e}")))),
    }
}

async fn blank(State(input): State<TimeInput>) -> Redirect {
    input.request_blank();
    Redirect::to("/")
}

async fn unblank(State(input): State<TimeInput>) -> Redirect {
    input.cancel_blank();
    Redirect::to("/")
}

async fn submit_json(State(input): State<TimeInput>, Json(req): Json<TimeRequest>) -> impl IntoResponse {
    match input.submit_time(&req.time) {
        Ok(time) => {
            let body = ClockResponse {
                status: "ok".into(),
                time: Some(format!("{:02}:{:02}", time.hour(), time.minute())),
                error: None,
            };
            (StatusCode::OK, Json(body))
        }
        Err(e) => {
            let body = ClockResponse { status: "error".into(), time: None, error: Some(e.to_string()) };
            (StatusCode::BAD_REQUEST, Json(body))
        }
    }
}

async fn blank_json(State(input): State<TimeInput>, Json(req): Json<BlankRequest>) -> Json<ClockResponse> {
    if req.blank {
        input.request_blank();
    } else {
        input.cancel_blank();
    }
    Json(ClockResponse { status: "ok".into(), time: None, error: None })
}

pub fn router(input: TimeInput) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers(Any);
    let api = Router::new()
        .route("/v1/time", post(submit_json))
        .route("/v1/blank", post(blank_json))
        .layer(cors);
    info!("routes: / /blank /unblank /v1/time /v1/blank");
    Router::new()
        .route("/", get(index).post(submit_form))
        .route("/blank", post(blank))
        .route("/unblank", post(unblank))
        .merge(api)
        .with_state(input)
}
