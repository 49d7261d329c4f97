use axum::{
    Json, Router,
    extract::State,
    http::{
        HeaderMap, StatusCode,
        header::{ACCEPT, AUTHORIZATION},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use shelter_bot::ShelterError;
use shelter_bot::api::{dog_api::DogApi, slack_api::SlackApi};
use shelter_bot::service::traits::{ImageProvider, MessageSink};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

const PUG: &str = "https://images.dog.ceo/breeds/pug/n02110958_1975.jpg";

/// Authorization header and JSON body of every `chat.postMessage` call.
#[derive(Clone, Default)]
struct Posted(Arc<Mutex<Vec<(Option<String>, Value)>>>);

impl Posted {
    fn calls(&self) -> Vec<(Option<String>, Value)> {
        self.0.lock().unwrap().clone()
    }
}

async fn post_message(
    State(posted): State<Posted>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let channel = body["channel"].as_str().unwrap_or_default().to_string();
    posted.0.lock().unwrap().push((auth, body));
    match channel.as_str() {
        "C_GONE" => Json(json!({"ok": false, "error": "channel_not_found"})).into_response(),
        "C_DOWN" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Json(json!({"ok": true, "channel": channel, "ts": "1503435956.000247"}))
            .into_response(),
    }
}

async fn random_image(headers: HeaderMap) -> Response {
    if headers.get(ACCEPT).map(|v| v.as_bytes()) != Some(b"application/json".as_slice()) {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }
    Json(json!({"status": "success", "message": PUG})).into_response()
}

fn stub_upstreams(posted: Posted) -> Router {
    Router::new()
        .route("/api/chat.postMessage", post(post_message))
        .route("/breeds/image/random", get(random_image))
        .route(
            "/broken",
            get(|| async { (StatusCode::OK, "<html>dog.ceo is down</html>") }),
        )
        .route(
            "/failed",
            get(|| async { Json(json!({"status": "error", "message": "Breed not found"})) }),
        )
        .with_state(posted)
}

/// Serve `app` on an ephemeral local port and return its base URL.
async fn serve(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub listener");
    let addr = listener.local_addr().expect("stub listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server failed");
    });
    Url::parse(&format!("http://{addr}/")).expect("stub url")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("failed to build client")
}

#[tokio::test]
async fn slack_send_posts_channel_and_text_with_bearer_token() {
    let posted = Posted::default();
    let base = serve(stub_upstreams(posted.clone())).await;
    let slack = SlackApi::new(client(), &base.join("api").unwrap(), "xoxb-test").unwrap();

    slack.send("C024BE91L", "New dog added").await.unwrap();

    let calls = posted.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.as_deref(), Some("Bearer xoxb-test"));
    assert_eq!(
        calls[0].1,
        json!({"channel": "C024BE91L", "text": "New dog added"})
    );
}

#[tokio::test]
async fn slack_not_ok_is_a_gateway_error() {
    let posted = Posted::default();
    let base = serve(stub_upstreams(posted.clone())).await;
    let slack = SlackApi::new(client(), &base.join("api/").unwrap(), "xoxb-test").unwrap();

    let err = slack.send("C_GONE", "hello").await.unwrap_err();

    match err {
        ShelterError::Gateway(reason) => assert_eq!(reason, "channel_not_found"),
        other => panic!("expected a gateway error, got {other:?}"),
    }
    assert_eq!(posted.calls().len(), 1);
}

#[tokio::test]
async fn slack_server_error_is_an_http_error() {
    let base = serve(stub_upstreams(Posted::default())).await;
    let slack = SlackApi::new(client(), &base.join("api").unwrap(), "xoxb-test").unwrap();

    let err = slack.send("C_DOWN", "hello").await.unwrap_err();

    match err {
        ShelterError::Http(e) => assert_eq!(
            e.status(),
            Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        ),
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn dog_api_returns_the_image_url() {
    let base = serve(stub_upstreams(Posted::default())).await;
    let dogs = DogApi::new(client(), base.join("breeds/image/random").unwrap());

    assert_eq!(dogs.random_image().await.unwrap(), PUG);
}

#[tokio::test]
async fn dog_api_failures_map_to_upstream_errors() {
    let base = serve(stub_upstreams(Posted::default())).await;
    let fetch = |path: &str| DogApi::new(client(), base.join(path).unwrap());

    let err = fetch("failed").random_image().await.unwrap_err();
    assert!(matches!(err, ShelterError::Upstream(_)), "{err:?}");

    let err = fetch("broken").random_image().await.unwrap_err();
    assert!(matches!(err, ShelterError::Json(_)), "{err:?}");

    let err = fetch("missing").random_image().await.unwrap_err();
    match &err {
        ShelterError::Http(e) => assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND)),
        other => panic!("expected an HTTP error, got {other:?}"),
    }

    assert!(err.is_upstream());
}
