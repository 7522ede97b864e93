#![allow(dead_code)]

use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Router};
use futures::future::{BoxFuture, FutureExt};
use github_profile_lookup::error::{LookupError, Result};
use github_profile_lookup::models::ProfileRecord;
use github_profile_lookup::source::ProfileSource;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

pub fn profile(login: &str) -> ProfileRecord {
    ProfileRecord {
        login: login.to_string(),
        name: None,
        avatar_url: format!("https://avatars.githubusercontent.com/{}", login),
        bio: None,
        public_repos: 0,
        followers: 0,
        following: 0,
        location: None,
        company: None,
        blog: None,
        html_url: format!("https://github.com/{}", login),
        created_at: None,
    }
}

/// Profile source whose fetches only finish when the test says so
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<HashMap<String, VecDeque<oneshot::Receiver<Result<ProfileRecord>>>>>,
    calls: AtomicUsize,
}

impl GatedSource {
    /// Register the next fetch for `key`; send on the returned sender to finish it
    pub fn gate(&self, key: &str) -> oneshot::Sender<Result<ProfileRecord>> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProfileSource for GatedSource {
    fn fetch_profile<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<ProfileRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(key)
            .and_then(|queue| queue.pop_front());

        async move {
            match gate {
                Some(rx) => rx.await.unwrap_or_else(|_| {
                    Err(LookupError::ControllerError("gate dropped".to_string()))
                }),
                None => Err(LookupError::NotFound(key.to_string())),
            }
        }
        .boxed()
    }
}

/// Profile source that panics inside every fetch
pub struct PanickingSource;

impl ProfileSource for PanickingSource {
    fn fetch_profile<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<ProfileRecord>> {
        async move {
            if !key.is_empty() {
                panic!("profile source crashed while fetching {}", key);
            }
            Err(LookupError::NotFound(key.to_string()))
        }
        .boxed()
    }
}

/// Poll `check` until it holds or two seconds pass
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

async fn stub_user(Path(username): Path<String>) -> impl IntoResponse {
    match username.as_str() {
        "octocat" => (
            StatusCode::OK,
            json!({
                "login": "octocat",
                "id": 583231,
                "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
                "html_url": "https://github.com/octocat",
                "type": "User",
                "site_admin": false,
                "name": null,
                "company": "@github",
                "blog": "github.blog",
                "location": "San Francisco",
                "bio": "",
                "public_repos": 8,
                "followers": 4000,
                "following": 9,
                "created_at": "2011-01-25T18:44:36Z"
            })
            .to_string(),
        ),
        "doesnotexist123" => (
            StatusCode::NOT_FOUND,
            json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest/users/users#get-a-user"
            })
            .to_string(),
        ),
        "garbage" => (StatusCode::OK, "<html>definitely not json</html>".to_string()),
        "nologin" => (StatusCode::OK, json!({ "id": 1, "name": "Nobody" }).to_string()),
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "message": "Server Error" }).to_string(),
        ),
        other => (
            StatusCode::OK,
            json!({
                "login": other,
                "html_url": format!("https://github.com/{}", other),
                "avatar_url": format!("https://avatars.githubusercontent.com/{}", other)
            })
            .to_string(),
        ),
    }
}

/// Stand-in for api.github.com on an ephemeral port. Returns its base URL.
pub async fn spawn_stub_api() -> String {
    let app = Router::new().route("/users/:username", get(stub_user));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub API");
    let addr = listener.local_addr().expect("Stub API has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub API crashed");
    });

    format!("http://{}", addr)
}

/// Base URL of a port nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No address");
    drop(listener);
    format!("http://{}", addr)
}
