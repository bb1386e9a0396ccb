use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use labadmin_client::config::ClientConfig;
use labadmin_client::LabClient;

pub const TEST_TOKEN: &str = "t0ken";

/// Achievement id whose publish toggle the fake backend always rejects.
pub const REJECTED_ID: i64 = 999;

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Inner {
    achievements: Vec<Value>,
    next_id: i64,
    requests: Vec<Recorded>,
}

/// In-process stand-in for the lab backend.
///
/// Speaks the `{code, msg, data}` envelope, keeps achievements in memory
/// and records every request for assertions.
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<Inner>>,
}

impl FakeBackend {
    pub fn seed_papers(&self, count: usize) {
        let mut inner = self.inner.lock().unwrap();
        for _ in 0..count {
            inner.next_id += 1;
            let id = inner.next_id;
            inner.achievements.push(json!({
                "id": id,
                "title": format!("Paper {id}"),
                "type": 1,
                "paperType": 1,
                "publishDate": "2024",
                "published": false,
                "isVerified": false,
                "authors": []
            }));
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests()
            .pop()
            .expect("backend received no request")
    }
}

/// Bind the fake backend to an ephemeral port and return a client
/// pointed at it.
pub async fn spawn_backend() -> (LabClient, FakeBackend) {
    let backend = FakeBackend::default();
    let app = Router::new()
        .fallback(handle)
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        token: Some(TEST_TOKEN.to_string()),
        ..ClientConfig::default()
    };
    let client = LabClient::from_config(&config).unwrap();
    (client, backend)
}

fn ok(data: Value) -> Response {
    Json(json!({"code": 0, "msg": "success", "data": data})).into_response()
}

fn fail(code: i32, msg: &str) -> Response {
    Json(json!({"code": code, "msg": msg, "data": null})).into_response()
}

fn page_params(query: &HashMap<String, String>) -> (usize, usize) {
    let num = query.get("pageNum").and_then(|v| v.parse().ok()).unwrap_or(1usize);
    let size = query.get("pageSize").and_then(|v| v.parse().ok()).unwrap_or(10usize);
    (num.max(1), size.max(1))
}

async fn handle(
    State(backend): State<FakeBackend>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let path = uri.path().to_string();
    let mut inner = backend.inner.lock().unwrap();
    inner.requests.push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        body: body.clone(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("GET", ["lab", "achievements"]) => {
            let kind = query.get("type").and_then(|v| v.parse::<i64>().ok());
            let matching: Vec<&Value> = inner
                .achievements
                .iter()
                .filter(|a| kind.map_or(true, |k| a["type"].as_i64() == Some(k)))
                .collect();
            let (num, size) = page_params(&query);
            let rows: Vec<Value> = matching
                .iter()
                .skip((num - 1) * size)
                .take(size)
                .map(|a| (*a).clone())
                .collect();
            ok(json!({"total": matching.len(), "rows": rows}))
        }
        ("POST", ["lab", "achievements"]) | ("POST", ["v2", "lab", "achievements"]) => {
            let mut record = body.unwrap_or_else(|| json!({}));
            inner.next_id += 1;
            let id = inner.next_id;
            record["id"] = json!(id);
            if record.get("type").is_none() {
                record["type"] = json!(2);
            }
            if let Some(authors) = record["authors"].as_array_mut() {
                for (idx, author) in authors.iter_mut().enumerate() {
                    author["id"] = json!(idx as i64 + 1);
                    author["achievementId"] = json!(id);
                }
            }
            inner.achievements.push(record.clone());
            ok(record)
        }
        ("GET", ["lab", "achievements", id]) => {
            let id: i64 = id.parse().unwrap_or_default();
            match inner.achievements.iter().find(|a| a["id"] == id) {
                Some(found) => ok(found.clone()),
                None => fail(404, "Achievement not found"),
            }
        }
        ("DELETE", ["lab", "achievements", id]) => {
            let id: i64 = id.parse().unwrap_or_default();
            inner.achievements.retain(|a| a["id"] != id);
            ok(Value::Null)
        }
        ("PUT", ["lab", "achievements", id, "publish"]) => {
            let id: i64 = id.parse().unwrap_or_default();
            if id == REJECTED_ID {
                return fail(500, "Publish failed");
            }
            let published = query.get("published").map(|v| v == "true").unwrap_or(false);
            for a in inner.achievements.iter_mut().filter(|a| a["id"] == id) {
                a["published"] = json!(published);
            }
            ok(Value::Null)
        }
        ("GET", ["lab", "achievement-categories", "list"]) => {
            let (num, size) = page_params(&query);
            ok(json!({
                "total": 2,
                "pageNum": num,
                "pageSize": size,
                "list": [
                    {"id": 1, "categoryName": "Papers", "sortOrder": 1},
                    {"id": 11, "parentId": 1, "categoryName": "Journal", "sortOrder": 1}
                ]
            }))
        }
        ("GET", ["lab", "users", "crud", "list"]) => ok(json!({
            "total": 2,
            "rows": [
                {"id": 1, "username": "admin", "realName": "Admin", "identity": 1},
                {"user_id": 8, "real_name": "Zhao Liu", "identity": "student", "phone": 13700000000u64}
            ]
        })),
        ("GET", ["broken"]) => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => fail(404, "No such endpoint"),
    }
}
