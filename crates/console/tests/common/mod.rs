#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use labadmin_client::transport::{ApiRequest, Method, Transport};
use labadmin_client::{ClientError, LabClient};
use labadmin_console::notify::{AlwaysConfirm, CollectingNotifier, NeverConfirm};
use labadmin_console::resources::{PapersResource, ProjectsResource};
use labadmin_console::{Confirmer, ListController};
use labadmin_core::codes::Identity;
use labadmin_core::session::{CurrentUser, SessionContext};
use labadmin_core::types::DbId;

#[derive(Default)]
struct Store {
    achievements: Vec<Value>,
    next_id: DbId,
    next_author_id: DbId,
    /// Ids whose flag changes the backend refuses.
    rejected: HashSet<DbId>,
    /// Number of writes (anything but GET) received.
    writes: usize,
    list_calls: usize,
    paths: Vec<String>,
    /// Envelope failure returned by the next request, whatever it is.
    fail_next: Option<(i32, String)>,
}

/// In-memory lab backend speaking the `{code, msg, data}` envelope.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    store: Arc<Mutex<Store>>,
    gate: Arc<Mutex<Option<Arc<Notify>>>>,
}

impl MemoryTransport {
    pub fn seed(&self, kind: i32, count: usize) {
        let mut store = self.store.lock().unwrap();
        for _ in 0..count {
            store.next_id += 1;
            let id = store.next_id;
            let title = if kind == 1 {
                format!("Paper {id}")
            } else {
                format!("Project {id}")
            };
            store.achievements.push(json!({
                "id": id,
                "title": title,
                "type": kind,
                "published": false,
                "isVerified": false,
                "authors": []
            }));
        }
    }

    pub fn reject_flags_for(&self, id: DbId) {
        self.store.lock().unwrap().rejected.insert(id);
    }

    pub fn fail_next(&self, code: i32, msg: &str) {
        self.store.lock().unwrap().fail_next = Some((code, msg.to_string()));
    }

    pub fn writes(&self) -> usize {
        self.store.lock().unwrap().writes
    }

    pub fn list_calls(&self) -> usize {
        self.store.lock().unwrap().list_calls
    }

    pub fn paths(&self) -> Vec<String> {
        self.store.lock().unwrap().paths.clone()
    }

    pub fn stored(&self, id: DbId) -> Option<Value> {
        self.store
            .lock()
            .unwrap()
            .achievements
            .iter()
            .find(|a| a["id"].as_i64() == Some(id))
            .cloned()
    }

    /// Hold the next listing response until the returned handle is
    /// notified.
    pub fn hold_next_list(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    fn handle(&self, request: &ApiRequest) -> Value {
        let mut store = self.store.lock().unwrap();
        store.paths.push(request.path.clone());
        if let Some((code, msg)) = store.fail_next.take() {
            return fail(code, &msg);
        }
        if request.method != Method::Get {
            store.writes += 1;
        }
        let segments: Vec<&str> = request
            .path
            .trim_start_matches('/')
            .trim_start_matches("v2/")
            .split('/')
            .collect();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["lab", "achievements"]) => {
                store.list_calls += 1;
                let kind = request.query_value("type").and_then(|t| t.parse::<i64>().ok());
                let keyword = request.query_value("keyword").map(str::to_string);
                let page: usize = request
                    .query_value("pageNum")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(1);
                let size: usize = request
                    .query_value("pageSize")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(10);
                let matching: Vec<Value> = store
                    .achievements
                    .iter()
                    .filter(|a| kind.map_or(true, |k| a["type"].as_i64() == Some(k)))
                    .filter(|a| {
                        keyword.as_deref().map_or(true, |k| {
                            a["title"].as_str().is_some_and(|t| t.contains(k))
                        })
                    })
                    .cloned()
                    .collect();
                let rows: Vec<Value> = matching
                    .iter()
                    .skip((page - 1) * size)
                    .take(size)
                    .cloned()
                    .collect();
                ok(json!({ "total": matching.len(), "rows": rows }))
            }
            (Method::Post, ["lab", "achievements"]) => {
                store.next_id += 1;
                let id = store.next_id;
                let mut row = request.body.clone().unwrap_or_else(|| json!({}));
                row["id"] = json!(id);
                if row.get("type").is_none() {
                    row["type"] = json!(2);
                }
                let mut authors = Vec::new();
                for mut author in row["authors"].as_array().cloned().unwrap_or_default() {
                    store.next_author_id += 1;
                    author["id"] = json!(store.next_author_id);
                    author["achievementId"] = json!(id);
                    authors.push(author);
                }
                row["authors"] = Value::Array(authors);
                store.achievements.push(row.clone());
                ok(row)
            }
            (Method::Put, ["lab", "achievements", id]) => {
                let id: DbId = id.parse().unwrap_or_default();
                let body = request.body.clone().unwrap_or_else(|| json!({}));
                match store.achievements.iter_mut().find(|a| a["id"].as_i64() == Some(id)) {
                    Some(row) => {
                        if let (Some(row), Some(patch)) = (row.as_object_mut(), body.as_object()) {
                            for (key, value) in patch {
                                row.insert(key.clone(), value.clone());
                            }
                        }
                        ok(row.clone())
                    }
                    None => fail(404, "Achievement not found"),
                }
            }
            (Method::Delete, ["lab", "achievements", id]) => {
                let id: DbId = id.parse().unwrap_or_default();
                store.achievements.retain(|a| a["id"].as_i64() != Some(id));
                ok(Value::Null)
            }
            (Method::Put, ["lab", "achievements", id, action]) => {
                let id: DbId = id.parse().unwrap_or_default();
                if store.rejected.contains(&id) {
                    return fail(500, "Update failed");
                }
                let (field, param) = match *action {
                    "publish" => ("published", "published"),
                    "verify" => ("isVerified", "verified"),
                    _ => return fail(404, "Unknown action"),
                };
                let value = request.query_value(param) == Some("true");
                if let Some(row) = store.achievements.iter_mut().find(|a| a["id"].as_i64() == Some(id)) {
                    row[field] = json!(value);
                }
                ok(Value::Null)
            }
            (Method::Put, ["lab", "my-achievements", id, "visibility"]) => {
                let id: DbId = id.parse().unwrap_or_default();
                let value = request.query_value("visible") == Some("true");
                if let Some(row) = store.achievements.iter_mut().find(|a| a["id"].as_i64() == Some(id)) {
                    row["myVisibility"] = json!(value);
                }
                ok(Value::Null)
            }
            _ => fail(404, "Not found"),
        }
    }
}

fn ok(data: Value) -> Value {
    json!({ "code": 200, "msg": "success", "data": data })
}

fn fail(code: i32, msg: &str) -> Value {
    json!({ "code": code, "msg": msg, "data": null })
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let response = self.handle(&request);
        if request.method == Method::Get {
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.notified().await;
            }
        }
        Ok(response)
    }
}

/// Replays canned envelopes in order and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Value>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn respond(&self, data: Value) -> &Self {
        self.responses.lock().unwrap().push_back(ok(data));
        self
    }

    pub fn fail_next(&self, code: i32, msg: &str) -> &Self {
        self.responses.lock().unwrap().push_back(fail(code, msg));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn client(&self) -> LabClient {
        LabClient::new(Arc::new(self.clone()))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.requests.lock().unwrap().push(request);
        // Unscripted calls succeed with no data.
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ok(Value::Null)))
    }
}

pub fn teacher() -> SessionContext {
    session(Identity::Teacher)
}

pub fn session(identity: Identity) -> SessionContext {
    SessionContext::new(CurrentUser {
        id: 2,
        username: "wang".into(),
        real_name: Some("Prof. Wang".into()),
        identity,
    })
}

pub struct Harness<R: labadmin_console::ResourceApi> {
    pub controller: ListController<R>,
    pub backend: MemoryTransport,
    pub notifier: Arc<CollectingNotifier>,
}

fn build<R: labadmin_console::ResourceApi>(
    make: impl FnOnce(LabClient) -> R,
    session: SessionContext,
    confirmer: Arc<dyn Confirmer>,
) -> Harness<R> {
    let backend = MemoryTransport::default();
    let client = LabClient::new(Arc::new(backend.clone()));
    let notifier = Arc::new(CollectingNotifier::new());
    let controller = ListController::new(make(client), session, notifier.clone(), confirmer);
    Harness {
        controller,
        backend,
        notifier,
    }
}

pub fn papers() -> Harness<PapersResource> {
    build(PapersResource::new, teacher(), Arc::new(AlwaysConfirm))
}

pub fn papers_declining() -> Harness<PapersResource> {
    build(PapersResource::new, teacher(), Arc::new(NeverConfirm))
}

pub fn projects(session: SessionContext) -> Harness<ProjectsResource> {
    build(ProjectsResource::new, session, Arc::new(AlwaysConfirm))
}
