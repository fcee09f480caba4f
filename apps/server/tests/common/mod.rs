#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use multidml_server::config::ServerConfig;
use multidml_server::router::build_router;
use multidml_server::salesforce::CrmApi;
use multidml_server::state::AppState;
use multidml_shared::api::composite::CompositeRequest;
use multidml_shared::api::sobject::Record;
use multidml_shared::api::tree::TreeRequest;
use multidml_shared::constants::data_path;
use multidml_shared::error::DemoError;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

/// One outbound call as seen by the recording client.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { sobject: String, body: Value },
    Apex { path: String, body: Value },
    Composite { body: Value },
    Tree { sobject: String, body: Value },
}

/// In-memory `CrmApi` that records every call and answers with scripted
/// outcomes, in order. Once the script runs out it answers with a generic
/// successful save result. Composite and Tree requests are validated first,
/// as the real client does, and an invalid one is never recorded.
#[derive(Default)]
pub struct RecordingCrm {
    calls: Mutex<Vec<Call>>,
    script: Mutex<VecDeque<Result<Value, DemoError>>>,
}

impl RecordingCrm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(outcomes: Vec<Result<Value, DemoError>>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(outcomes.into()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: Call) -> Result<Value, DemoError> {
        self.calls.lock().unwrap().push(call);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"id": "001000000000001AAA", "success": true, "errors": []})))
    }
}

#[async_trait::async_trait]
impl CrmApi for RecordingCrm {
    fn data_path(&self) -> String {
        data_path("40.0")
    }

    async fn create(&self, sobject: &str, record: &Record) -> Result<Value, DemoError> {
        self.answer(Call::Create {
            sobject: sobject.to_string(),
            body: record.clone().into_value(),
        })
    }

    async fn apex_post(&self, path: &str, body: &Value) -> Result<Value, DemoError> {
        self.answer(Call::Apex {
            path: path.to_string(),
            body: body.clone(),
        })
    }

    async fn composite(&self, request: &CompositeRequest) -> Result<Value, DemoError> {
        request.validate()?;
        self.answer(Call::Composite {
            body: serde_json::to_value(request).unwrap(),
        })
    }

    async fn tree(&self, sobject: &str, request: &TreeRequest) -> Result<Value, DemoError> {
        request.validate(sobject)?;
        self.answer(Call::Tree {
            sobject: sobject.to_string(),
            body: serde_json::to_value(request).unwrap(),
        })
    }
}

pub fn test_app(crm: Arc<RecordingCrm>) -> axum::Router {
    let state = AppState {
        crm,
        config: Arc::new(ServerConfig::default()),
    };
    build_router(state)
}

/// GET `uri` and return the status and body text.
pub async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn unescape_html(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Contents of every `<code>` block on the page, HTML-unescaped.
pub fn code_blocks(page: &str) -> Vec<String> {
    page.split("<code>")
        .skip(1)
        .filter_map(|rest| rest.split_once("</code>").map(|(code, _)| unescape_html(code)))
        .collect()
}

/// The page's code blocks parsed as JSON.
pub fn json_blocks(page: &str) -> Vec<Value> {
    code_blocks(page)
        .iter()
        .map(|block| serde_json::from_str(block).expect("code block should be valid JSON"))
        .collect()
}
