//! Scripted transport for tests.
//!
//! Plays back queued replies in order, echoing the id of the request each
//! one answers, and records every decoded request body for later
//! assertions. Panics on an empty script or an undecodable request body;
//! both are test bugs, not runtime conditions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::error::Result;
use crate::transport::{HttpResponse, HttpTransport};

type Scripted = Box<dyn Fn(&Value) -> HttpResponse + Send>;

/// Scripted [`HttpTransport`] replaying queued replies.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<Value>>,
}

impl MockTransport {
    /// A fresh transport with an empty script, ready to share with a
    /// client.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply computed from the decoded request, for full control
    /// over the envelope.
    pub fn reply_with(&self, reply: impl Fn(&Value) -> HttpResponse + Send + 'static) {
        self.replies.lock().unwrap().push_back(Box::new(reply));
    }

    /// Queue a well-formed success envelope around `result`, echoing the
    /// request id.
    pub fn reply_result(&self, result: Value) {
        self.reply_with(move |request| {
            ok(json!({"id": request["id"], "result": result.clone(), "error": null}))
        });
    }

    /// Queue a well-formed error envelope, echoing the request id.
    pub fn reply_error(&self, code: i64, message: &str) {
        let message = message.to_owned();
        self.reply_with(move |request| {
            ok(json!({
                "id": request["id"],
                "result": null,
                "error": {"code": code, "message": message.clone()},
            }))
        });
    }

    /// Queue a verbatim body with no id echo, for malformed-envelope
    /// tests.
    pub fn reply_raw(&self, body: &str) {
        let body = body.to_owned();
        self.reply_with(move |_| HttpResponse {
            status: 200,
            body: body.clone(),
        });
    }

    /// Decoded bodies of every request seen so far, in order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

fn ok(payload: Value) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: payload.to_string(),
    }
}

impl HttpTransport for MockTransport {
    fn post(&self, body: &str) -> Result<HttpResponse> {
        let request: Value =
            serde_json::from_str(body).expect("mock transport received an undecodable body");
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("mock transport has no scripted reply for {request}"));
        self.requests.lock().unwrap().push(request.clone());
        Ok(reply(&request))
    }
}
