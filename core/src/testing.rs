//! Recording transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::ClientConfig;
use crate::delivery::DeliveryClient;
use crate::http::{HttpRequest, HttpResponse};
use crate::limiter::Unthrottled;
use crate::management::ManagementClient;
use crate::transport::{Transport, TransportError};

/// Records every request and answers from a queue of canned replies; an
/// empty queue answers `200 {}`.
#[derive(Default)]
pub(crate) struct Recorder {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl Recorder {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
    }

    pub(crate) fn fail(&self, err: TransportError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for Recorder {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: "{}".to_string(),
            })
        })
    }
}

fn config() -> ClientConfig {
    ClientConfig::builder("token").build().unwrap()
}

pub(crate) fn management(recorder: &Arc<Recorder>) -> ManagementClient {
    ManagementClient::with_transport(config(), recorder.clone(), Arc::new(Unthrottled))
}

pub(crate) fn delivery(recorder: &Arc<Recorder>) -> DeliveryClient {
    DeliveryClient::with_transport(config(), recorder.clone(), Arc::new(Unthrottled))
}
