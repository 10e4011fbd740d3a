//! Test doubles for the fetch layer

use crate::fetcher::retry::Sleeper;
use crate::fetcher::transport::{Transport, TransportError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Response = Result<Option<String>, TransportError>;

#[derive(Default)]
struct StubState {
    scripted: HashMap<String, VecDeque<Response>>,
    standing: HashMap<String, Response>,
    calls: Vec<String>,
}

/// Transport answering from canned responses
///
/// Scripted responses for a URL are consumed first, then its standing
/// response repeats forever. Unknown URLs get a 404.
#[derive(Clone, Default)]
pub(crate) struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, url: &str, body: &str) {
        self.state
            .lock()
            .unwrap()
            .standing
            .insert(url.to_string(), Ok(Some(body.to_string())));
    }

    pub(crate) fn respond_empty(&self, url: &str) {
        self.state
            .lock()
            .unwrap()
            .standing
            .insert(url.to_string(), Ok(None));
    }

    pub(crate) fn fail(&self, url: &str, status: u16) {
        self.state.lock().unwrap().standing.insert(
            url.to_string(),
            Err(TransportError::status(
                status,
                format!("Request failed with status code {}", status),
            )),
        );
    }

    pub(crate) fn script(&self, url: &str, responses: Vec<Response>) {
        self.state
            .lock()
            .unwrap()
            .scripted
            .entry(url.to_string())
            .or_default()
            .extend(responses);
    }

    pub(crate) fn calls_to(&self, url: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|called| called.as_str() == url)
            .count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Response {
        let mut state = self.state.lock().unwrap();
        state.calls.push(url.to_string());

        if let Some(next) = state.scripted.get_mut(url).and_then(VecDeque::pop_front) {
            return next;
        }

        state.standing.get(url).cloned().unwrap_or_else(|| {
            Err(TransportError::status(
                404,
                "Request failed with status code 404",
            ))
        })
    }
}

/// Sleeper that records requested delays and returns immediately
#[derive(Clone, Default)]
pub(crate) struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
