//! A scripted [`WalletProvider`] for tests.

use crate::{ProviderError, ProviderEvent, WalletProvider};
use alloy_primitives::Address;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::{
    collections::{HashMap, VecDeque},
    fmt,
    sync::Arc,
};
use tokio::sync::broadcast;

type Handler = Arc<dyn Fn(&Value) -> Result<Value, ProviderError> + Send + Sync>;

#[derive(Clone)]
enum Reply {
    Fixed(Result<Value, ProviderError>),
    Handler(Handler),
    /// Never resolves.
    Hang,
}

/// Answers requests from a per-method script and records every call.
///
/// One-shot replies queued with [`MockProvider::once`] are consumed first, then the standing
/// reply of the method applies. Methods without a reply fail with 4200.
pub struct MockProvider {
    once: Mutex<HashMap<String, VecDeque<Reply>>>,
    standing: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<(String, Value)>>,
    events: broadcast::Sender<ProviderEvent>,
}

impl fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockProvider").field("calls", &self.calls.lock().len()).finish()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            once: Mutex::default(),
            standing: Mutex::default(),
            calls: Mutex::default(),
            events,
        }
    }

    /// A wallet that has authorized `address` and sits on `chain_id`, and accepts chain
    /// switching/adding requests.
    pub fn connected(address: Address, chain_id: u64) -> Self {
        let provider = Self::new();
        provider.respond("eth_accounts", Ok(json!([address])));
        provider.respond("eth_requestAccounts", Ok(json!([address])));
        provider.respond("eth_chainId", Ok(Value::from(format!("{chain_id:#x}"))));
        provider.respond("wallet_switchEthereumChain", Ok(Value::Null));
        provider.respond("wallet_addEthereumChain", Ok(Value::Null));
        provider
    }

    /// Sets the standing reply of `method`.
    pub fn respond(&self, method: &str, reply: Result<Value, ProviderError>) {
        self.standing.lock().insert(method.to_string(), Reply::Fixed(reply));
    }

    /// Makes `method` fail with `err` until told otherwise.
    pub fn fail(&self, method: &str, err: ProviderError) {
        self.respond(method, Err(err));
    }

    /// Makes `method` never answer.
    pub fn hang(&self, method: &str) {
        self.standing.lock().insert(method.to_string(), Reply::Hang);
    }

    /// Answers `method` by calling `handler` with the request params.
    pub fn handle<F>(&self, method: &str, handler: F)
    where
        F: Fn(&Value) -> Result<Value, ProviderError> + Send + Sync + 'static,
    {
        self.standing.lock().insert(method.to_string(), Reply::Handler(Arc::new(handler)));
    }

    /// Queues a reply used for the next call of `method` only.
    pub fn once(&self, method: &str, reply: Result<Value, ProviderError>) {
        self.once.lock().entry(method.to_string()).or_default().push_back(Reply::Fixed(reply));
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: ProviderEvent) {
        let _ = self.events.send(event);
    }

    /// The called methods, in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(method, _)| method.clone()).collect()
    }

    /// The params of every call of `method`.
    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|(m, _)| m == method).count()
    }

    fn next_reply(&self, method: &str) -> Option<Reply> {
        if let Some(reply) = self.once.lock().get_mut(method).and_then(VecDeque::pop_front) {
            return Some(reply);
        }
        self.standing.lock().get(method).cloned()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls.lock().push((method.to_string(), params.clone()));
        match self.next_reply(method) {
            Some(Reply::Fixed(reply)) => reply,
            Some(Reply::Handler(handler)) => handler(&params),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(ProviderError::unsupported_method(method)),
        }
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<ProviderEvent>> {
        Some(self.events.subscribe())
    }
}
