//! Test fixtures and step doubles

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::rpc::Warning;
use crate::domain::validation::{Outcome, Step, Validator};

pub const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
pub const ISSUER: &str = "rLEsXccBGNR3UPuPu2hUXPjziKC3qKSBun";
pub const LEDGER_HASH: &str = "4BC50C9B0D8515D3EAAE1E74B29A95804346C491EE1A95BF25E4AAB854A6A652";

/// Validator that counts its invocations and always passes
#[derive(Debug, Default)]
pub struct CountingValidator {
    calls: AtomicUsize,
}

impl CountingValidator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Validator for CountingValidator {
    fn verify(&self, _object: &Value, _key: &str) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Outcome::Ok
    }
}

/// A counting validator plus a step sharing it
pub fn counting_step() -> (Arc<CountingValidator>, Step) {
    let counter = Arc::new(CountingValidator::default());
    let step = Step::Validate(counter.clone());
    (counter, step)
}

/// JSON-RPC style request framing `params`
pub fn http_request(method: &str, params: Value) -> Value {
    json!({
        "method": method,
        "params": [params],
        "id": 1
    })
}

/// WebSocket style request with inline params
pub fn ws_request(command: &str, params: Value) -> Value {
    let mut request = json!({ "command": command });
    if let (Some(request), Some(params)) = (request.as_object_mut(), params.as_object()) {
        request.extend(params.clone());
    }
    request
}

pub fn warning_ids(warnings: &[Warning]) -> Vec<i32> {
    warnings.iter().map(|warning| warning.code.id()).collect()
}
