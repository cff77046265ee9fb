//! Test-only oracles returning predetermined feedback.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, anyhow};

use crate::core::attempt::KeyAttempt;
use crate::io::oracle::KeyOracle;

/// Feedback declaring `key` correct.
pub fn success(key: &str) -> KeyAttempt {
    KeyAttempt::decode(key, "Success", true).expect("success feedback")
}

/// Feedback denying `key` with the given placement code.
pub fn denied(key: &str, code: &str) -> KeyAttempt {
    KeyAttempt::decode(key, code, false).expect("denied feedback")
}

/// Oracle that replays a fixed sequence of responses, recording the keys it
/// was asked about. Errors when the script runs dry.
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<KeyAttempt>>,
    submitted: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn new(responses: Vec<KeyAttempt>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// The keys submitted so far, in order.
    pub fn submitted_keys(&self) -> Vec<String> {
        self.submitted.lock().expect("submitted lock").clone()
    }
}

impl KeyOracle for ScriptedOracle {
    fn try_key(&self, key: &str) -> Result<KeyAttempt> {
        self.submitted
            .lock()
            .expect("submitted lock")
            .push(key.to_string());
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted response left for key '{key}'"))
    }
}

/// Oracle whose every call fails with a transport-style error.
pub struct FailingOracle;

impl KeyOracle for FailingOracle {
    fn try_key(&self, _key: &str) -> Result<KeyAttempt> {
        Err(anyhow!("keyhole service unreachable"))
    }
}
