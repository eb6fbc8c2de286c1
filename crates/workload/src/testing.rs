//! Scripted backend for driver tests.

use std::{
    path::PathBuf,
    sync::Mutex,
};

use eyre::{Result, bail};

use crate::backend::{AccessControlBackend, CallReceipt, DecisionRequest, Level};
use crate::results::GasResults;

type FailRule = Box<dyn Fn(u32, Level) -> bool + Send + Sync>;

/// In-memory [`AccessControlBackend`] with a programmable failure rule.
///
/// Every confirmed call costs `gas_per_call` and carries a synthetic hash
/// derived from the global call number.
pub(crate) struct ScriptedBackend {
    pub gas_per_call: u64,
    calls: Mutex<u32>,
    fail_rule: Option<FailRule>,
    /// When the given evaluate call number is reached, parse the file at the
    /// path and keep the snapshot. Emulates inspecting the results file
    /// after a mid-run crash.
    observe: Option<(u32, PathBuf)>,
    pub observed: Mutex<Option<GasResults>>,
    pub drone_registered: Mutex<bool>,
    pub policy_registered: Mutex<bool>,
    pub drones_created: Mutex<u32>,
    pub policies_created: Mutex<u32>,
}

impl ScriptedBackend {
    pub fn succeeding() -> Self {
        Self {
            gas_per_call: 21_000,
            calls: Mutex::new(0),
            fail_rule: None,
            observe: None,
            observed: Mutex::new(None),
            drone_registered: Mutex::new(false),
            policy_registered: Mutex::new(false),
            drones_created: Mutex::new(0),
            policies_created: Mutex::new(0),
        }
    }

    /// Fails every evaluate call for which `rule(call_number, level)` holds.
    pub fn failing_when(rule: impl Fn(u32, Level) -> bool + Send + Sync + 'static) -> Self {
        Self {
            fail_rule: Some(Box::new(rule)),
            ..Self::succeeding()
        }
    }

    pub fn observe_file_at_call(mut self, call_number: u32, path: PathBuf) -> Self {
        self.observe = Some((call_number, path));
        self
    }

    pub fn with_fixtures_present(self) -> Self {
        *self.drone_registered.lock().unwrap() = true;
        *self.policy_registered.lock().unwrap() = true;
        self
    }

    pub fn evaluate_calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }

    fn receipt(&self, call_number: u32) -> CallReceipt {
        CallReceipt {
            gas_used: self.gas_per_call,
            tx_hash: format!("0x{call_number:064x}"),
        }
    }
}

#[async_trait::async_trait]
impl AccessControlBackend for ScriptedBackend {
    async fn evaluate(&self, level: Level, _request: &DecisionRequest) -> Result<CallReceipt> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };

        if let Some((at, path)) = &self.observe {
            if call_number == *at {
                let snapshot: GasResults =
                    serde_json::from_slice(&std::fs::read(path)?)?;
                *self.observed.lock().unwrap() = Some(snapshot);
            }
        }

        if let Some(rule) = &self.fail_rule {
            if rule(call_number, level) {
                bail!("execution reverted (call {call_number})");
            }
        }
        Ok(self.receipt(call_number))
    }

    async fn drone_exists(&self, _drone_id: u64) -> Result<bool> {
        Ok(*self.drone_registered.lock().unwrap())
    }

    async fn create_drone(&self, _name: &str, _zone: u64) -> Result<CallReceipt> {
        *self.drone_registered.lock().unwrap() = true;
        *self.drones_created.lock().unwrap() += 1;
        Ok(self.receipt(0))
    }

    async fn policy_exists(&self, _zone: u64) -> Result<bool> {
        Ok(*self.policy_registered.lock().unwrap())
    }

    async fn create_policy(
        &self,
        _zone: u64,
        _window_start: &str,
        _window_end: &str,
    ) -> Result<CallReceipt> {
        *self.policy_registered.lock().unwrap() = true;
        *self.policies_created.lock().unwrap() += 1;
        Ok(self.receipt(0))
    }
}
