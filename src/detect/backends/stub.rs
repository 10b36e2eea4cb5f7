//! Scripted adapter for testing and synthetic runs.

use anyhow::{anyhow, Result};

use crate::detect::adapter::{InferenceAdapter, RawDetection};

/// What the stub returns for one call, in order.
#[derive(Clone, Debug)]
pub enum StubResponse {
    Detections(Vec<RawDetection>),
    Failure(String),
}

/// Adapter that replays a fixed script of per-call responses.
///
/// Calls beyond the script return no detections. The call counter makes the
/// orchestrator's short-circuit observable: a full-frame hit must leave the
/// counter at exactly one.
#[derive(Default)]
pub struct StubAdapter {
    script: Vec<StubResponse>,
    calls: usize,
}

impl StubAdapter {
    pub fn new(script: Vec<StubResponse>) -> Self {
        Self { script, calls: 0 }
    }

    /// Stub that finds nothing, ever.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of `detect` calls so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl<I> InferenceAdapter<I> for StubAdapter {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _region: &I) -> Result<Vec<RawDetection>> {
        let index = self.calls;
        self.calls += 1;
        match self.script.get(index) {
            Some(StubResponse::Detections(dets)) => Ok(dets.clone()),
            Some(StubResponse::Failure(msg)) => Err(anyhow!("{}", msg)),
            None => Ok(vec![]),
        }
    }
}
