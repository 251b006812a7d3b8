//! Readiness gate.
//!
//! The only state shared between request handlers and the background
//! initializer. The lifecycle lives in one `AtomicU8`; the engine sits in a
//! `OnceLock` that is filled before `Ready` is published with release
//! ordering, so any reader that observes `Ready` also observes the engine.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use rota_core::ReadinessState;
use rota_model::AnalysisEngine;

const NOT_STARTED: u8 = 0;
const INITIALIZING: u8 = 1;
const READY: u8 = 2;

const fn encode(state: ReadinessState) -> u8 {
    match state {
        ReadinessState::NotStarted => NOT_STARTED,
        ReadinessState::Initializing => INITIALIZING,
        ReadinessState::Ready => READY,
    }
}

const fn decode(raw: u8) -> ReadinessState {
    match raw {
        NOT_STARTED => ReadinessState::NotStarted,
        INITIALIZING => ReadinessState::Initializing,
        _ => ReadinessState::Ready,
    }
}

/// Process-wide readiness of the analysis engine.
pub struct ReadinessGate {
    state: AtomicU8,
    engine: OnceLock<Arc<dyn AnalysisEngine>>,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("state", &self.state())
            .field("engine", &self.engine.get().is_some())
            .finish()
    }
}

impl ReadinessGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(NOT_STARTED),
            engine: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ReadinessState {
        decode(self.state.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Whether setup has been requested (initializing or already ready).
    #[must_use]
    pub fn is_setup_started(&self) -> bool {
        self.state() != ReadinessState::NotStarted
    }

    /// Move `NotStarted → Initializing`.
    ///
    /// Returns `true` only for the single caller that performed the
    /// transition; that caller owns launching the initializer. Every later
    /// call is a no-op returning `false`.
    pub fn try_begin_setup(&self) -> bool {
        self.advance(ReadinessState::NotStarted, ReadinessState::Initializing)
    }

    /// Hand over the engine and publish `Ready`.
    ///
    /// Only valid while initializing. Returns `false`, leaving the gate and
    /// any installed engine untouched, when setup was never started or the
    /// gate is already ready.
    pub fn mark_ready(&self, engine: Arc<dyn AnalysisEngine>) -> bool {
        if !self.state().can_transition_to(ReadinessState::Ready) {
            return false;
        }
        self.engine.set(engine).is_ok()
            && self.advance(ReadinessState::Initializing, ReadinessState::Ready)
    }

    fn advance(&self, from: ReadinessState, to: ReadinessState) -> bool {
        from.can_transition_to(to)
            && self
                .state
                .compare_exchange(encode(from), encode(to), Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
    }

    /// The engine, once ready.
    #[must_use]
    pub fn engine(&self) -> Option<Arc<dyn AnalysisEngine>> {
        if !self.is_ready() {
            return None;
        }
        self.engine.get().cloned()
    }
}
