//! Collaborators handed to every action handler.
//!
//! The sink receives fire-and-forget notifications (log lines, animation and
//! sound cues, gold flashes, modal requests). Nothing a sink does can change
//! an outcome, and every method defaults to a no-op.

use crate::cards::CardCatalog;
use crate::core::{EngineConfig, GameRng, ModalKind};

/// Severity of a log line sent to the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Presentation-side receiver of engine notifications.
pub trait EffectSink {
    fn log(&mut self, _message: &str, _severity: Severity) {}

    fn animate(&mut self, _effect: &str, _target: &str) {}

    fn play_sound(&mut self, _name: &str) {}

    fn flash_gold(&mut self, _delta: i64) {}

    fn request_modal(&mut self, _modal: &ModalKind) {}
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EffectSink for NullSink {}

/// Sink that records everything for later inspection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSink {
    pub logs: Vec<(String, Severity)>,
    pub animations: Vec<(String, String)>,
    pub sounds: Vec<String>,
    pub gold_flashes: Vec<i64>,
    pub modals: Vec<ModalKind>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Was any line logged at `severity` containing `needle`?
    #[must_use]
    pub fn logged(&self, severity: Severity, needle: &str) -> bool {
        self.logs
            .iter()
            .any(|(message, s)| *s == severity && message.contains(needle))
    }
}

impl EffectSink for RecordingSink {
    fn log(&mut self, message: &str, severity: Severity) {
        self.logs.push((message.to_string(), severity));
    }

    fn animate(&mut self, effect: &str, target: &str) {
        self.animations.push((effect.to_string(), target.to_string()));
    }

    fn play_sound(&mut self, name: &str) {
        self.sounds.push(name.to_string());
    }

    fn flash_gold(&mut self, delta: i64) {
        self.gold_flashes.push(delta);
    }

    fn request_modal(&mut self, modal: &ModalKind) {
        self.modals.push(modal.clone());
    }
}

/// Read-only content plus the injected random source and sink.
pub struct ResolveContext<'a> {
    pub catalog: &'a CardCatalog,
    pub config: &'a EngineConfig,
    pub rng: &'a mut GameRng,
    pub sink: &'a mut dyn EffectSink,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        catalog: &'a CardCatalog,
        config: &'a EngineConfig,
        rng: &'a mut GameRng,
        sink: &'a mut dyn EffectSink,
    ) -> Self {
        Self {
            catalog,
            config,
            rng,
            sink,
        }
    }

    pub fn info(&mut self, message: &str) {
        tracing::debug!("{message}");
        self.sink.log(message, Severity::Info);
    }

    pub fn warn(&mut self, message: &str) {
        tracing::warn!("{message}");
        self.sink.log(message, Severity::Warning);
    }

    pub fn error(&mut self, message: &str) {
        tracing::error!("{message}");
        self.sink.log(message, Severity::Error);
    }
}
