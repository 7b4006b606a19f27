//! Shared fixtures for tool tests.

use super::ToolContext;
use crate::audio::{AudioSink, LoopKind};
use crate::effects::EffectLedger;
use crate::pool::{CreaturePool, PoolSetup};
use crate::surface::MarkLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AudioCall {
    Impact,
    Projectile,
    Start(LoopKind),
    Stop(LoopKind),
}

/// Sink that records every call verbatim.
#[derive(Debug, Default)]
pub(crate) struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

impl RecordingAudio {
    pub fn is_running(&self, kind: LoopKind) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|call| match *call {
                AudioCall::Start(k) if k == kind => Some(true),
                AudioCall::Stop(k) if k == kind => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn count(&self, call: AudioCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play_impact(&mut self) {
        self.calls.push(AudioCall::Impact);
    }

    fn play_projectile(&mut self) {
        self.calls.push(AudioCall::Projectile);
    }

    fn start_continuous(&mut self, kind: LoopKind) {
        self.calls.push(AudioCall::Start(kind));
    }

    fn stop_continuous(&mut self, kind: LoopKind) {
        self.calls.push(AudioCall::Stop(kind));
    }
}

pub(crate) struct Fixture {
    pub pool: CreaturePool,
    pub effects: EffectLedger,
    pub audio: RecordingAudio,
    pub surface: MarkLog,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_density(1.0)
    }

    pub fn with_density(density: f32) -> Self {
        Self {
            pool: CreaturePool::new(PoolSetup::new(800.0, 600.0).with_density(density).with_seed(11)),
            effects: EffectLedger::with_seed(12),
            audio: RecordingAudio::default(),
            surface: MarkLog::new(),
        }
    }

    pub fn ctx(&mut self) -> ToolContext<'_> {
        ToolContext {
            pool: &mut self.pool,
            effects: &mut self.effects,
            audio: &mut self.audio,
            surface: Some(&mut self.surface),
        }
    }

    pub fn ctx_without_surface(&mut self) -> ToolContext<'_> {
        ToolContext {
            pool: &mut self.pool,
            effects: &mut self.effects,
            audio: &mut self.audio,
            surface: None,
        }
    }
}
