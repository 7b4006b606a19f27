//! Audio front-end.
//!
//! Tools talk to an [`AudioSink`]. [`Audio`] is the game's sink: it applies
//! mute gating, keeps the continuous loops idempotent and forwards
//! [`Cue`]s to whatever synth backend the host provides.

use crate::storage::MuteFlag;
use tracing::{debug, warn};

/// Master gain sent to the backend when unmuted.
pub const MASTER_GAIN: f32 = 2.4;

/// A continuous sound loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    Flame,
    Spray,
}

/// A request forwarded to the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    Impact,
    Projectile,
    LoopStart(LoopKind),
    LoopStop(LoopKind),
    MasterGain(f32),
}

/// What tools need from audio.
pub trait AudioSink {
    fn play_impact(&mut self);
    fn play_projectile(&mut self);
    fn start_continuous(&mut self, kind: LoopKind);
    fn stop_continuous(&mut self, kind: LoopKind);
}

/// The synth that actually produces sound.
pub trait AudioBackend {
    fn cue(&mut self, cue: Cue);
}

/// Mute-aware audio front-end over an optional backend.
pub struct Audio {
    backend: Option<Box<dyn AudioBackend>>,
    mute: MuteFlag,
    flame_running: bool,
    spray_running: bool,
}

impl std::fmt::Debug for Audio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Audio")
            .field("backend", &self.backend.is_some())
            .field("mute", &self.mute)
            .field("flame_running", &self.flame_running)
            .field("spray_running", &self.spray_running)
            .finish()
    }
}

impl Audio {
    pub fn new(backend: Option<Box<dyn AudioBackend>>, mute: MuteFlag) -> Self {
        if backend.is_none() {
            warn!("No audio backend available, running silent");
        }
        let mut audio = Self {
            backend,
            mute,
            flame_running: false,
            spray_running: false,
        };
        let gain = audio.gain();
        audio.send(Cue::MasterGain(gain));
        audio
    }

    /// Front-end with no backend and a transient unmuted flag.
    pub fn silent() -> Self {
        Self::new(None, MuteFlag::transient(false))
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        self.mute.get()
    }

    /// Muting only drops the master gain; running loops keep going silently
    /// and are audible again on unmute.
    pub fn set_muted(&mut self, muted: bool) {
        if muted == self.mute.get() {
            return;
        }
        self.mute.set(muted);
        let gain = self.gain();
        self.send(Cue::MasterGain(gain));
        debug!("Audio {}", if muted { "muted" } else { "unmuted" });
    }

    /// Flip the mute flag and return the new value.
    pub fn toggle_muted(&mut self) -> bool {
        let muted = !self.mute.get();
        self.set_muted(muted);
        muted
    }

    pub fn is_running(&self, kind: LoopKind) -> bool {
        match kind {
            LoopKind::Flame => self.flame_running,
            LoopKind::Spray => self.spray_running,
        }
    }

    fn running_mut(&mut self, kind: LoopKind) -> &mut bool {
        match kind {
            LoopKind::Flame => &mut self.flame_running,
            LoopKind::Spray => &mut self.spray_running,
        }
    }

    fn gain(&self) -> f32 {
        if self.mute.get() { 0.0 } else { MASTER_GAIN }
    }

    /// Whether play/start requests should reach the backend.
    fn audible(&self) -> bool {
        self.backend.is_some() && !self.mute.get()
    }

    fn send(&mut self, cue: Cue) {
        if let Some(backend) = self.backend.as_mut() {
            backend.cue(cue);
        }
    }
}

impl AudioSink for Audio {
    fn play_impact(&mut self) {
        if self.audible() {
            self.send(Cue::Impact);
        }
    }

    fn play_projectile(&mut self) {
        if self.audible() {
            self.send(Cue::Projectile);
        }
    }

    fn start_continuous(&mut self, kind: LoopKind) {
        if !self.audible() || self.is_running(kind) {
            return;
        }
        *self.running_mut(kind) = true;
        self.send(Cue::LoopStart(kind));
    }

    fn stop_continuous(&mut self, kind: LoopKind) {
        if !self.is_running(kind) {
            return;
        }
        *self.running_mut(kind) = false;
        self.send(Cue::LoopStop(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MUTE_KEY, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Cue>>>);

    impl AudioBackend for Recorder {
        fn cue(&mut self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn audio(muted: bool) -> (Audio, Rc<RefCell<Vec<Cue>>>) {
        let recorder = Recorder::default();
        let cues = recorder.0.clone();
        let audio = Audio::new(Some(Box::new(recorder)), MuteFlag::transient(muted));
        cues.borrow_mut().clear();
        (audio, cues)
    }

    #[test]
    fn test_loops_are_idempotent() {
        let (mut audio, cues) = audio(false);
        audio.start_continuous(LoopKind::Flame);
        audio.start_continuous(LoopKind::Flame);
        audio.stop_continuous(LoopKind::Flame);
        audio.stop_continuous(LoopKind::Flame);
        assert_eq!(
            *cues.borrow(),
            vec![Cue::LoopStart(LoopKind::Flame), Cue::LoopStop(LoopKind::Flame)]
        );
    }

    #[test]
    fn test_mute_gates_play_and_start() {
        let (mut audio, cues) = audio(true);
        audio.play_impact();
        audio.play_projectile();
        audio.start_continuous(LoopKind::Spray);
        assert!(cues.borrow().is_empty());
        assert!(!audio.is_running(LoopKind::Spray));
    }

    #[test]
    fn test_muting_keeps_loops_running() {
        let (mut audio, cues) = audio(false);
        audio.start_continuous(LoopKind::Spray);
        audio.set_muted(true);
        assert!(audio.is_running(LoopKind::Spray));
        audio.set_muted(false);
        assert!(audio.is_running(LoopKind::Spray));
        assert_eq!(
            *cues.borrow(),
            vec![
                Cue::LoopStart(LoopKind::Spray),
                Cue::MasterGain(0.0),
                Cue::MasterGain(MASTER_GAIN),
            ]
        );
    }

    #[test]
    fn test_stop_passes_through_while_muted() {
        let (mut audio, cues) = audio(false);
        audio.start_continuous(LoopKind::Flame);
        audio.set_muted(true);
        audio.stop_continuous(LoopKind::Flame);
        assert!(!audio.is_running(LoopKind::Flame));
        assert_eq!(cues.borrow().last(), Some(&Cue::LoopStop(LoopKind::Flame)));
    }

    #[test]
    fn test_toggle_writes_through() {
        let store = Rc::new(RefCell::new(MemoryStore::new()));

        struct Shared(Rc<RefCell<MemoryStore>>);
        impl KeyValueStore for Shared {
            fn get(&self, key: &str) -> Result<Option<String>, crate::StoreError> {
                self.0.borrow().get(key)
            }
            fn set(&mut self, key: &str, value: &str) -> Result<(), crate::StoreError> {
                self.0.borrow_mut().set(key, value)
            }
        }

        let mute = MuteFlag::load(Some(Box::new(Shared(store.clone()))));
        let mut audio = Audio::new(None, mute);
        assert!(audio.toggle_muted());
        assert_eq!(store.borrow().get(MUTE_KEY).unwrap().as_deref(), Some("1"));
        assert!(!audio.toggle_muted());
        assert_eq!(store.borrow().get(MUTE_KEY).unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn test_missing_backend_is_silent() {
        let mut audio = Audio::silent();
        audio.play_impact();
        audio.start_continuous(LoopKind::Flame);
        assert!(!audio.is_running(LoopKind::Flame));
        audio.stop_continuous(LoopKind::Flame);
    }

    #[test]
    fn test_initial_gain_reflects_mute() {
        let recorder = Recorder::default();
        let cues = recorder.0.clone();
        let _audio = Audio::new(Some(Box::new(recorder)), MuteFlag::transient(true));
        assert_eq!(*cues.borrow(), vec![Cue::MasterGain(0.0)]);
    }
}
