//! Frame-timer animation engine and the per-archetype clip tables.
//!
//! Frames are symbolic sprite keys; the core never touches image data.
//! The host decides which keys exist through a [`SpriteCatalog`].

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AnimState, Archetype, ParticleKind};

/// A sequence of frame keys played at a fixed rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    frames: Vec<String>,
    /// Seconds per frame.
    frame_duration: f64,
    looping: bool,
    index: usize,
    timer: f64,
    finished: bool,
}

impl Animation {
    pub fn new(frames: Vec<String>, fps: f64, looping: bool) -> Self {
        let frame_duration = if fps > 0.0 { 1.0 / fps } else { f64::INFINITY };
        Self {
            frames,
            frame_duration,
            looping,
            index: 0,
            timer: 0.0,
            finished: false,
        }
    }

    /// Advance the frame timer by `dt` seconds. At most one frame step per call.
    pub fn advance(&mut self, dt: f64) {
        if self.finished && !self.looping {
            return;
        }

        self.timer += dt;
        if self.timer < self.frame_duration {
            return;
        }

        self.timer = 0.0;
        self.index += 1;
        if self.index >= self.frames.len() {
            if self.looping {
                self.index = 0;
            } else {
                self.index = self.frames.len().saturating_sub(1);
                self.finished = true;
            }
        }
    }

    /// Key of the frame to draw, `None` for an empty sequence.
    pub fn current_frame(&self) -> Option<&str> {
        self.frames.get(self.index).map(String::as_str)
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.timer = 0.0;
        self.finished = false;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Non-looping effect clip (explosion / muzzle flash) filtered through `catalog`.
    pub fn effect(kind: ParticleKind, catalog: &dyn SpriteCatalog) -> Self {
        let (frames, fps) = match effect_sequence(kind) {
            Some(seq) => (seq.resolve(None, catalog), seq.fps),
            None => (Vec::new(), 0.0),
        };
        Self::new(frames, fps, false)
    }
}

/// Clip selector owned by one entity.
///
/// `hold` implements interrupt clips such as "hurt": while it is positive,
/// behavior-driven selection defers to the forced clip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Animator {
    clips: HashMap<AnimState, Animation>,
    current: Option<AnimState>,
    hold: f64,
}

impl Animator {
    /// Build the clip set for an archetype, keeping only frames the catalog knows.
    pub fn for_archetype(archetype: Archetype, catalog: &dyn SpriteCatalog) -> Self {
        let sheet = archetype.sheet();
        let mut animator = Animator::default();

        for state in AnimState::ALL {
            let Some(seq) = frame_sequence(archetype, state) else {
                continue;
            };
            let frames = seq.resolve(Some(&sheet), catalog);
            if frames.is_empty() {
                log::warn!("no frames found for {sheet} {state:?}");
                continue;
            }
            animator.insert(state, Animation::new(frames, seq.fps, seq.looping));
        }

        animator.play(AnimState::Idle);
        animator
    }

    pub fn insert(&mut self, state: AnimState, animation: Animation) {
        self.clips.insert(state, animation);
    }

    /// Switch to `state`. Same clip or unknown clip: no-op.
    pub fn play(&mut self, state: AnimState) {
        if self.current == Some(state) {
            return;
        }
        self.switch(state);
    }

    /// Switch to `state` and restart it even if it is already playing.
    pub fn play_forced(&mut self, state: AnimState) {
        self.switch(state);
    }

    /// Force `state` and keep it for `hold_secs` against `play` requests.
    pub fn interrupt(&mut self, state: AnimState, hold_secs: f64) {
        if self.clips.contains_key(&state) {
            self.switch(state);
            self.hold = hold_secs.max(0.0);
        }
    }

    /// Drop any pending interrupt hold.
    pub fn release(&mut self) {
        self.hold = 0.0;
    }

    pub fn is_held(&self) -> bool {
        self.hold > 0.0
    }

    pub fn advance(&mut self, dt: f64) {
        if let Some(anim) = self.current.and_then(|s| self.clips.get_mut(&s)) {
            anim.advance(dt);
        }
        if self.hold > 0.0 {
            self.hold = (self.hold - dt).max(0.0);
        }
    }

    pub fn current_state(&self) -> Option<AnimState> {
        self.current
    }

    pub fn current(&self) -> Option<&Animation> {
        self.current.and_then(|s| self.clips.get(&s))
    }

    pub fn current_frame(&self) -> Option<&str> {
        self.current().and_then(Animation::current_frame)
    }

    /// Whether the current clip has played out (never true for looping clips).
    pub fn is_finished(&self) -> bool {
        self.current().is_some_and(Animation::is_finished)
    }

    pub fn has_clip(&self, state: AnimState) -> bool {
        self.clips.contains_key(&state)
    }

    fn switch(&mut self, state: AnimState) {
        if let Some(anim) = self.clips.get_mut(&state) {
            anim.reset();
            self.current = Some(state);
        }
    }
}

/// Describes where a clip's frames live and how it plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSequence {
    /// Clip segment of the sprite key.
    pub clip: &'static str,
    /// Index of the first frame (sheets differ on 0- vs 1-based numbering).
    pub first: u32,
    pub count: u32,
    pub fps: f64,
    pub looping: bool,
}

impl FrameSequence {
    const fn new(clip: &'static str, first: u32, count: u32, fps: f64, looping: bool) -> Self {
        Self {
            clip,
            first,
            count,
            fps,
            looping,
        }
    }

    /// Sprite keys in play order: `{sheet}_{clip}_{i}`, or `{clip}_{i}` without a sheet.
    pub fn keys(&self, sheet: Option<&str>) -> Vec<String> {
        (self.first..self.first + self.count)
            .map(|i| match sheet {
                Some(sheet) => format!("{sheet}_{}_{i}", self.clip),
                None => format!("{}_{i}", self.clip),
            })
            .collect()
    }

    fn resolve(&self, sheet: Option<&str>, catalog: &dyn SpriteCatalog) -> Vec<String> {
        self.keys(sheet)
            .into_iter()
            .filter(|key| catalog.has_frame(key))
            .collect()
    }
}

/// Clip table for every archetype. `None` means the archetype has no such clip.
pub fn frame_sequence(archetype: Archetype, state: AnimState) -> Option<FrameSequence> {
    use AnimState::*;

    match archetype {
        Archetype::Hero(_) => {
            const FPS: f64 = 10.0;
            match state {
                Idle => Some(FrameSequence::new("idle", 1, 1, FPS, true)),
                Run => Some(FrameSequence::new("run", 1, 12, FPS, true)),
                Walk => Some(FrameSequence::new("walk", 1, 8, FPS, true)),
                Jump => Some(FrameSequence::new("jump", 1, 3, FPS, true)),
                Crouch => Some(FrameSequence::new("crouch", 1, 4, FPS, true)),
                Shoot => Some(FrameSequence::new("shoot", 1, 5, FPS, true)),
                Hurt => Some(FrameSequence::new("hurt", 1, 1, FPS, false)),
                Death => Some(FrameSequence::new("die", 1, 5, FPS, false)),
                Attack => None,
            }
        }
        Archetype::Soldier(_) => match state {
            Idle => Some(FrameSequence::new("Idle", 0, 2, 8.0, true)),
            Run => Some(FrameSequence::new("Run", 0, 2, 12.0, true)),
            Walk => Some(FrameSequence::new("Run", 0, 2, 8.0, true)),
            Jump => Some(FrameSequence::new("Idle", 0, 2, 8.0, true)),
            Crouch => Some(FrameSequence::new("Idle", 0, 1, 8.0, true)),
            Shoot => Some(FrameSequence::new("Shoot", 0, 1, 8.0, true)),
            Hurt => Some(FrameSequence::new("Idle", 0, 1, 8.0, false)),
            Death => Some(FrameSequence::new("Dead", 0, 1, 8.0, false)),
            Attack => None,
        },
        Archetype::Zombie(_) => match state {
            Idle => Some(FrameSequence::new("Idle", 0, 1, 8.0, true)),
            Walk | Run => Some(FrameSequence::new("Walk", 0, 3, 8.0, true)),
            Attack => Some(FrameSequence::new("Attack", 0, 1, 8.0, true)),
            Hurt => Some(FrameSequence::new("Idle", 0, 1, 8.0, false)),
            Death => Some(FrameSequence::new("Dead", 0, 1, 8.0, false)),
            Jump | Crouch | Shoot => None,
        },
    }
}

/// Clip table for animated particles.
pub fn effect_sequence(kind: ParticleKind) -> Option<FrameSequence> {
    match kind {
        ParticleKind::Explosion => Some(FrameSequence::new(
            "explosion",
            0,
            EXPLOSION_FRAMES,
            EXPLOSION_FPS,
            false,
        )),
        ParticleKind::Muzzle => Some(FrameSequence::new(
            "muzzle",
            1,
            MUZZLE_FRAMES,
            MUZZLE_FPS,
            false,
        )),
        ParticleKind::Spark | ParticleKind::Blood => None,
    }
}

/// Lookup of which sprite keys the asset provider actually holds.
pub trait SpriteCatalog {
    fn has_frame(&self, key: &str) -> bool;
}

/// Catalog that accepts every key; rendering falls back per frame instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFrame;

impl SpriteCatalog for AnyFrame {
    fn has_frame(&self, _key: &str) -> bool {
        true
    }
}

impl SpriteCatalog for HashSet<String> {
    fn has_frame(&self, key: &str) -> bool {
        self.contains(key)
    }
}
