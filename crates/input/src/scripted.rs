//! Deterministic input playback for headless runs and tests.

use crate::{InputEvent, InputSource};
use glam::Vec2;
use serde::Deserialize;

/// One stretch of constant input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScriptedStep {
    /// How many frames the step lasts. Zero is treated as one.
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default)]
    pub movement: (f32, f32),
    #[serde(default)]
    pub zoom: f32,
    /// Fired once, on the step's first frame.
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

fn default_frames() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

/// Plays back a list of steps, one frame per `advance`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: Vec<ScriptedStep>,
    index: usize,
    frame_in_step: u32,
    started: bool,
    pending: Vec<InputEvent>,
}

impl ScriptedInput {
    pub fn new(steps: Vec<ScriptedStep>) -> Self {
        Self {
            steps,
            ..Default::default()
        }
    }

    /// Parse a script of the form `(steps: [(frames: 10, movement: (0.0, 1.0)), ...])`.
    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        let file: ScriptedInputFile = ron::from_str(source)?;
        Ok(Self::new(file.steps))
    }

    /// Move to the next frame. Returns false once the script has run out.
    pub fn advance(&mut self) -> bool {
        if !self.started {
            self.started = true;
            self.enter_step();
            return !self.is_finished();
        }
        let Some(step) = self.steps.get(self.index) else {
            return false;
        };

        self.frame_in_step += 1;
        if self.frame_in_step >= step.frames.max(1) {
            self.index += 1;
            self.frame_in_step = 0;
            self.enter_step();
        }
        !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    fn enter_step(&mut self) {
        if let Some(step) = self.steps.get(self.index) {
            self.pending.extend(step.events.iter().copied());
        }
    }

    fn current(&self) -> Option<&ScriptedStep> {
        if self.started {
            self.steps.get(self.index)
        } else {
            None
        }
    }
}

impl InputSource for ScriptedInput {
    fn movement(&self) -> Vec2 {
        self.current()
            .map(|s| Vec2::new(s.movement.0, s.movement.1).clamp_length_max(1.0))
            .unwrap_or(Vec2::ZERO)
    }

    fn zoom_delta(&self) -> f32 {
        self.current().map(|s| s.zoom).unwrap_or(0.0)
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}
