//! Fire-and-forget sound effects.
//!
//! Games never wait on audio and never fail because of it. A terminal has
//! no synthesizer, so each sound carries the tone it stands for and the
//! sinks decide what they can actually do with it.

use crate::core::GameEvent;
use std::fmt::Debug;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One oscillator note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f64,
    pub waveform: Waveform,
    pub duration_ms: u32,
    /// Offset from the moment the sound is triggered.
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Jump,
    Score,
    LevelUp,
    Collision,
}

impl Sound {
    pub fn tones(self) -> &'static [Tone] {
        const JUMP: [Tone; 1] = [Tone {
            frequency_hz: 440.0,
            waveform: Waveform::Sine,
            duration_ms: 100,
            delay_ms: 0,
        }];
        const SCORE: [Tone; 1] = [Tone {
            frequency_hz: 880.0,
            waveform: Waveform::Sine,
            duration_ms: 150,
            delay_ms: 0,
        }];
        const LEVEL_UP: [Tone; 2] = [
            Tone {
                frequency_hz: 1318.51,
                waveform: Waveform::Square,
                duration_ms: 300,
                delay_ms: 0,
            },
            Tone {
                frequency_hz: 1567.98,
                waveform: Waveform::Square,
                duration_ms: 300,
                delay_ms: 150,
            },
        ];
        const COLLISION: [Tone; 1] = [Tone {
            frequency_hz: 110.0,
            waveform: Waveform::Sawtooth,
            duration_ms: 300,
            delay_ms: 0,
        }];
        match self {
            Sound::Jump => &JUMP,
            Sound::Score => &SCORE,
            Sound::LevelUp => &LEVEL_UP,
            Sound::Collision => &COLLISION,
        }
    }

    /// Sound for a game event, if it has one.
    pub fn for_event(event: &GameEvent) -> Option<Sound> {
        match event {
            GameEvent::Jump => Some(Sound::Jump),
            GameEvent::FoodEaten { .. } | GameEvent::PipePassed { .. } => Some(Sound::Score),
            GameEvent::LevelUp { .. } | GameEvent::BoardFilled => Some(Sound::LevelUp),
            GameEvent::Collision => Some(Sound::Collision),
            GameEvent::SpeedUp { .. } => None,
        }
    }
}

/// Something that can play sounds.
pub trait AudioSink: Debug {
    fn play(&mut self, sound: Sound);
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound) {}
}

/// Rings the terminal bell for every sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, _sound: Sound) {
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}
