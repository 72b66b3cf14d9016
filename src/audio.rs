//! Audio feedback using the Web Audio API
//!
//! Procedurally generated tones - no sample assets. One short cue per
//! answer outcome.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Feedback cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Correct answer
    Success,
    /// Wrong answer or timeout
    Error,
    /// Next puzzle being served after a correct answer
    LevelAdvance,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a feedback cue
    pub fn play(&self, effect: SoundEffect) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Success => self.play_success(ctx),
            SoundEffect::Error => self.play_error(ctx),
            SoundEffect::LevelAdvance => self.play_level_advance(ctx),
        }
    }

    /// Create an oscillator wired through its own gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// One flat tone starting at `at` for `dur` seconds
    fn play_tone(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        level: f32,
        at: f64,
        dur: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        gain.gain().set_value_at_time(level, at).ok();
        osc.start_with_when(at).ok();
        osc.stop_with_when(at + dur).ok();
    }

    /// Correct answer - bright blip
    fn play_success(&self, ctx: &AudioContext) {
        self.play_tone(
            ctx,
            900.0,
            OscillatorType::Triangle,
            0.07,
            ctx.current_time(),
            0.10,
        );
    }

    /// Wrong answer or timeout - low buzz
    fn play_error(&self, ctx: &AudioContext) {
        self.play_tone(
            ctx,
            160.0,
            OscillatorType::Square,
            0.05,
            ctx.current_time(),
            0.20,
        );
    }

    /// Level up - two rising notes, the second 90 ms behind
    fn play_level_advance(&self, ctx: &AudioContext) {
        let t = ctx.current_time();
        self.play_tone(ctx, 600.0, OscillatorType::Sine, 0.06, t, 0.08);
        self.play_tone(ctx, 800.0, OscillatorType::Sine, 0.06, t + 0.09, 0.10);
    }
}
