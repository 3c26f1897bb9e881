//! Web Audio backend
//!
//! Procedurally generated sound effects - no external files needed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsValue;
use web_sys::{
    AudioContext, AudioContextState, BiquadFilterType, GainNode, OscillatorNode, OscillatorType,
};

use super::{
    AudioError, AudioSink, EXPLOSION_SECS, MusicSequencer, SoundEffect, explosion_noise,
};

impl From<JsValue> for AudioError {
    fn from(err: JsValue) -> Self {
        AudioError::Backend(format!("{:?}", err))
    }
}

/// Audio manager backed by an `AudioContext`
pub struct WebAudio {
    ctx: Option<AudioContext>,
    /// Bus for the background melody, created when music starts
    music_bus: Option<GainNode>,
    music: MusicSequencer,
    muted: bool,
    /// Source for explosion noise
    noise_rng: Pcg32,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music_bus: None,
            music: MusicSequencer::new(),
            muted: false,
            noise_rng: Pcg32::seed_from_u64(js_sys::Date::now() as u64),
        }
    }

    /// Context ready for playback, resumed if the browser suspended it
    fn context(&self) -> Result<&AudioContext, AudioError> {
        let ctx = self.ctx.as_ref().ok_or(AudioError::Unavailable)?;
        if ctx.state() == AudioContextState::Suspended {
            // Browsers require a user gesture; the returned promise is not awaited
            let _ = ctx.resume()?;
        }
        Ok(ctx)
    }

    /// Create an oscillator routed through a fresh gain node into `dest`
    fn create_osc(
        ctx: &AudioContext,
        dest: &web_sys::AudioNode,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Result<(OscillatorNode, GainNode), AudioError> {
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(dest)?;

        Ok((osc, gain))
    }

    /// Shoot - short square chirp sweeping down
    fn play_shoot(ctx: &AudioContext) -> Result<(), AudioError> {
        let (osc, gain) = Self::create_osc(ctx, &ctx.destination(), 800.0, OscillatorType::Square)?;
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(800.0, t)?;
        osc.frequency().exponential_ramp_to_value_at_time(400.0, t + 0.1)?;
        gain.gain().set_value_at_time(0.1, t)?;
        gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.1)?;

        osc.start_with_when(t)?;
        osc.stop_with_when(t + 0.1)?;
        Ok(())
    }

    /// Explosion - decaying white noise through a closing low-pass filter
    fn play_explosion(ctx: &AudioContext, rng: &mut Pcg32) -> Result<(), AudioError> {
        let rate = ctx.sample_rate();
        let mut noise = explosion_noise((rate as f64 * EXPLOSION_SECS) as usize, rng);
        let buffer = ctx.create_buffer(1, noise.len() as u32, rate)?;
        buffer.copy_to_channel(&mut noise, 0)?;

        let source = ctx.create_buffer_source()?;
        source.set_buffer(Some(&buffer));
        let filter = ctx.create_biquad_filter()?;
        filter.set_type(BiquadFilterType::Lowpass);
        let gain = ctx.create_gain()?;
        source.connect_with_audio_node(&filter)?;
        filter.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let t = ctx.current_time();
        filter.frequency().set_value_at_time(2000.0, t)?;
        filter
            .frequency()
            .exponential_ramp_to_value_at_time(100.0, t + EXPLOSION_SECS)?;
        gain.gain().set_value_at_time(0.15, t)?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + EXPLOSION_SECS)?;

        source.start_with_when(t)?;
        Ok(())
    }

    /// A sequence of sine notes with attack/decay envelopes
    fn play_phrase(
        ctx: &AudioContext,
        notes: &[f32],
        spacing: f64,
        peak: f32,
        decay: f64,
        length: f64,
    ) -> Result<(), AudioError> {
        let dest = ctx.destination();
        for (i, &freq) in notes.iter().enumerate() {
            let t = ctx.current_time() + i as f64 * spacing;
            let (osc, gain) = Self::create_osc(ctx, &dest, freq, OscillatorType::Sine)?;
            osc.frequency().set_value_at_time(freq, t)?;
            gain.gain().set_value_at_time(0.0, t)?;
            gain.gain().linear_ramp_to_value_at_time(peak, t + 0.05)?;
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + decay)?;
            osc.start_with_when(t)?;
            osc.stop_with_when(t + length)?;
        }
        Ok(())
    }

    /// One soft melody note on the music bus
    fn play_music_note(&self, freq: f32) -> Result<(), AudioError> {
        let ctx = self.context()?;
        let Some(bus) = &self.music_bus else {
            return Ok(());
        };
        let (osc, gain) = Self::create_osc(ctx, bus, freq, OscillatorType::Sine)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.0, t)?;
        gain.gain().linear_ramp_to_value_at_time(0.02, t + 0.05)?;
        gain.gain().linear_ramp_to_value_at_time(0.01, t + 0.4)?;
        gain.gain().exponential_ramp_to_value_at_time(0.001, t + 0.5)?;

        osc.start_with_when(t)?;
        osc.stop_with_when(t + 0.5)?;
        Ok(())
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        if self.muted {
            return Ok(());
        }
        // Handle clone so the noise source can be borrowed mutably
        let ctx = self.context()?.clone();
        let ctx = &ctx;
        match effect {
            SoundEffect::Shoot => Self::play_shoot(ctx),
            SoundEffect::Explosion => Self::play_explosion(ctx, &mut self.noise_rng),
            // A, G, F, D
            SoundEffect::GameOver => {
                Self::play_phrase(ctx, &[440.0, 392.0, 349.0, 294.0], 0.3, 0.1, 0.25, 0.3)
            }
            // C, E, G
            SoundEffect::GameStart => {
                Self::play_phrase(ctx, &[523.0, 659.0, 784.0], 0.1, 0.08, 0.4, 0.5)
            }
        }
    }

    fn music_start(&mut self) -> Result<(), AudioError> {
        if self.muted {
            return Ok(());
        }
        if self.music_bus.is_none() {
            let ctx = self.context()?;
            let bus = ctx.create_gain()?;
            bus.connect_with_audio_node(&ctx.destination())?;
            bus.gain().set_value_at_time(0.3, ctx.current_time())?;
            self.music_bus = Some(bus);
        }
        self.music.start();
        Ok(())
    }

    fn music_stop(&mut self) {
        self.music.stop();
        if let Some(bus) = self.music_bus.take() {
            let _ = bus.disconnect();
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.music_stop();
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn update(&mut self, now_ms: f64) -> Result<(), AudioError> {
        if self.muted {
            return Ok(());
        }
        match self.music.poll(now_ms) {
            Some(freq) => self.play_music_note(freq),
            None => Ok(()),
        }
    }
}
