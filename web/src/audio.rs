use memora_core::{Cue, CueSink};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, AudioScheduledSourceNode, OscillatorType};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Wave {
    Sine,
    Triangle,
    Sawtooth,
}

impl Wave {
    const fn oscillator_type(self) -> OscillatorType {
        match self {
            Self::Sine => OscillatorType::Sine,
            Self::Triangle => OscillatorType::Triangle,
            Self::Sawtooth => OscillatorType::Sawtooth,
        }
    }
}

/// One enveloped oscillator note, times in seconds relative to the cue.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Tone {
    freq: f32,
    start: f64,
    duration: f64,
    peak: f32,
    wave: Wave,
}

const fn tone(freq: f32, start: f64, duration: f64, peak: f32, wave: Wave) -> Tone {
    Tone {
        freq,
        start,
        duration,
        peak,
        wave,
    }
}

const C3: f32 = 130.81;
const G4: f32 = 392.0;
const C5: f32 = 523.25;
const E5: f32 = 659.25;
const G5: f32 = 783.99;
const A5: f32 = 880.0;
const C6: f32 = 1046.5;

const FLIP: &[Tone] = &[tone(E5, 0.0, 0.08, 0.08, Wave::Sine)];

const TAP: &[Tone] = &[tone(A5, 0.0, 0.04, 0.05, Wave::Sine)];

const LEVEL_START: &[Tone] = &[
    tone(G4, 0.0, 0.15, 0.1, Wave::Sine),
    tone(C5, 0.12, 0.2, 0.1, Wave::Sine),
];

const MATCH: &[Tone] = &[
    tone(C5, 0.0, 0.5, 0.1, Wave::Sine),
    tone(E5, 0.1, 0.5, 0.1, Wave::Sine),
    tone(G5, 0.2, 0.5, 0.1, Wave::Sine),
];

const LEVEL_COMPLETE: &[Tone] = &[
    tone(C5, 0.0, 0.2, 0.15, Wave::Triangle),
    tone(E5, 0.15, 0.2, 0.15, Wave::Triangle),
    tone(G5, 0.3, 0.2, 0.15, Wave::Triangle),
    tone(C6, 0.45, 0.2, 0.15, Wave::Triangle),
    tone(G5, 0.6, 0.2, 0.15, Wave::Triangle),
    tone(C6, 0.75, 0.2, 0.15, Wave::Triangle),
    tone(C3, 0.0, 1.0, 0.08, Wave::Sawtooth),
];

const fn tones(cue: Cue) -> &'static [Tone] {
    match cue {
        Cue::Flip => FLIP,
        Cue::Tap => TAP,
        Cue::LevelStart => LEVEL_START,
        Cue::Match => MATCH,
        Cue::LevelComplete => LEVEL_COMPLETE,
    }
}

/// Synthesizes cues through a single audio context kept for the lifetime of the view.
///
/// The context is only created on the first cue, browsers refuse to start audio before a user gesture anyway.
#[derive(Debug)]
pub(crate) struct AudioCues {
    enabled: bool,
    context: Option<AudioContext>,
}

impl AudioCues {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            context: None,
        }
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn context(&mut self) -> Result<&AudioContext, JsValue> {
        let context = match self.context.take() {
            Some(context) => context,
            None => {
                log::debug!("creating audio context");
                AudioContext::new()?
            }
        };
        let context = &*self.context.insert(context);
        if context.state() == AudioContextState::Suspended {
            // the returned promise only tells us when it resumed, nothing to wait for
            let _ = context.resume()?;
        }
        Ok(context)
    }

    fn play(&mut self, cue: Cue) -> Result<(), JsValue> {
        let context = self.context()?;
        let now = context.current_time();
        for tone in tones(cue) {
            play_tone(context, now, tone)?;
        }
        Ok(())
    }
}

fn play_tone(context: &AudioContext, now: f64, tone: &Tone) -> Result<(), JsValue> {
    let start = now + tone.start;
    let end = start + tone.duration;

    let oscillator = context.create_oscillator()?;
    let gain = context.create_gain()?;
    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&context.destination())?;

    oscillator.set_type(tone.wave.oscillator_type());
    oscillator.frequency().set_value_at_time(tone.freq, start)?;

    let envelope = gain.gain();
    envelope.set_value_at_time(0.0, start)?;
    envelope.linear_ramp_to_value_at_time(tone.peak, start + 0.01)?;
    envelope.exponential_ramp_to_value_at_time(0.01, end)?;

    let source: &AudioScheduledSourceNode = &oscillator;
    source.start_with_when(start)?;
    source.stop_with_when(end)?;
    Ok(())
}

impl CueSink for AudioCues {
    fn cue(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        log::trace!("cue: {:?}", cue);
        if let Err(err) = self.play(cue) {
            log::warn!("Audio not supported or blocked: {:?}", err);
        }
    }
}
