use crate::types::Cue;
use std::f32::consts::TAU;

/// Level every tone decays to by the end of its duration
const FLOOR_GAIN: f32 = 0.01;

/// Notes of the completion arpeggio (C5, E5, G5)
const COMPLETE_CHORD: [f32; 3] = [523.25, 659.25, 783.99];

/// A short sine beep with an exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
	pub frequency: f32,
	pub gain: f32,
	/// Seconds before the tone starts
	pub delay: f32,
	/// Seconds from start until the envelope reaches the floor
	pub duration: f32,
}

impl Tone {
	const fn beep(frequency: f32, gain: f32, duration: f32) -> Self {
		Self {
			frequency,
			gain,
			delay: 0.0,
			duration,
		}
	}
}

/// The tones that make up one cue
pub fn tones_for(cue: Cue) -> Vec<Tone> {
	match cue {
		Cue::In => vec![Tone::beep(400.0, 0.1, 0.3)],
		Cue::Out => vec![Tone::beep(300.0, 0.1, 0.4)],
		Cue::Hold => vec![Tone::beep(350.0, 0.05, 0.2)],
		Cue::Step => vec![Tone::beep(500.0, 0.15, 0.2)],
		Cue::Tick => vec![Tone::beep(800.0, 0.05, 0.1)],
		Cue::Complete => COMPLETE_CHORD
			.iter()
			.enumerate()
			.map(|(i, &frequency)| Tone {
				frequency,
				gain: 0.1,
				delay: i as f32 * 0.1,
				duration: 0.5,
			})
			.collect(),
	}
}

/// A tone being rendered at a given sample rate
#[derive(Debug, Clone)]
pub struct Voice {
	tone: Tone,
	volume: f32,
	sample_rate: f32,
	position: u64,
}

impl Voice {
	pub fn new(tone: Tone, volume: f32, sample_rate: f32) -> Self {
		Self {
			tone,
			volume,
			sample_rate,
			position: 0,
		}
	}

	pub fn next_sample(&mut self) -> f32 {
		let t = self.position as f32 / self.sample_rate;
		self.position += 1;

		let local = t - self.tone.delay;
		if local < 0.0 || local >= self.tone.duration {
			return 0.0;
		}
		let envelope = self.tone.gain
			* (FLOOR_GAIN / self.tone.gain).powf(local / self.tone.duration);
		(TAU * self.tone.frequency * local).sin() * envelope * self.volume
	}

	pub fn is_finished(&self) -> bool {
		self.position as f32 / self.sample_rate >= self.tone.delay + self.tone.duration
	}
}

/// Voices the mixer keeps at once; the oldest is dropped beyond this
pub const MAX_VOICES: usize = 16;

/// Sums active voices into a mono signal, dropping finished ones.
/// Never allocates after construction, so it is safe on the audio thread.
pub struct Mixer {
	voices: Vec<Voice>,
	sample_rate: f32,
}

impl Mixer {
	pub fn new(sample_rate: f32) -> Self {
		Self {
			voices: Vec::with_capacity(MAX_VOICES),
			sample_rate,
		}
	}

	pub fn trigger(&mut self, tone: Tone, volume: f32) {
		if self.voices.len() >= MAX_VOICES {
			self.voices.remove(0);
		}
		self.voices.push(Voice::new(tone, volume, self.sample_rate));
	}

	pub fn next_sample(&mut self) -> f32 {
		if self.voices.is_empty() {
			return 0.0;
		}
		let sum: f32 = self.voices.iter_mut().map(|v| v.next_sample()).sum();
		self.voices.retain(|v| !v.is_finished());
		sum.clamp(-1.0, 1.0)
	}

	pub fn active_voices(&self) -> usize {
		self.voices.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	const RATE: f32 = 8_000.0;

	#[test]
	fn every_cue_has_tones() {
		for cue in [Cue::In, Cue::Hold, Cue::Out, Cue::Step, Cue::Tick] {
			assert_eq!(tones_for(cue).len(), 1, "{}", cue);
		}
		let chord = tones_for(Cue::Complete);
		assert_eq!(chord.len(), 3);
		assert_relative_eq!(chord[2].delay, 0.2);
	}

	#[test]
	fn envelope_decays_from_gain_to_floor() {
		let tone = Tone::beep(400.0, 0.1, 0.3);
		let mut voice = Voice::new(tone, 1.0, RATE);
		let samples: Vec<f32> = (0..2400).map(|_| voice.next_sample()).collect();

		let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
		assert!(peak <= 0.1 + f32::EPSILON);
		assert!(peak > 0.05);

		let tail = samples[samples.len() - 100..]
			.iter()
			.fold(0.0f32, |m, s| m.max(s.abs()));
		assert!(tail < 0.012);
		assert!(voice.is_finished());
		assert_eq!(voice.next_sample(), 0.0);
	}

	#[test]
	fn delayed_tone_starts_silent() {
		let tone = Tone {
			frequency: 500.0,
			gain: 0.1,
			delay: 0.1,
			duration: 0.2,
		};
		let mut voice = Voice::new(tone, 1.0, RATE);
		for _ in 0..(0.1 * RATE) as usize - 1 {
			assert_eq!(voice.next_sample(), 0.0);
		}
		assert!(!voice.is_finished());
	}

	#[test]
	fn volume_scales_output() {
		let tone = Tone::beep(300.0, 0.1, 0.4);
		let mut loud = Voice::new(tone, 1.0, RATE);
		let mut quiet = Voice::new(tone, 0.5, RATE);
		for _ in 0..50 {
			assert_relative_eq!(quiet.next_sample(), loud.next_sample() * 0.5, epsilon = 1e-6);
		}
	}

	#[test]
	fn mixer_drops_finished_voices() {
		let mut mixer = Mixer::new(RATE);
		assert_eq!(mixer.next_sample(), 0.0);

		for tone in tones_for(Cue::Complete) {
			mixer.trigger(tone, 1.0);
		}
		assert_eq!(mixer.active_voices(), 3);

		// First note ends at 0.5s, last at 0.7s
		for _ in 0..(0.55 * RATE) as usize {
			mixer.next_sample();
		}
		assert_eq!(mixer.active_voices(), 2);
		for _ in 0..(0.2 * RATE) as usize {
			mixer.next_sample();
		}
		assert_eq!(mixer.active_voices(), 0);
	}

	#[test]
	fn mixer_caps_voices_without_growing() {
		let mut mixer = Mixer::new(RATE);
		let capacity = mixer.voices.capacity();
		assert!(capacity >= MAX_VOICES);

		let loud = Tone::beep(500.0, 0.15, 0.2);
		for _ in 0..MAX_VOICES + 5 {
			mixer.trigger(loud, 1.0);
		}
		assert_eq!(mixer.active_voices(), MAX_VOICES);
		assert_eq!(mixer.voices.capacity(), capacity);
		// Summed voices are clamped to full scale
		for _ in 0..40 {
			assert!(mixer.next_sample().abs() <= 1.0);
		}
	}
}
