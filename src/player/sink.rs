use super::PlayerEvent;
use crate::types::{Cue, DisplayFrame};

/// Renders the current phase: label, countdown, overall progress and color
pub trait DisplaySink {
	fn show(&mut self, frame: &DisplayFrame);
	fn completed(&mut self);
	/// Back to the "ready" state shown before a run
	fn reset(&mut self);
}

/// Plays cue sounds. Never blocks the caller.
pub trait SoundSink {
	fn cue(&mut self, cue: Cue);
}

/// Route player events to their sinks
pub fn dispatch(
	events: &[PlayerEvent],
	display: &mut impl DisplaySink,
	sound: &mut impl SoundSink,
) {
	for event in events {
		match event {
			PlayerEvent::PhaseEntered(frame) | PlayerEvent::Progress(frame) => {
				display.show(frame)
			}
			PlayerEvent::Cue(cue) => sound.cue(*cue),
			PlayerEvent::Completed => display.completed(),
			PlayerEvent::Reset | PlayerEvent::Stopped => display.reset(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::ExerciseCatalog;
	use crate::player::ExercisePlayer;

	#[derive(Default)]
	struct Recorder {
		frames: Vec<(String, u32)>,
		completed: usize,
		resets: usize,
	}

	impl DisplaySink for Recorder {
		fn show(&mut self, frame: &DisplayFrame) {
			self.frames
				.push((frame.label.clone(), frame.seconds_remaining));
		}

		fn completed(&mut self) {
			self.completed += 1;
		}

		fn reset(&mut self) {
			self.resets += 1;
		}
	}

	#[derive(Default)]
	struct Cues(Vec<Cue>);

	impl SoundSink for Cues {
		fn cue(&mut self, cue: Cue) {
			self.0.push(cue);
		}
	}

	#[test]
	fn routes_a_full_run() {
		let exercise = ExerciseCatalog::builtin()
			.get("square-breathing")
			.cloned()
			.unwrap();
		let mut player = ExercisePlayer::new();
		let mut display = Recorder::default();
		let mut sound = Cues::default();

		let events = player.start(exercise).unwrap();
		dispatch(&events, &mut display, &mut sound);
		while let Some(clock) = player.clock() {
			let events = player.tick(clock);
			dispatch(&events, &mut display, &mut sound);
		}

		// One frame on entry plus one per tick
		assert_eq!(display.frames.len(), 16);
		assert_eq!(display.frames[0], ("Inhale".to_string(), 4));
		assert_eq!(display.frames[4], ("Hold".to_string(), 4));
		assert_eq!(display.completed, 1);
		assert_eq!(
			sound.0,
			[Cue::In, Cue::Hold, Cue::Out, Cue::Hold, Cue::Tick, Cue::Complete]
		);
	}

	#[test]
	fn stop_and_restart_reset_the_display() {
		let mut recorder = Recorder::default();
		let mut sound = Cues::default();
		dispatch(
			&[PlayerEvent::Reset, PlayerEvent::Stopped],
			&mut recorder,
			&mut sound,
		);
		assert_eq!(recorder.resets, 2);
		assert!(sound.0.is_empty());
	}
}
