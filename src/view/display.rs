use super::ring::parse_hex_color;
use crate::player::sink::DisplaySink;
use crate::types::DisplayFrame;
use eframe::egui::Color32;

pub const READY_LABEL: &str = "Ready?";
pub const DONE_LABEL: &str = "Done! Well done";

/// What the exercise modal currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDisplay {
	pub label: String,
	pub seconds: u32,
	/// 0.0..=100.0
	pub percent: f32,
	/// `None` renders with the theme color
	pub color: Option<Color32>,
	pub completed: bool,
}

impl Default for ExerciseDisplay {
	fn default() -> Self {
		Self {
			label: READY_LABEL.to_string(),
			seconds: 0,
			percent: 0.0,
			color: None,
			completed: false,
		}
	}
}

impl DisplaySink for ExerciseDisplay {
	fn show(&mut self, frame: &DisplayFrame) {
		self.label = frame.label.clone();
		self.seconds = frame.seconds_remaining;
		self.percent = frame.percent;
		self.color = parse_hex_color(&frame.color);
		self.completed = false;
	}

	fn completed(&mut self) {
		self.label = DONE_LABEL.to_string();
		self.seconds = 0;
		self.percent = 100.0;
		self.completed = true;
	}

	fn reset(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn frame() -> DisplayFrame {
		DisplayFrame {
			label: "Exhale".into(),
			seconds_remaining: 6,
			percent: 42.0,
			color: "#8AA2A9".into(),
			step_index: 2,
		}
	}

	#[test]
	fn shows_frames_and_completion() {
		let mut display = ExerciseDisplay::default();
		display.show(&frame());
		assert_eq!(display.label, "Exhale");
		assert_eq!(display.seconds, 6);
		assert_eq!(display.color, Some(Color32::from_rgb(0x8A, 0xA2, 0xA9)));

		display.completed();
		assert!(display.completed);
		assert_eq!(display.label, DONE_LABEL);
		assert_eq!(display.percent, 100.0);
		// Last phase color stays on the finished ring
		assert!(display.color.is_some());
	}

	#[test]
	fn reset_restores_ready_state() {
		let mut display = ExerciseDisplay::default();
		display.show(&frame());
		display.completed();
		display.reset();
		assert_eq!(display, ExerciseDisplay::default());
		assert_eq!(display.label, READY_LABEL);
	}
}
