use serde::{Deserialize, Serialize};
use std::fmt;

/// Audio cue tag attached to a phase, consumed by the sound sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
	In,
	Hold,
	Out,
	Step,
	Tick,
	Complete,
}

impl Cue {
	pub fn as_str(&self) -> &'static str {
		match self {
			Cue::In => "in",
			Cue::Hold => "hold",
			Cue::Out => "out",
			Cue::Step => "step",
			Cue::Tick => "tick",
			Cue::Complete => "complete",
		}
	}
}

impl fmt::Display for Cue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Exercise player lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
	#[default]
	Idle,
	Running,
	Paused,
	Completed,
}

/// Identifies one started tick clock. Ticks carrying a stale id are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockId(pub u64);

/// What the display shows on phase entry and on every tick
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
	pub label: String,
	pub seconds_remaining: u32,
	pub percent: f32,
	pub color: String,
	pub step_index: usize,
}
