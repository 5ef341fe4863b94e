use crate::catalog::ExerciseDefinition;
use crate::player::PlayerEvent;
use crate::types::ClockId;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub enum Event {
	Catalog(CatalogEvent),
	Exercise(ExerciseEvent),
	Player(PlayerEvent),
	Sound(SoundEvent),
	View(ViewEvent),
	Settings(SettingsEvent),
}

impl Event {
	pub fn priority(&self) -> Priority {
		match self {
			Event::View(ViewEvent::Notice { .. }) => Priority::Critical,
			Event::Exercise(ExerciseEvent::Tick { .. }) => Priority::High,
			Event::Exercise(_) => Priority::Normal,
			Event::Player(_) => Priority::Normal,
			Event::Catalog(_) => Priority::Normal,
			Event::Settings(_) => Priority::Normal,
			Event::Sound(_) => Priority::Low,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
	Critical = 0,
	High = 1,
	Normal = 2,
	Low = 3,
}

impl Priority {
	pub fn as_index(&self) -> usize {
		*self as usize
	}
}

#[derive(Clone, Debug)]
pub enum CatalogEvent {
	/// Open the exercise view for a catalog entry
	Open { id: String },
	/// Re-read the catalog file
	Reload,
}

#[derive(Clone, Debug)]
pub enum ExerciseEvent {
	Load { definition: ExerciseDefinition },
	Start,
	TogglePause,
	Pause,
	Resume,
	Restart,
	/// Stop the run and close the exercise view
	Close,
	/// One second elapsed on `clock`. `due` is the deadline this tick was scheduled for.
	Tick { clock: ClockId, due: Instant },
}

#[derive(Clone, Debug)]
pub enum SoundEvent {
	Configure { enabled: bool, volume: f32 },
	SetDevice { name: Option<String> },
}

#[derive(Clone, Debug)]
pub enum ViewEvent {
	/// Short status message shown in the bottom bar
	Notice { message: String },
}

#[derive(Clone, Debug)]
pub enum SettingsEvent {
	ToggleSound,
	/// `commit: false` while a slider is still being dragged
	SetVolume { value: f32, commit: bool },
	SetOutputDevice { name: Option<String> },
}

/// Response from component.handle()
#[derive(Default)]
pub struct ComponentResponse {
	/// Events to dispatch immediately
	pub events: Vec<Event>,
	/// Events to schedule (event, delay)
	pub scheduled: Vec<(Event, Duration)>,
	/// Events to schedule at a fixed deadline
	pub scheduled_at: Vec<(Event, Instant)>,
}

impl ComponentResponse {
	pub fn none() -> Self {
		Self::default()
	}

	pub fn emit(event: Event) -> Self {
		Self {
			events: vec![event],
			..Default::default()
		}
	}

	pub fn emit_many(events: Vec<Event>) -> Self {
		Self {
			events,
			..Default::default()
		}
	}

	pub fn schedule(event: Event, delay: Duration) -> Self {
		Self {
			scheduled: vec![(event, delay)],
			..Default::default()
		}
	}

	pub fn notice(message: impl Into<String>) -> Self {
		Self::emit(Event::View(ViewEvent::Notice {
			message: message.into(),
		}))
	}
}
