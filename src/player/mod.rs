pub mod sink;

use crate::catalog::ExerciseDefinition;
use crate::error::Result;
use crate::types::{ClockId, Cue, DisplayFrame, PlayerStatus};

/// Notifications produced by player operations, fire-and-forget
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
	/// A step became current (start, advance, or resume re-render)
	PhaseEntered(DisplayFrame),
	/// Countdown moved within the current step
	Progress(DisplayFrame),
	Cue(Cue),
	Completed,
	/// Back to the pre-run display, view stays open
	Reset,
	/// Run discarded, host is about to close the view
	Stopped,
}

/// Point-in-time copy of the player state for polling displays
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerSnapshot {
	pub status: PlayerStatus,
	pub step_index: Option<usize>,
	pub seconds_remaining: u32,
	pub elapsed: u32,
	pub total: u32,
}

impl PlayerSnapshot {
	pub fn percent(&self) -> f32 {
		percent_of(self.elapsed, self.total)
	}
}

fn percent_of(elapsed: u32, total: u32) -> f32 {
	if total == 0 {
		return 0.0;
	}
	(elapsed as f32 / total as f32 * 100.0).min(100.0)
}

struct Run {
	definition: ExerciseDefinition,
	step_index: usize,
	remaining: u32,
	elapsed: u32,
	total: u32,
}

impl Run {
	fn new(definition: ExerciseDefinition) -> Self {
		let total = definition.total_duration();
		let remaining = definition.steps[0].duration;
		Self {
			definition,
			step_index: 0,
			remaining,
			elapsed: 0,
			total,
		}
	}

	fn frame(&self) -> DisplayFrame {
		let step = &self.definition.steps[self.step_index];
		DisplayFrame {
			label: step.action.clone(),
			seconds_remaining: self.remaining,
			percent: percent_of(self.elapsed, self.total),
			color: step.color.clone(),
			step_index: self.step_index,
		}
	}

	/// Display frame plus the step's own cue
	fn enter_step(&self, events: &mut Vec<PlayerEvent>) {
		events.push(PlayerEvent::PhaseEntered(self.frame()));
		if let Some(cue) = self.definition.steps[self.step_index].sound {
			events.push(PlayerEvent::Cue(cue));
		}
	}

	fn is_last_step(&self) -> bool {
		self.step_index + 1 == self.definition.steps.len()
	}

	fn is_finished(&self) -> bool {
		self.step_index >= self.definition.steps.len()
	}
}

/// Drives one exercise run through its phases on a one-second tick.
///
/// The player owns no timer. Every start/resume hands out a fresh [`ClockId`];
/// the host delivers `tick(id)` once per second for as long as [`Self::clock`]
/// returns that id. Pausing, stopping or restarting drops the id, so any tick
/// still in flight is ignored.
///
/// A step whose countdown reaches zero advances on that same tick: a 4 second
/// phase shows 4, 3, 2, 1 and the fourth tick enters the next phase.
pub struct ExercisePlayer {
	status: PlayerStatus,
	run: Option<Run>,
	clock: Option<ClockId>,
	next_clock: u64,
}

impl ExercisePlayer {
	pub fn new() -> Self {
		Self {
			status: PlayerStatus::Idle,
			run: None,
			clock: None,
			next_clock: 0,
		}
	}

	/// Begin a new run, replacing any run in flight
	pub fn start(&mut self, definition: ExerciseDefinition) -> Result<Vec<PlayerEvent>> {
		definition.validate()?;

		if self.run.is_some() {
			log::debug!("Replacing run in progress ({:?})", self.status);
		}
		log::info!(
			"Starting '{}': {} steps, {}s",
			definition.id,
			definition.steps.len(),
			definition.total_duration()
		);

		let run = Run::new(definition);
		let mut events = Vec::new();
		run.enter_step(&mut events);

		self.run = Some(run);
		self.status = PlayerStatus::Running;
		self.start_clock();
		Ok(events)
	}

	pub fn pause(&mut self) -> Vec<PlayerEvent> {
		if self.status != PlayerStatus::Running {
			log::debug!("Pause ignored in {:?}", self.status);
			return Vec::new();
		}
		self.clock = None;
		self.status = PlayerStatus::Paused;
		if let Some(run) = &self.run {
			log::debug!(
				"Paused at step {} with {}s left",
				run.step_index,
				run.remaining
			);
		}
		Vec::new()
	}

	/// Continue from the paused position. Re-emits the current phase for the
	/// display but does not replay its cue.
	pub fn resume(&mut self) -> Vec<PlayerEvent> {
		if self.status != PlayerStatus::Paused {
			log::debug!("Resume ignored in {:?}", self.status);
			return Vec::new();
		}
		let Some(run) = &self.run else {
			return Vec::new();
		};
		let frame = run.frame();
		self.status = PlayerStatus::Running;
		self.start_clock();
		vec![PlayerEvent::PhaseEntered(frame)]
	}

	/// Back to the pre-run state without starting again
	pub fn restart(&mut self) -> Vec<PlayerEvent> {
		if self.status == PlayerStatus::Idle {
			return Vec::new();
		}
		log::debug!("Restart from {:?}", self.status);
		self.discard();
		vec![PlayerEvent::Reset]
	}

	pub fn stop(&mut self) -> Vec<PlayerEvent> {
		if self.status == PlayerStatus::Idle {
			return Vec::new();
		}
		log::info!("Stopped from {:?}", self.status);
		self.discard();
		vec![PlayerEvent::Stopped]
	}

	/// Advance one second. Ticks from any clock other than the active one are dropped.
	pub fn tick(&mut self, clock: ClockId) -> Vec<PlayerEvent> {
		if self.clock != Some(clock) || self.status != PlayerStatus::Running {
			log::trace!("Dropping stale tick {:?}", clock);
			return Vec::new();
		}
		let Some(run) = self.run.as_mut() else {
			return Vec::new();
		};

		let mut events = Vec::new();
		run.remaining = run.remaining.saturating_sub(1);
		run.elapsed += 1;

		if run.remaining > 0 {
			events.push(PlayerEvent::Progress(run.frame()));
			// Pre-completion cue, only ever from a countdown tick
			if run.is_last_step() && run.remaining == 1 {
				events.push(PlayerEvent::Cue(Cue::Tick));
			}
			return events;
		}

		run.step_index += 1;
		if run.is_finished() {
			log::info!(
				"Completed '{}' after {}s",
				run.definition.id,
				run.elapsed
			);
			self.status = PlayerStatus::Completed;
			self.clock = None;
			events.push(PlayerEvent::Completed);
			events.push(PlayerEvent::Cue(Cue::Complete));
		} else {
			run.remaining = run.definition.steps[run.step_index].duration;
			log::debug!(
				"Entering step {} '{}' ({}s)",
				run.step_index,
				run.definition.steps[run.step_index].action,
				run.remaining
			);
			run.enter_step(&mut events);
		}
		events
	}

	pub fn status(&self) -> PlayerStatus {
		self.status
	}

	/// The active clock, `None` whenever the player is not running
	pub fn clock(&self) -> Option<ClockId> {
		self.clock
	}

	pub fn definition(&self) -> Option<&ExerciseDefinition> {
		self.run.as_ref().map(|r| &r.definition)
	}

	pub fn snapshot(&self) -> PlayerSnapshot {
		match &self.run {
			Some(run) => PlayerSnapshot {
				status: self.status,
				step_index: Some(run.step_index),
				seconds_remaining: run.remaining,
				elapsed: run.elapsed,
				total: run.total,
			},
			None => PlayerSnapshot::default(),
		}
	}

	fn start_clock(&mut self) {
		self.next_clock += 1;
		self.clock = Some(ClockId(self.next_clock));
	}

	fn discard(&mut self) {
		self.clock = None;
		self.run = None;
		self.status = PlayerStatus::Idle;
	}
}

impl Default for ExercisePlayer {
	fn default() -> Self {
		Self::new()
	}
}
