use crate::catalog::ExerciseDefinition;
use crate::player::{ExercisePlayer, PlayerEvent, PlayerSnapshot};
use crate::reactor::{ComponentResponse, Event, ExerciseEvent};
use crate::types::{ClockId, PlayerStatus};
use std::time::{Duration, Instant};

/// Cadence of the exercise clock
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Controller behind the exercise view: one player, one selected exercise.
/// The clock is a chain of scheduled `Tick` events, one in flight at a time,
/// each due exactly one period after the previous deadline.
pub struct ExerciseSession {
	player: ExercisePlayer,
	selected: Option<ExerciseDefinition>,
}

impl ExerciseSession {
	pub fn new() -> Self {
		Self {
			player: ExercisePlayer::new(),
			selected: None,
		}
	}

	pub fn handle(&mut self, event: &Event) -> ComponentResponse {
		let Event::Exercise(event) = event else {
			return ComponentResponse::none();
		};

		match event {
			ExerciseEvent::Load { definition } => {
				// No carryover from a previous exercise
				let response = self.apply(|p| p.stop());
				log::info!("Opening '{}'", definition.id);
				self.selected = Some(definition.clone());
				response
			}
			ExerciseEvent::Start => {
				let Some(definition) = self.selected.clone() else {
					log::debug!("Start ignored: no exercise open");
					return ComponentResponse::none();
				};
				let before = self.player.clock();
				match self.player.start(definition) {
					Ok(events) => self.respond(events, before),
					Err(e) => {
						log::error!("Cannot start exercise: {}", e);
						ComponentResponse::notice(e.to_string())
					}
				}
			}
			ExerciseEvent::TogglePause => match self.player.status() {
				PlayerStatus::Running => self.apply(|p| p.pause()),
				PlayerStatus::Paused => self.apply(|p| p.resume()),
				_ => ComponentResponse::none(),
			},
			ExerciseEvent::Pause => self.apply(|p| p.pause()),
			ExerciseEvent::Resume => self.apply(|p| p.resume()),
			ExerciseEvent::Restart => self.apply(|p| p.restart()),
			ExerciseEvent::Close => {
				let response = self.apply(|p| p.stop());
				if let Some(definition) = self.selected.take() {
					log::info!("Closing '{}'", definition.id);
				}
				response
			}
			ExerciseEvent::Tick { clock, due } => {
				let accepted = self.player.clock() == Some(*clock);
				let events = self.player.tick(*clock);
				let mut response = Self::forward(events);
				if accepted && self.player.clock() == Some(*clock) {
					// Chain off the previous deadline so handling latency does not accumulate
					Self::schedule_tick(&mut response, *clock, *due + TICK_PERIOD);
				}
				response
			}
		}
	}

	/// Run a player operation and start ticking if it handed out a new clock
	fn apply(
		&mut self,
		op: impl FnOnce(&mut ExercisePlayer) -> Vec<PlayerEvent>,
	) -> ComponentResponse {
		let before = self.player.clock();
		let events = op(&mut self.player);
		self.respond(events, before)
	}

	fn respond(
		&self,
		events: Vec<PlayerEvent>,
		before: Option<ClockId>,
	) -> ComponentResponse {
		let mut response = Self::forward(events);
		match self.player.clock() {
			Some(clock) if Some(clock) != before => {
				log::debug!("Clock {:?} started", clock);
				Self::schedule_tick(&mut response, clock, Instant::now() + TICK_PERIOD);
			}
			_ => {}
		}
		response
	}

	fn schedule_tick(response: &mut ComponentResponse, clock: ClockId, due: Instant) {
		response
			.scheduled_at
			.push((Event::Exercise(ExerciseEvent::Tick { clock, due }), due));
	}

	fn forward(events: Vec<PlayerEvent>) -> ComponentResponse {
		ComponentResponse::emit_many(events.into_iter().map(Event::Player).collect())
	}

	// Accessors for ViewManager
	pub fn selected(&self) -> Option<&ExerciseDefinition> {
		self.selected.as_ref()
	}

	pub fn status(&self) -> PlayerStatus {
		self.player.status()
	}

	pub fn snapshot(&self) -> PlayerSnapshot {
		self.player.snapshot()
	}
}

impl Default for ExerciseSession {
	fn default() -> Self {
		Self::new()
	}
}
