pub mod event;
pub mod queue;
pub mod scheduler;

pub use event::{
	CatalogEvent, ComponentResponse, Event, ExerciseEvent, SettingsEvent, SoundEvent, ViewEvent,
};
pub use queue::EventQueue;
pub use scheduler::Scheduler;

use crate::catalog::ExerciseLibrary;
use crate::exercise::ExerciseSession;
use crate::player::sink;
use crate::settings::SettingsManager;
use crate::sound::CueSynth;
use crate::view::ViewManager;
use eframe::egui;
use std::time::Instant;

pub struct Reactor {
	queue: EventQueue,
	scheduler: Scheduler,

	pub library: ExerciseLibrary,
	pub session: ExerciseSession,
	pub sound: CueSynth,
	pub view: ViewManager,
	pub settings: SettingsManager,
}

impl Reactor {
	pub fn new() -> Self {
		log::info!("Initializing all components");
		let settings = SettingsManager::load();
		let library = ExerciseLibrary::new(settings.catalog_path());

		let mut reactor = Self {
			queue: EventQueue::new(),
			scheduler: Scheduler::new(),
			library,
			session: ExerciseSession::new(),
			sound: CueSynth::new(),
			view: ViewManager::new(),
			settings,
		};

		// Push persisted preferences into the sound component
		reactor.process_response(reactor.settings.init());
		log::info!("Initialization complete");

		reactor
	}

	fn process_response(&mut self, response: ComponentResponse) {
		for e in response.events {
			self.queue.push(e);
		}
		for (e, d) in response.scheduled {
			self.scheduler.schedule(e, d);
		}
		for (e, at) in response.scheduled_at {
			self.scheduler.schedule_at(e, at);
		}
	}

	pub fn tick(&mut self, ctx: &egui::Context) {
		// Drain scheduled events
		self.scheduler.tick(&mut self.queue);

		// Process event queue until empty
		self.drain_queue();

		// Render
		let events = self.view.render(
			ctx,
			&self.library,
			&self.session,
			&self.settings,
			&self.sound,
		);

		// Process any events from rendering immediately
		for event in events {
			log::trace!("Processing render event: {:?}", event);
			let response = self.route(&event);
			self.process_response(response);
		}
		self.drain_queue();

		// Wake up for the next scheduled tick even when the user is idle
		if let Some(deadline) = self.scheduler.next_deadline() {
			ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
		}
	}

	fn drain_queue(&mut self) {
		let mut iterations = 0;
		while let Some(event) = self.queue.pop() {
			log::trace!("Processing event: {:?}", event);
			let response = self.route(&event);
			self.process_response(response);

			iterations += 1;
			if iterations > 1000 {
				log::warn!("Event loop exceeded 1000 iterations, breaking");
				break;
			}
		}
	}

	fn route(&mut self, event: &Event) -> ComponentResponse {
		match event {
			Event::Catalog(_) => self.library.handle(event),
			Event::Exercise(_) => self.session.handle(event),
			Event::Player(e) => {
				sink::dispatch(
					std::slice::from_ref(e),
					&mut self.view.display,
					&mut self.sound,
				);
				ComponentResponse::none()
			}
			Event::Sound(_) => self.sound.handle(event),
			Event::View(_) => self.view.handle(event),
			Event::Settings(_) => self.settings.handle(event),
		}
	}
}

impl eframe::App for Reactor {
	fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
		self.tick(ctx);
	}
}
