use crate::catalog::{ExerciseDefinition, ExerciseLibrary};
use crate::exercise::ExerciseSession;
use crate::reactor::{
	CatalogEvent, ComponentResponse, Event, ExerciseEvent, SettingsEvent, ViewEvent,
};
use crate::settings::SettingsManager;
use crate::sound::CueSynth;
use crate::types::PlayerStatus;
use eframe::egui::{self, ScrollArea};
use std::time::{Duration, Instant};

pub mod display;
pub mod ring;

use display::ExerciseDisplay;

/// How long a notice stays in the status bar
const NOTICE_TTL: Duration = Duration::from_secs(4);

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x9C, 0xAF, 0x88);

pub struct ViewManager {
	/// Display sink fed by the exercise player
	pub display: ExerciseDisplay,
	notice: Option<(String, Instant)>,
}

impl ViewManager {
	pub fn new() -> Self {
		Self {
			display: ExerciseDisplay::default(),
			notice: None,
		}
	}

	pub fn handle(&mut self, event: &Event) -> ComponentResponse {
		match event {
			Event::View(ViewEvent::Notice { message }) => {
				self.notice = Some((message.clone(), Instant::now()));
				ComponentResponse::none()
			}
			_ => ComponentResponse::none(),
		}
	}

	/// Main render function of the whole thing
	pub fn render(
		&mut self,
		ctx: &egui::Context,
		library: &ExerciseLibrary,
		session: &ExerciseSession,
		settings: &SettingsManager,
		sound: &CueSynth,
	) -> Vec<Event> {
		let mut events = Vec::new();
		let modal_active = session.selected().is_some();

		if modal_active {
			self.handle_keyboard_input(ctx, session, &mut events);
		}

		self.render_top_panel(ctx, settings, sound, &mut events, !modal_active);
		self.render_status_bar(ctx);
		self.render_central_panel(ctx, library, &mut events, !modal_active);

		if let Some(exercise) = session.selected() {
			self.render_exercise_modal(ctx, exercise, session.status(), &mut events);
		}

		events
	}

	fn handle_keyboard_input(
		&mut self,
		ctx: &egui::Context,
		session: &ExerciseSession,
		events: &mut Vec<Event>,
	) {
		if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
			events.push(Event::Exercise(ExerciseEvent::Close));
			return;
		}

		if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
			match session.status() {
				PlayerStatus::Idle => events.push(Event::Exercise(ExerciseEvent::Start)),
				PlayerStatus::Running | PlayerStatus::Paused => {
					events.push(Event::Exercise(ExerciseEvent::TogglePause))
				}
				PlayerStatus::Completed => {}
			}
		}
	}

	fn render_top_panel(
		&mut self,
		ctx: &egui::Context,
		settings: &SettingsManager,
		sound: &CueSynth,
		events: &mut Vec<Event>,
		enabled: bool,
	) {
		egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
			if !enabled {
				ui.disable();
			}
			ui.horizontal(|ui| {
				ui.heading("Exercises");
				ui.separator();

				let prefs = settings.settings();
				let mut sound_enabled = prefs.sound_enabled;
				if ui.checkbox(&mut sound_enabled, "Sound").changed() {
					events.push(Event::Settings(SettingsEvent::ToggleSound));
				}

				if prefs.sound_enabled {
					let mut volume = prefs.volume;
					let slider = ui.add(egui::Slider::new(&mut volume, 0.0..=1.0).text("Volume"));
					// Persist once the drag is released, keyboard and click changes right away
					if slider.changed() || slider.drag_stopped() {
						events.push(Event::Settings(SettingsEvent::SetVolume {
							value: volume,
							commit: !slider.dragged(),
						}));
					}
				}

				ui.separator();

				ui.label("Output:");
				egui::ComboBox::from_id_salt("audio_device")
					.selected_text(sound.selected_device_label())
					.show_ui(ui, |ui| {
						if ui
							.selectable_label(sound.selected_device().is_none(), "Default")
							.clicked()
						{
							events.push(Event::Settings(SettingsEvent::SetOutputDevice {
								name: None,
							}));
						}
						for device_name in sound.device_names() {
							let is_selected =
								sound.selected_device().as_deref() == Some(device_name.as_str());
							if ui.selectable_label(is_selected, device_name).clicked() {
								events.push(Event::Settings(SettingsEvent::SetOutputDevice {
									name: Some(device_name.clone()),
								}));
							}
						}
					});
				let dot = if sound.is_active() {
					egui::Color32::GREEN
				} else {
					egui::Color32::RED
				};
				ui.label(egui::RichText::new("●").color(dot).size(10.0));

				ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
					if ui.button("Reload").clicked() {
						events.push(Event::Catalog(CatalogEvent::Reload));
					}
				});
			});
		});
	}

	fn render_status_bar(&mut self, ctx: &egui::Context) {
		if let Some((_, shown_at)) = &self.notice {
			if shown_at.elapsed() > NOTICE_TTL {
				self.notice = None;
			}
		}
		let Some((message, shown_at)) = &self.notice else {
			return;
		};

		egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
			ui.label(message);
		});
		ctx.request_repaint_after(NOTICE_TTL.saturating_sub(shown_at.elapsed()));
	}

	fn render_central_panel(
		&mut self,
		ctx: &egui::Context,
		library: &ExerciseLibrary,
		events: &mut Vec<Event>,
		enabled: bool,
	) {
		egui::CentralPanel::default().show(ctx, |ui| {
			if !enabled {
				ui.disable();
			}
			if library.catalog().is_empty() {
				ui.centered_and_justified(|ui| {
					ui.label("No exercises available.");
				});
				return;
			}

			ScrollArea::vertical().show(ui, |ui| {
				ui.horizontal_wrapped(|ui| {
					for exercise in library.catalog().iter() {
						Self::render_card(ui, exercise, events);
					}
				});
			});
		});
	}

	fn render_card(ui: &mut egui::Ui, exercise: &ExerciseDefinition, events: &mut Vec<Event>) {
		egui::Frame::none()
			.fill(egui::Color32::from_gray(40))
			.inner_margin(12.0)
			.rounding(6.0)
			.show(ui, |ui| {
				ui.set_width(260.0);
				ui.vertical(|ui| {
					ui.label(egui::RichText::new(&exercise.title).strong().size(18.0));
					ui.label(&exercise.description);
					let total = exercise.total_duration();
					ui.label(
						egui::RichText::new(format!(
							"{} steps, {}:{:02}",
							exercise.steps.len(),
							total / 60,
							total % 60
						))
						.weak(),
					);
					ui.add_space(6.0);
					if ui.button("Start exercise").clicked() {
						events.push(Event::Catalog(CatalogEvent::Open {
							id: exercise.id.clone(),
						}));
					}
				});
			});
	}

	/// Exercise dialog, drawn on top of everything
	fn render_exercise_modal(
		&mut self,
		ctx: &egui::Context,
		exercise: &ExerciseDefinition,
		status: PlayerStatus,
		events: &mut Vec<Event>,
	) {
		let screen_rect = ctx.screen_rect();

		// Draw semi-transparent dark overlay
		egui::Area::new(egui::Id::new("modal_backdrop"))
			.fixed_pos(screen_rect.min)
			.order(egui::Order::Foreground)
			.show(ctx, |ui| {
				let painter = ui.painter();
				painter.rect_filled(
					screen_rect,
					0.0,
					egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
				);
			});

		egui::Window::new("exercise_modal")
			.title_bar(false)
			.resizable(false)
			.collapsible(false)
			.anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
			.order(egui::Order::Foreground)
			.show(ctx, |ui| {
				ui.set_width(420.0);
				ui.vertical_centered(|ui| {
					ui.horizontal(|ui| {
						ui.heading(&exercise.title);
						ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
							if ui.button("×").clicked() {
								events.push(Event::Exercise(ExerciseEvent::Close));
							}
						});
					});
					ui.label(&exercise.description);
					ui.add_space(6.0);
					ui.label(egui::RichText::new(&exercise.instruction).weak());
					ui.add_space(12.0);

					let color = self.display.color.unwrap_or(ACCENT);
					ring::draw_progress_ring(
						ui,
						220.0,
						self.display.percent,
						color,
						&self.display.label,
						self.display.seconds,
					);
					ui.add_space(12.0);

					ui.horizontal(|ui| {
						let mut button = |ui: &mut egui::Ui, text: &str, event: ExerciseEvent| {
							if ui.button(format!("  {}  ", text)).clicked() {
								events.push(Event::Exercise(event));
							}
						};
						match status {
							PlayerStatus::Idle => button(ui, "Start exercise", ExerciseEvent::Start),
							PlayerStatus::Running => {
								button(ui, "Pause", ExerciseEvent::Pause);
								button(ui, "Stop", ExerciseEvent::Close);
							}
							PlayerStatus::Paused => {
								button(ui, "Resume", ExerciseEvent::Resume);
								button(ui, "Restart", ExerciseEvent::Restart);
								button(ui, "Stop", ExerciseEvent::Close);
							}
							PlayerStatus::Completed => {
								button(ui, "Restart", ExerciseEvent::Restart);
								button(ui, "Close", ExerciseEvent::Close);
							}
						}
					});
				});
			});
	}
}

impl Default for ViewManager {
	fn default() -> Self {
		Self::new()
	}
}
