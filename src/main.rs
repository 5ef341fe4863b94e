#![windows_subsystem = "windows"]

mod catalog;
mod error;
mod exercise;
mod player;
mod reactor;
mod settings;
mod sound;
mod types;
mod view;

use reactor::Reactor;

fn main() -> eframe::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let native_options = eframe::NativeOptions {
		viewport: eframe::egui::ViewportBuilder::default()
			.with_inner_size([960.0, 640.0])
			.with_min_inner_size([640.0, 480.0]),
		..Default::default()
	};

	eframe::run_native(
		"Serene",
		native_options,
		Box::new(|_cc| Ok(Box::new(Reactor::new()))),
	)
}
