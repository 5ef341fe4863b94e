use crate::reactor::{ComponentResponse, Event, SettingsEvent, SoundEvent};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User preferences persisted between launches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub sound_enabled: bool,
	/// Master cue volume, 0.0..=1.0
	pub volume: f32,
	/// Output device name, `None` for the system default
	pub output_device: Option<String>,
	/// Extra exercises overlaid on the built-in ones
	pub catalog_path: Option<PathBuf>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			sound_enabled: true,
			volume: 0.8,
			output_device: None,
			catalog_path: None,
		}
	}
}

impl Settings {
	pub fn load_from(path: &Path) -> anyhow::Result<Self> {
		let text = std::fs::read_to_string(path)
			.with_context(|| format!("reading {}", path.display()))?;
		let mut settings: Settings =
			toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
		settings.volume = settings.volume.clamp(0.0, 1.0);
		Ok(settings)
	}

	pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let text = toml::to_string_pretty(self)?;
		std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
		Ok(())
	}
}

/// Platform config location, e.g. `~/.config/serene/settings.toml`
pub fn default_path() -> Option<PathBuf> {
	directories::ProjectDirs::from("org", "Serene", "serene")
		.map(|dirs| dirs.config_dir().join("settings.toml"))
}

pub struct SettingsManager {
	settings: Settings,
	path: Option<PathBuf>,
}

impl SettingsManager {
	/// Load from the platform config directory
	pub fn load() -> Self {
		Self::with_path(default_path())
	}

	pub fn with_path(path: Option<PathBuf>) -> Self {
		let settings = match &path {
			Some(p) if p.exists() => match Settings::load_from(p) {
				Ok(s) => {
					log::info!("Loaded settings from {}", p.display());
					s
				}
				Err(e) => {
					log::warn!("Failed to load settings: {:#}, using defaults", e);
					Settings::default()
				}
			},
			Some(p) => {
				log::info!("No settings at {}, using defaults", p.display());
				Settings::default()
			}
			None => {
				log::warn!("No config directory available, settings will not persist");
				Settings::default()
			}
		};
		Self { settings, path }
	}

	/// Push the loaded preferences to the cue synth
	pub fn init(&self) -> ComponentResponse {
		let mut events = vec![self.sound_config()];
		if self.settings.output_device.is_some() {
			events.push(Event::Sound(SoundEvent::SetDevice {
				name: self.settings.output_device.clone(),
			}));
		}
		ComponentResponse::emit_many(events)
	}

	pub fn handle(&mut self, event: &Event) -> ComponentResponse {
		match event {
			Event::Settings(SettingsEvent::ToggleSound) => {
				self.settings.sound_enabled = !self.settings.sound_enabled;
				log::info!("Sound enabled: {}", self.settings.sound_enabled);
				self.save();
				ComponentResponse::emit(self.sound_config())
			}
			Event::Settings(SettingsEvent::SetVolume { value, commit }) => {
				self.settings.volume = value.clamp(0.0, 1.0);
				if *commit {
					self.save();
				}
				ComponentResponse::emit(self.sound_config())
			}
			Event::Settings(SettingsEvent::SetOutputDevice { name }) => {
				self.settings.output_device = name.clone();
				self.save();
				ComponentResponse::emit(Event::Sound(SoundEvent::SetDevice { name: name.clone() }))
			}
			_ => ComponentResponse::none(),
		}
	}

	fn sound_config(&self) -> Event {
		Event::Sound(SoundEvent::Configure {
			enabled: self.settings.sound_enabled,
			volume: self.settings.volume,
		})
	}

	fn save(&self) {
		let Some(path) = &self.path else {
			return;
		};
		match self.settings.save_to(path) {
			Ok(()) => log::debug!("Saved settings to {}", path.display()),
			Err(e) => log::error!("Failed to save settings: {:#}", e),
		}
	}

	// Accessors for ViewManager/UI
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn catalog_path(&self) -> Option<PathBuf> {
		self.settings.catalog_path.clone()
	}
}

impl Default for SettingsManager {
	fn default() -> Self {
		Self::with_path(None)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn changes_persist_across_launches() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("settings.toml");

		let mut manager = SettingsManager::with_path(Some(path.clone()));
		assert_eq!(manager.settings(), &Settings::default());

		let response = manager.handle(&Event::Settings(SettingsEvent::ToggleSound));
		assert!(matches!(
			response.events[0],
			Event::Sound(SoundEvent::Configure { enabled: false, .. })
		));
		manager.handle(&Event::Settings(SettingsEvent::SetVolume {
			value: 1.7,
			commit: true,
		}));
		manager.handle(&Event::Settings(SettingsEvent::SetOutputDevice {
			name: Some("Headphones".into()),
		}));

		let reloaded = SettingsManager::with_path(Some(path));
		let settings = reloaded.settings();
		assert!(!settings.sound_enabled);
		assert_relative_eq!(settings.volume, 1.0);
		assert_eq!(settings.output_device.as_deref(), Some("Headphones"));

		// Device is re-applied on startup
		assert_eq!(reloaded.init().events.len(), 2);
	}

	#[test]
	fn volume_is_saved_only_on_commit() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("settings.toml");
		let mut manager = SettingsManager::with_path(Some(path.clone()));

		for value in [0.7, 0.6, 0.5] {
			let response = manager.handle(&Event::Settings(SettingsEvent::SetVolume {
				value,
				commit: false,
			}));
			// The synth still follows the slider live
			assert!(matches!(
				response.events[0],
				Event::Sound(SoundEvent::Configure { .. })
			));
		}
		assert_relative_eq!(manager.settings().volume, 0.5);
		assert!(!path.exists());

		manager.handle(&Event::Settings(SettingsEvent::SetVolume {
			value: 0.4,
			commit: true,
		}));
		let reloaded = SettingsManager::with_path(Some(path));
		assert_relative_eq!(reloaded.settings().volume, 0.4);
	}

	#[test]
	fn partial_file_fills_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("settings.toml");
		std::fs::write(&path, "volume = 0.25\ncatalog_path = \"/tmp/extra.json\"\n").unwrap();

		let manager = SettingsManager::with_path(Some(path));
		assert!(manager.settings().sound_enabled);
		assert_relative_eq!(manager.settings().volume, 0.25);
		assert_eq!(
			manager.catalog_path(),
			Some(PathBuf::from("/tmp/extra.json"))
		);
		assert_eq!(manager.init().events.len(), 1);
	}

	#[test]
	fn malformed_file_falls_back_to_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("settings.toml");
		std::fs::write(&path, "volume = \"loud\"").unwrap();

		let manager = SettingsManager::with_path(Some(path));
		assert_eq!(manager.settings(), &Settings::default());
	}
}
