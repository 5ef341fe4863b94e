pub mod tone;

use crate::player::sink::SoundSink;
use crate::reactor::{ComponentResponse, Event, SoundEvent};
use crate::types::Cue;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc;
use tone::{Mixer, Tone};

/// Tone handed to the audio callback, volume already resolved
struct ToneRequest {
	tone: Tone,
	volume: f32,
}

/// Live output stream plus the sender feeding its callback
struct Output {
	/// Must be kept alive for playback to continue
	_stream: cpal::Stream,
	sender: mpsc::Sender<ToneRequest>,
}

/// Renders cue tags as short beeps on the system output device
pub struct CueSynth {
	output: Option<Output>,
	/// Available device names
	device_names: Vec<String>,
	/// Currently selected device name (None = default)
	selected_device: Option<String>,
	enabled: bool,
	volume: f32,
}

impl CueSynth {
	pub fn new() -> Self {
		let device_names = Self::enumerate_devices();
		let output = Self::start_stream_default();

		Self {
			output,
			device_names,
			selected_device: None,
			enabled: true,
			volume: 0.8,
		}
	}

	/// Enumerate all available output devices
	fn enumerate_devices() -> Vec<String> {
		let host = cpal::default_host();
		let mut names = Vec::new();
		if let Ok(devices) = host.output_devices() {
			for device in devices {
				if let Ok(name) = device.name() {
					names.push(name);
				}
			}
		}
		log::info!("Enumerated {} audio output devices", names.len());
		for name in &names {
			log::debug!("  Audio device: {}", name);
		}
		names
	}

	fn start_stream_default() -> Option<Output> {
		let host = cpal::default_host();
		let device = match host.default_output_device() {
			Some(d) => {
				let name = d.name().unwrap_or_else(|_| "unknown".into());
				log::info!("Using default audio output: {}", name);
				d
			}
			None => {
				log::warn!("No default audio output device found, cues are muted");
				return None;
			}
		};
		Self::start_stream_on_device(&device)
	}

	fn start_stream_named(name: &str) -> Option<Output> {
		let host = cpal::default_host();
		let devices = match host.output_devices() {
			Ok(d) => d,
			Err(e) => {
				log::error!("Failed to enumerate devices: {}", e);
				return None;
			}
		};
		for device in devices {
			if let Ok(dev_name) = device.name() {
				if dev_name == name {
					log::info!("Using audio device: {}", name);
					return Self::start_stream_on_device(&device);
				}
			}
		}
		log::warn!("Audio device '{}' not found, falling back to default", name);
		Self::start_stream_default()
	}

	fn start_stream_on_device(device: &cpal::Device) -> Option<Output> {
		let supported = match device.default_output_config() {
			Ok(c) => c,
			Err(e) => {
				log::error!("Failed to get output config: {}", e);
				return None;
			}
		};

		log::info!(
			"Audio config: {} channels, {}Hz, {:?}",
			supported.channels(),
			supported.sample_rate().0,
			supported.sample_format()
		);

		let (sender, receiver) = mpsc::channel();
		let config = supported.config();
		let built = match supported.sample_format() {
			cpal::SampleFormat::F32 => Self::build_stream::<f32>(device, &config, receiver),
			cpal::SampleFormat::I16 => Self::build_stream::<i16>(device, &config, receiver),
			cpal::SampleFormat::U16 => Self::build_stream::<u16>(device, &config, receiver),
			other => {
				log::error!("Unsupported output sample format: {:?}", other);
				return None;
			}
		};

		let stream = match built {
			Ok(s) => s,
			Err(e) => {
				log::error!("Failed to build audio stream: {}", e);
				return None;
			}
		};

		if let Err(e) = stream.play() {
			log::error!("Failed to start audio stream: {}", e);
			return None;
		}

		Some(Output {
			_stream: stream,
			sender,
		})
	}

	fn build_stream<T>(
		device: &cpal::Device,
		config: &cpal::StreamConfig,
		receiver: mpsc::Receiver<ToneRequest>,
	) -> Result<cpal::Stream, cpal::BuildStreamError>
	where
		T: cpal::SizedSample + cpal::FromSample<f32>,
	{
		let channels = config.channels as usize;
		let mut mixer = Mixer::new(config.sample_rate.0 as f32);

		device.build_output_stream(
			config,
			move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
				while let Ok(request) = receiver.try_recv() {
					mixer.trigger(request.tone, request.volume);
				}
				// Same mono signal on every channel
				for frame in data.chunks_mut(channels) {
					let value = <T as cpal::Sample>::from_sample(mixer.next_sample());
					for sample in frame.iter_mut() {
						*sample = value;
					}
				}
			},
			move |err| {
				log::error!("Audio stream error: {}", err);
			},
			None,
		)
	}

	pub fn handle(&mut self, event: &Event) -> ComponentResponse {
		match event {
			Event::Sound(SoundEvent::Configure { enabled, volume }) => {
				self.enabled = *enabled;
				self.volume = volume.clamp(0.0, 1.0);
				log::debug!("Cues enabled={} volume={:.2}", self.enabled, self.volume);
				ComponentResponse::none()
			}
			Event::Sound(SoundEvent::SetDevice { name }) => {
				log::info!("Switching audio output to: {:?}", name);
				// Drop old stream
				self.output = None;
				self.selected_device = name.clone();

				self.output = match name.as_deref() {
					Some(device_name) => Self::start_stream_named(device_name),
					None => Self::start_stream_default(),
				};

				// Re-enumerate in case device list changed
				self.device_names = Self::enumerate_devices();

				if self.output.is_none() {
					return ComponentResponse::notice("Audio output unavailable, cues are muted");
				}
				ComponentResponse::none()
			}
			_ => ComponentResponse::none(),
		}
	}

	// Accessors for UI
	pub fn device_names(&self) -> &[String] {
		&self.device_names
	}

	pub fn selected_device(&self) -> &Option<String> {
		&self.selected_device
	}

	pub fn selected_device_label(&self) -> &str {
		self.selected_device.as_deref().unwrap_or("Default")
	}

	pub fn is_active(&self) -> bool {
		self.output.is_some()
	}
}

impl SoundSink for CueSynth {
	fn cue(&mut self, cue: Cue) {
		if !self.enabled {
			return;
		}
		let Some(output) = &self.output else {
			log::trace!("No audio output, dropping cue {}", cue);
			return;
		};
		log::trace!("Cue {}", cue);
		for tone in tone::tones_for(cue) {
			let request = ToneRequest {
				tone,
				volume: self.volume,
			};
			if output.sender.send(request).is_err() {
				log::warn!("Audio callback gone, dropping cue {}", cue);
				break;
			}
		}
	}
}

impl Default for CueSynth {
	fn default() -> Self {
		Self::new()
	}
}
