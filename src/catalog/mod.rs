pub mod library;

pub use library::ExerciseLibrary;

use crate::error::{ExerciseError, Result};
use crate::types::Cue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default ring color when a phase carries no hint
pub const DEFAULT_COLOR: &str = "#9CAF88";

/// One timed segment of an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
	pub action: String,
	pub duration: u32,
	#[serde(default = "default_color")]
	pub color: String,
	#[serde(default)]
	pub sound: Option<Cue>,
}

fn default_color() -> String {
	DEFAULT_COLOR.to_string()
}

impl Phase {
	pub fn new(action: &str, duration: u32, color: &str, sound: Cue) -> Self {
		Self {
			action: action.to_string(),
			duration,
			color: color.to_string(),
			sound: Some(sound),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
	pub id: String,
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub instruction: String,
	pub steps: Vec<Phase>,
}

impl ExerciseDefinition {
	/// Check that there is at least one step and that no step lasts zero seconds
	pub fn validate(&self) -> Result<()> {
		if self.steps.is_empty() {
			return Err(ExerciseError::invalid(&self.id, "no steps"));
		}
		if let Some((index, _)) = self
			.steps
			.iter()
			.enumerate()
			.find(|(_, step)| step.duration == 0)
		{
			return Err(ExerciseError::invalid(
				&self.id,
				format!("step {} has zero duration", index),
			));
		}
		if self
			.steps
			.iter()
			.try_fold(0u32, |total, step| total.checked_add(step.duration))
			.is_none()
		{
			return Err(ExerciseError::invalid(&self.id, "total duration is too long"));
		}
		Ok(())
	}

	/// Saturates for definitions that never passed `validate`
	pub fn total_duration(&self) -> u32 {
		self.steps
			.iter()
			.fold(0u32, |total, step| total.saturating_add(step.duration))
	}
}

/// Ordered set of exercises keyed by id
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
	exercises: IndexMap<String, ExerciseDefinition>,
}

impl ExerciseCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// The three exercises shipped with the application
	pub fn builtin() -> Self {
		const SAGE: &str = "#9CAF88";
		const LAVENDER: &str = "#B4A7D6";
		const SLATE: &str = "#8AA2A9";

		let mut catalog = Self::new();
		catalog.insert(ExerciseDefinition {
			id: "breathing-478".into(),
			title: "4-7-8 Breathing".into(),
			description: "A powerful technique for quick anxiety relief".into(),
			instruction: "Inhale through the nose for 4 seconds, hold the breath for 7 seconds, \
				then exhale slowly through the mouth for 8 seconds"
				.into(),
			steps: vec![
				Phase::new("Inhale", 4, SAGE, Cue::In),
				Phase::new("Hold", 7, LAVENDER, Cue::Hold),
				Phase::new("Exhale", 8, SLATE, Cue::Out),
			],
		});
		catalog.insert(ExerciseDefinition {
			id: "square-breathing".into(),
			title: "Box Breathing".into(),
			description: "Helps you calm down and focus".into(),
			instruction: "Breathe around a square: inhale, hold, exhale, hold. \
				Four seconds for each side."
				.into(),
			steps: vec![
				Phase::new("Inhale", 4, SAGE, Cue::In),
				Phase::new("Hold", 4, LAVENDER, Cue::Hold),
				Phase::new("Exhale", 4, SLATE, Cue::Out),
				Phase::new("Hold", 4, LAVENDER, Cue::Hold),
			],
		});
		catalog.insert(ExerciseDefinition {
			id: "grounding-54321".into(),
			title: "5-4-3-2-1 Grounding".into(),
			description: "Quickly brings you back to the here and now during panic".into(),
			instruction: "Name in turn: 5 things you see, 4 you can touch, 3 sounds, \
				2 smells, 1 taste"
				.into(),
			steps: vec![
				Phase::new("5 things you can see", 30, SAGE, Cue::Step),
				Phase::new("4 things you can touch", 24, LAVENDER, Cue::Step),
				Phase::new("3 sounds you can hear", 18, SLATE, Cue::Step),
				Phase::new("2 things you can smell", 12, SAGE, Cue::Step),
				Phase::new("1 thing you can taste", 6, LAVENDER, Cue::Complete),
			],
		});
		catalog
	}

	/// Parse a JSON array of definitions. Invalid entries are skipped.
	pub fn from_json(text: &str) -> Result<Self> {
		let definitions: Vec<ExerciseDefinition> = serde_json::from_str(text)?;
		let mut catalog = Self::new();
		for definition in definitions {
			match definition.validate() {
				Ok(()) => catalog.insert(definition),
				Err(e) => log::warn!("Skipping exercise: {}", e),
			}
		}
		Ok(catalog)
	}

	pub fn from_file(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		Self::from_json(&text)
	}

	/// Built-ins overlaid with the catalog file at `path`, if any
	pub fn load(path: Option<&Path>) -> Self {
		let mut catalog = Self::builtin();
		let Some(path) = path else {
			return catalog;
		};

		match Self::from_file(path) {
			Ok(extra) => {
				log::info!(
					"Loaded {} exercises from {}",
					extra.len(),
					path.display()
				);
				catalog.merge(extra);
			}
			Err(e) => {
				log::warn!(
					"Failed to load catalog {}: {}, using built-ins",
					path.display(),
					e
				);
			}
		}
		catalog
	}

	/// Same id replaces in place, new ids are appended
	pub fn merge(&mut self, other: ExerciseCatalog) {
		for (_, definition) in other.exercises {
			self.insert(definition);
		}
	}

	pub fn insert(&mut self, definition: ExerciseDefinition) {
		self.exercises.insert(definition.id.clone(), definition);
	}

	pub fn get(&self, id: &str) -> Option<&ExerciseDefinition> {
		self.exercises.get(id)
	}

	pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
		self.exercises.values()
	}

	pub fn len(&self) -> usize {
		self.exercises.len()
	}

	pub fn is_empty(&self) -> bool {
		self.exercises.is_empty()
	}
}
