use super::ExerciseCatalog;
use crate::reactor::{CatalogEvent, ComponentResponse, Event, ExerciseEvent};
use std::path::PathBuf;

/// Reactor component serving exercise definitions to the session
pub struct ExerciseLibrary {
	catalog: ExerciseCatalog,
	path: Option<PathBuf>,
}

impl ExerciseLibrary {
	pub fn new(path: Option<PathBuf>) -> Self {
		let catalog = ExerciseCatalog::load(path.as_deref());
		log::info!("Exercise library ready with {} exercises", catalog.len());
		Self { catalog, path }
	}

	pub fn handle(&mut self, event: &Event) -> ComponentResponse {
		match event {
			Event::Catalog(CatalogEvent::Open { id }) => match self.catalog.get(id) {
				Some(definition) => ComponentResponse::emit(Event::Exercise(ExerciseEvent::Load {
					definition: definition.clone(),
				})),
				None => {
					log::warn!("Unknown exercise '{}'", id);
					ComponentResponse::notice(format!("Exercise '{}' not found", id))
				}
			},
			Event::Catalog(CatalogEvent::Reload) => {
				self.catalog = ExerciseCatalog::load(self.path.as_deref());
				ComponentResponse::notice(format!("Loaded {} exercises", self.catalog.len()))
			}
			_ => ComponentResponse::none(),
		}
	}

	pub fn catalog(&self) -> &ExerciseCatalog {
		&self.catalog
	}
}
