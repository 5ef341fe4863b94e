/// Errors raised while loading or starting an exercise
#[derive(thiserror::Error, Debug)]
pub enum ExerciseError {
	/// Definition violates the step invariants (non-empty, every duration >= 1)
	#[error("Invalid definition '{id}': {reason}")]
	InvalidDefinition { id: String, reason: String },

	/// Catalog file could not be read
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// Catalog file is not a valid JSON definition list
	#[error("Parse error: {0}")]
	Parse(#[from] serde_json::Error),
}

impl ExerciseError {
	pub fn invalid(id: &str, reason: impl Into<String>) -> Self {
		ExerciseError::InvalidDefinition {
			id: id.to_string(),
			reason: reason.into(),
		}
	}
}

pub type Result<T> = std::result::Result<T, ExerciseError>;
