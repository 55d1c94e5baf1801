//! Candidate validation against the collection
//!
//! Rules run in a fixed order and the first failure wins:
//! id present, id numeric, id unique (ignoring the entity being edited),
//! name present, description present, active present.

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::programme::{Programme, ProgrammeDraft};
use crate::store::CollectionStore;

/// User-correctable rejection of a candidate programme
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ID is required.")]
    IdRequired,

    #[error("ID must be a number.")]
    IdNotNumeric,

    #[error("ID must be unique. Conflicts with \"{conflicting_name}\".")]
    IdNotUnique { conflicting_name: String },

    #[error("Name is required.")]
    NameRequired,

    #[error("Description is required.")]
    DescriptionRequired,

    /// `active` missing means the normalizer did not default it
    #[error("Internal Error")]
    ActiveMissing,
}

/// Outcome in the shape handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub is_valid: bool,
    pub message: String,
}

impl Validation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }
}

impl From<&ValidationError> for Validation {
    fn from(err: &ValidationError) -> Self {
        Self {
            is_valid: false,
            message: err.to_string(),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Validate `candidate` and build the entity it describes
///
/// `excluding_id` is the id of the entity being edited; it does not count
/// as a uniqueness conflict.
pub fn check(
    candidate: &ProgrammeDraft,
    collection: &CollectionStore,
    excluding_id: Option<i64>,
) -> Result<Programme, ValidationError> {
    let id_text = present(&candidate.id).ok_or(ValidationError::IdRequired)?;
    let id = id_text
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::IdNotNumeric)?;

    if excluding_id != Some(id) {
        if let Some(existing) = collection.get(id) {
            return Err(ValidationError::IdNotUnique {
                conflicting_name: existing.name.clone(),
            });
        }
    }

    let name = present(&candidate.name).ok_or(ValidationError::NameRequired)?;
    let description =
        present(&candidate.description).ok_or(ValidationError::DescriptionRequired)?;

    let active = match candidate.active {
        Some(active) => active,
        None => {
            error!(id, "Candidate programme reached validation without an active flag");
            return Err(ValidationError::ActiveMissing);
        }
    };

    Ok(Programme {
        id,
        slug: candidate.slug.clone().unwrap_or_default(),
        name: name.to_string(),
        description: description.to_string(),
        active,
        image_url: candidate.image_url.clone(),
    })
}

/// [`check`] reduced to `{isValid, message}`
pub fn validate(
    candidate: &ProgrammeDraft,
    collection: &CollectionStore,
    excluding_id: Option<i64>,
) -> Validation {
    match check(candidate, collection, excluding_id) {
        Ok(_) => Validation::valid(),
        Err(err) => Validation::from(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn programme(id: i64, name: &str) -> Programme {
        Programme {
            id,
            slug: String::new(),
            name: name.to_string(),
            description: "d".to_string(),
            active: true,
            image_url: None,
        }
    }

    fn message(
        candidate: &ProgrammeDraft,
        collection: &CollectionStore,
        excluding: Option<i64>,
    ) -> String {
        validate(candidate, collection, excluding).message
    }

    #[test]
    fn test_missing_id() {
        let empty = CollectionStore::new();
        let draft = ProgrammeDraft { id: None, ..ProgrammeDraft::new("", "n", "d", true) };
        assert_eq!(message(&draft, &empty, None), "ID is required.");

        let draft = ProgrammeDraft::new("", "n", "d", true);
        assert_eq!(message(&draft, &empty, None), "ID is required.");
    }

    #[test]
    fn test_non_numeric_id() {
        let draft = ProgrammeDraft::new("abc", "n", "d", true);
        assert_eq!(message(&draft, &CollectionStore::new(), None), "ID must be a number.");
    }

    #[test]
    fn test_accepts_complete_candidate() {
        let draft = ProgrammeDraft::new("5", "Show", "d", false);
        let result = validate(&draft, &CollectionStore::new(), None);
        assert_eq!(result, Validation::valid());

        let built = check(&draft, &CollectionStore::new(), None).unwrap();
        assert_eq!(built.id, 5);
        assert!(!built.active);
    }

    #[test]
    fn test_duplicate_id_names_conflict() {
        let collection: CollectionStore =
            [programme(5, "Five"), programme(6, "Six")].into_iter().collect();
        let draft = ProgrammeDraft::new("6", "Five", "d", true);
        let msg = message(&draft, &collection, Some(5));
        assert_eq!(msg, "ID must be unique. Conflicts with \"Six\".");
    }

    #[test]
    fn test_self_exclusion() {
        let collection: CollectionStore =
            [programme(5, "Five"), programme(6, "Six")].into_iter().collect();
        let draft = ProgrammeDraft::new("5", "Five renamed", "d", true);
        assert!(validate(&draft, &collection, Some(5)).is_valid);
        assert!(!validate(&draft, &collection, None).is_valid);
    }

    #[test]
    fn test_rule_order_short_circuits() {
        let collection: CollectionStore = [programme(1, "One")].into_iter().collect();
        // Everything wrong: uniqueness is reported before missing name
        let draft = ProgrammeDraft {
            id: Some("1".to_string()),
            slug: None,
            name: None,
            description: None,
            active: None,
            image_url: None,
        };
        assert_eq!(
            message(&draft, &collection, None),
            "ID must be unique. Conflicts with \"One\"."
        );
        assert_eq!(message(&draft, &collection, Some(1)), "Name is required.");
    }

    #[test]
    fn test_description_required() {
        let draft = ProgrammeDraft::new("2", "n", "", true);
        assert_eq!(message(&draft, &CollectionStore::new(), None), "Description is required.");
    }

    #[test]
    fn test_missing_active_is_internal_error() {
        let draft = ProgrammeDraft { active: None, ..ProgrammeDraft::new("2", "n", "d", true) };
        assert_eq!(
            check(&draft, &CollectionStore::new(), None),
            Err(ValidationError::ActiveMissing)
        );
        assert_eq!(message(&draft, &CollectionStore::new(), None), "Internal Error");
    }
}
