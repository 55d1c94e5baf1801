//! Programme entity and the raw shapes it is built from
//!
//! Three shapes are involved:
//! - [`RawProgramme`]: loosely-typed record as it arrives from the JSON feed,
//!   a persisted snapshot, or a submitted form
//! - [`ProgrammeDraft`]: typed per-field candidate, input to the validator
//! - [`Programme`]: canonical entity held by the collection store

use serde::{Deserialize, Serialize};

/// Canonical programme entity
///
/// Never mutated once stored; an edit builds a new value that replaces the
/// old one by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Bulk load document: `{ "results": [...] }`
///
/// Records stay untyped here so one malformed record does not sink the
/// whole document; each is decoded into a [`RawProgramme`] on its own.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Feed {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// Image reference attached to a feed record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub master_filepath: String,
    pub filename: String,
}

/// Identifier as supplied by the source: the feed sends numbers, forms send text
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl RawId {
    /// Textual form of the identifier, as it would appear in an input field
    pub fn to_text(&self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for RawId {
    fn from(id: i64) -> Self {
        RawId::Number(id.into())
    }
}

/// Loosely-typed programme record
///
/// Every field is optional; the normalizer decides how absent fields are
/// treated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProgramme {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub images: Option<Vec<RawImage>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Candidate programme awaiting validation
///
/// `id` is kept as entered so the validator can tell "missing" from
/// "not a number".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammeDraft {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub image_url: Option<String>,
}

impl ProgrammeDraft {
    /// Convenience constructor for a fully-populated draft
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            id: Some(id.into()),
            slug: Some(String::new()),
            name: Some(name.into()),
            description: Some(description.into()),
            active: Some(active),
            image_url: None,
        }
    }

    /// Parsed numeric id, if the entered text is a valid integer
    pub fn parsed_id(&self) -> Option<i64> {
        self.id.as_deref().and_then(|s| s.trim().parse::<i64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_programme_serializes_camel_case() {
        let p = Programme {
            id: 3,
            slug: "news".to_string(),
            name: "News".to_string(),
            description: "Nightly".to_string(),
            active: true,
            image_url: Some("https://img/x.jpg".to_string()),
        };
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["imageUrl"], "https://img/x.jpg");
        assert!(value.get("image_url").is_none());
    }

    #[test]
    fn test_programme_omits_missing_image() {
        let p = Programme {
            id: 3,
            slug: String::new(),
            name: "News".to_string(),
            description: "Nightly".to_string(),
            active: false,
            image_url: None,
        };
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("imageUrl").is_none());
    }

    #[test]
    fn test_raw_id_accepts_number_or_text() {
        let raw: RawProgramme = serde_json::from_str(r#"{"id": 12}"#).unwrap();
        assert_eq!(raw.id.unwrap().to_text(), "12");

        let raw: RawProgramme = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(raw.id.unwrap().to_text(), "abc");

        let raw: RawProgramme = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert!(raw.id.is_none());
    }

    #[test]
    fn test_feed_record_fields() {
        let json = r#"{
            "results": [{
                "id": 1, "slug": "alpha", "name": "Alpha",
                "shortDescription": "d1", "active": true,
                "images": [{"masterFilepath": "a/b", "filename": "c.jpg"}]
            }]
        }"#;
        let feed: Feed = serde_json::from_str(json).unwrap();
        let raw: RawProgramme = serde_json::from_value(feed.results[0].clone()).unwrap();
        assert_eq!(raw.short_description.as_deref(), Some("d1"));
        assert_eq!(raw.images.as_ref().unwrap()[0].master_filepath, "a/b");
    }

    #[test]
    fn test_feed_keeps_mistyped_records_undecoded() {
        let json = r#"{"results": [{"id": 1, "active": true}, {"id": 2, "active": "true"}]}"#;
        let feed: Feed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.results.len(), 2);
        assert!(serde_json::from_value::<RawProgramme>(feed.results[0].clone()).is_ok());
        assert!(serde_json::from_value::<RawProgramme>(feed.results[1].clone()).is_err());
    }

    #[test]
    fn test_draft_parsed_id() {
        let draft = ProgrammeDraft::new(" 42 ", "n", "d", true);
        assert_eq!(draft.parsed_id(), Some(42));
        let draft = ProgrammeDraft::new("4x", "n", "d", true);
        assert_eq!(draft.parsed_id(), None);
    }
}
