//! Entity normalizer: raw records into typed drafts
//!
//! Pure transformation, no side effects. Two modes:
//! - **Strict** (bulk load from a trusted feed or snapshot): absent fields stay
//!   absent and the validator decides
//! - **Permissive** (form input): absent text fields become empty strings and
//!   `active` becomes `false`

use crate::programme::{ProgrammeDraft, RawImage, RawProgramme};

/// Default base for image URLs
pub const DEFAULT_IMAGE_BASE: &str = "https://files.stv.tv/imagebase";

/// Rendered image width
pub const IMAGE_WIDTH: u32 = 1024;

/// Rendered image height
pub const IMAGE_HEIGHT: u32 = 576;

/// Treatment of absent fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    Strict,
    Permissive,
}

/// Converts raw records into [`ProgrammeDraft`]s
#[derive(Debug, Clone)]
pub struct Normalizer {
    mode: NormalizeMode,
    image_base: String,
}

impl Normalizer {
    pub fn new(mode: NormalizeMode, image_base: impl Into<String>) -> Self {
        Self {
            mode,
            image_base: image_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn strict() -> Self {
        Self::new(NormalizeMode::Strict, DEFAULT_IMAGE_BASE)
    }

    pub fn permissive() -> Self {
        Self::new(NormalizeMode::Permissive, DEFAULT_IMAGE_BASE)
    }

    /// Same image base, different mode
    pub fn with_mode(&self, mode: NormalizeMode) -> Self {
        Self {
            mode,
            image_base: self.image_base.clone(),
        }
    }

    pub fn normalize(&self, raw: &RawProgramme) -> ProgrammeDraft {
        let text = |value: Option<String>| match self.mode {
            NormalizeMode::Strict => value,
            NormalizeMode::Permissive => Some(value.unwrap_or_default()),
        };

        let active = match self.mode {
            NormalizeMode::Strict => raw.active,
            NormalizeMode::Permissive => Some(raw.active.unwrap_or(false)),
        };

        // An explicit image list wins over a previously rendered URL
        let image_url = raw
            .images
            .as_ref()
            .and_then(|images| images.first())
            .map(|image| self.image_url(image))
            .or_else(|| raw.image_url.clone().filter(|url| !url.is_empty()));

        ProgrammeDraft {
            id: text(raw.id.as_ref().map(|id| id.to_text())),
            slug: text(raw.slug.clone()),
            name: text(raw.name.clone()),
            description: text(description_of(raw)),
            active,
            image_url,
        }
    }

    /// `{base}/{masterFilepath}/{width}x{height}/{filename}`
    pub fn image_url(&self, image: &RawImage) -> String {
        format!(
            "{}/{}/{}x{}/{}",
            self.image_base, image.master_filepath, IMAGE_WIDTH, IMAGE_HEIGHT, image.filename
        )
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::strict()
    }
}

/// Description fallback chain: `shortDescription`, then `description`.
/// First non-empty value wins.
fn description_of(raw: &RawProgramme) -> Option<String> {
    [&raw.short_description, &raw.description]
        .into_iter()
        .flatten()
        .find(|d| !d.is_empty())
        .cloned()
        .or_else(|| {
            // Present but empty stays present
            raw.short_description.clone().or_else(|| raw.description.clone())
        })
}
