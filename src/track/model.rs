use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::broker::GeneratedTrack;

/// Coarse difficulty tier shown in the track dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// CEFR proficiency tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fluency {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

/// A saved learning-track configuration.
///
/// `id` is client-generated, unique within the registry, and never mutated.
/// Serialized camelCase to stay readable against the original persisted shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,

    /// Display label, e.g. "Spanish for Travelers"
    pub name: String,

    /// Target language; non-empty is a creation precondition
    pub language: String,

    #[serde(default = "default_native_language")]
    pub native_language: String,

    #[serde(default)]
    pub level: Level,

    /// Free-form accent preference, may be empty
    #[serde(default)]
    pub accent: String,

    #[serde(default)]
    pub current_fluency: Option<Fluency>,

    #[serde(default)]
    pub desired_fluency: Option<Fluency>,

    /// Persona prompt returned by the track generator
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Starter topics returned by the track generator
    #[serde(default)]
    pub initial_topics: Vec<String>,
}

fn default_native_language() -> String {
    "English".to_string()
}

/// User input from the track-creation dialog. Everything except `language`
/// is optional and falls back to a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackForm {
    pub name: Option<String>,
    pub language: String,
    pub native_language: Option<String>,
    pub level: Option<Level>,
    pub accent: Option<String>,
    pub current_fluency: Option<Fluency>,
    pub desired_fluency: Option<Fluency>,
}

impl TrackForm {
    /// Creation precondition: a non-empty target language.
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            bail!("Please select a language");
        }
        Ok(())
    }

    /// Goal sentence sent to the track generator.
    pub fn goal(&self) -> String {
        let native = self.native_language.as_deref().unwrap_or("English");
        let level = self.level.unwrap_or_default();
        format!(
            "Learning {} as a {} speaker at {:?} level",
            self.language, native, level
        )
    }

    /// Materialize a `Track` with the given id and generator output.
    pub fn into_track(self, id: String, generated: GeneratedTrack) -> Track {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => format!("{} Track", self.language),
        };

        Track {
            id,
            name,
            language: self.language,
            native_language: self
                .native_language
                .unwrap_or_else(default_native_language),
            level: self.level.unwrap_or_default(),
            accent: self.accent.unwrap_or_default(),
            current_fluency: self.current_fluency,
            desired_fluency: self.desired_fluency,
            system_prompt: Some(generated.system_prompt),
            initial_topics: generated.initial_topics,
        }
    }
}

/// Shallow partial update for an existing track. `id` is immutable and has
/// no field here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackPatch {
    pub name: Option<String>,
    pub language: Option<String>,
    pub native_language: Option<String>,
    pub level: Option<Level>,
    pub accent: Option<String>,
    pub current_fluency: Option<Fluency>,
    pub desired_fluency: Option<Fluency>,
    pub system_prompt: Option<String>,
    pub initial_topics: Option<Vec<String>>,
}

impl TrackPatch {
    pub(crate) fn apply(self, track: &mut Track) {
        if let Some(name) = self.name {
            track.name = name;
        }
        if let Some(language) = self.language {
            track.language = language;
        }
        if let Some(native_language) = self.native_language {
            track.native_language = native_language;
        }
        if let Some(level) = self.level {
            track.level = level;
        }
        if let Some(accent) = self.accent {
            track.accent = accent;
        }
        if let Some(current_fluency) = self.current_fluency {
            track.current_fluency = Some(current_fluency);
        }
        if let Some(desired_fluency) = self.desired_fluency {
            track.desired_fluency = Some(desired_fluency);
        }
        if let Some(system_prompt) = self.system_prompt {
            track.system_prompt = Some(system_prompt);
        }
        if let Some(initial_topics) = self.initial_topics {
            track.initial_topics = initial_topics;
        }
    }
}
