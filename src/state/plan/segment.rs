use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::color::Color;

/// How a block is run on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Organisation {
    #[default]
    ExerciseForm,
    GameForm,
}

impl Organisation {
    pub const ALL: [Organisation; 2] = [Organisation::ExerciseForm, Organisation::GameForm];

    /// Stable identifier used in exports and select inputs.
    pub fn key(self) -> &'static str {
        match self {
            Organisation::ExerciseForm => "exercise-form",
            Organisation::GameForm => "game-form",
        }
    }

    /// Translation key for the display label.
    pub fn label_key(self) -> &'static str {
        match self {
            Organisation::ExerciseForm => "organisation_exercise_form",
            Organisation::GameForm => "organisation_game_form",
        }
    }

    /// Accepts the stable key or a display label in any shipped language.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "exercise-form" | "exercise form" | "übungsform" => Some(Organisation::ExerciseForm),
            "game-form" | "game form" | "spielform" => Some(Organisation::GameForm),
            _ => None,
        }
    }
}

/// One planned activity block on the timeline.
///
/// `start` is a cache of the block's position in the sequence. Only
/// [`Timeline`](super::Timeline) writes it, through its re-derivation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique identifier
    pub id: Uuid,
    /// Start offset in minutes from the timeline origin
    pub start: u32,
    /// Length in minutes, always at least 1
    pub duration: u32,
    pub name: String,
    pub color: Color,
    #[serde(default)]
    pub organisation: Organisation,
    #[serde(default)]
    pub explanation: String,
    /// Comma-separated tool list, entries optionally prefixed with a quantity
    #[serde(default)]
    pub tools: String,
}

impl Segment {
    /// Create a segment with the default organisation and empty details.
    pub fn new(start: u32, duration: u32, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            duration,
            name: name.into(),
            color,
            organisation: Organisation::default(),
            explanation: String::new(),
            tools: String::new(),
        }
    }

    pub fn with_organisation(mut self, organisation: Organisation) -> Self {
        self.organisation = organisation;
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_tools(mut self, tools: impl Into<String>) -> Self {
        self.tools = tools.into();
        self
    }

    /// End offset in minutes (exclusive)
    pub fn end(&self) -> u32 {
        self.start + self.duration
    }
}

/// User-supplied fields for creating or editing a segment.
///
/// Start and color are never part of a draft: the timeline derives both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentDraft {
    pub name: String,
    pub duration: u32,
    pub organisation: Organisation,
    pub explanation: String,
    pub tools: String,
}

impl SegmentDraft {
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
            ..Default::default()
        }
    }

    pub fn with_organisation(mut self, organisation: Organisation) -> Self {
        self.organisation = organisation;
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_tools(mut self, tools: impl Into<String>) -> Self {
        self.tools = tools.into();
        self
    }

    /// Prefill from an existing segment for the edit dialog.
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            name: segment.name.clone(),
            duration: segment.duration,
            organisation: segment.organisation,
            explanation: segment.explanation.clone(),
            tools: segment.tools.clone(),
        }
    }
}
