use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Distribution channel a job is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tiktok,
    Reels,
    Shorts,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Tiktok, Platform::Reels, Platform::Shorts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Reels => "reels",
            Platform::Shorts => "shorts",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized platform `{0}`")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// Hex colour (`#RGB` or `#RRGGBB`), kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EndCardColor(String);

impl EndCardColor {
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix('#')?;
        let well_formed = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum JobState {
    Accepted,
    Processing,
    Completed,
    Failed,
}

impl JobState {
    /// Forward-only lifecycle: Accepted -> Processing -> {Completed, Failed}.
    pub fn can_advance_to(self, next: JobState) -> bool {
        matches!(
            (self, next),
            (JobState::Accepted, JobState::Processing)
                | (JobState::Processing, JobState::Completed)
                | (JobState::Processing, JobState::Failed)
        )
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Accepted => "Accepted",
            JobState::Processing => "Processing",
            JobState::Completed => "Completed",
            JobState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// A fully validated submission, ready to be given an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRenderJob {
    pub video_reference: String,
    pub platform: Platform,
    pub brand_logo_reference: Option<String>,
    pub end_card_color: Option<EndCardColor>,
    pub options: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderJob {
    #[schema(value_type = String, format = Uuid)]
    pub id: JobId,
    pub video_reference: String,
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_logo_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "#3F2E91")]
    pub end_card_color: Option<EndCardColor>,
    pub options: HashMap<String, serde_json::Value>,
    pub state: JobState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

/// A state change requested by the processing pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobUpdate {
    StartProcessing,
    Complete { output_reference: String },
    Fail { error_detail: String },
}

impl JobUpdate {
    pub fn target_state(&self) -> JobState {
        match self {
            JobUpdate::StartProcessing => JobState::Processing,
            JobUpdate::Complete { .. } => JobState::Completed,
            JobUpdate::Fail { .. } => JobState::Failed,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot move job from {from} to {to}")]
pub struct TransitionError {
    pub from: JobState,
    pub to: JobState,
}

impl RenderJob {
    pub fn admit(id: JobId, new_job: NewRenderJob, now: OffsetDateTime) -> Self {
        Self {
            id,
            video_reference: new_job.video_reference,
            platform: new_job.platform,
            brand_logo_reference: new_job.brand_logo_reference,
            end_card_color: new_job.end_card_color,
            options: new_job.options,
            state: JobState::Accepted,
            output_reference: None,
            error_detail: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies `update` in place. The record is untouched when the transition is illegal.
    pub fn apply(&mut self, update: JobUpdate, at: OffsetDateTime) -> Result<(), TransitionError> {
        let to = update.target_state();
        if !self.state.can_advance_to(to) {
            return Err(TransitionError { from: self.state, to });
        }

        match update {
            JobUpdate::StartProcessing => {}
            JobUpdate::Complete { output_reference } => self.output_reference = Some(output_reference),
            JobUpdate::Fail { error_detail } => self.error_detail = Some(error_detail),
        }
        self.state = to;
        self.updated_at = at;
        Ok(())
    }
}
