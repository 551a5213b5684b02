use super::error::RenderJobError;
use super::model::{EndCardColor, JobState, NewRenderJob, Platform, RenderJob};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

// Struct field name -> wire name, in the order failures are reported.
const REQUIRED_FIELDS: [(&str, &str); 2] = [
    ("video_reference", "videoReference"),
    ("platform", "platform"),
];

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRenderRequest {
    /// URL or storage path of the source clip.
    #[serde(alias = "videoUrl", alias = "videoPath")]
    #[validate(
        required(message = "videoReference is required"),
        length(min = 1, message = "videoReference must not be empty")
    )]
    #[schema(example = "https://cdn.example.com/uploads/clip.mp4")]
    pub video_reference: Option<String>,
    #[validate(
        required(message = "platform is required"),
        length(min = 1, message = "platform must not be empty")
    )]
    #[schema(example = "tiktok")]
    pub platform: Option<String>,
    #[serde(alias = "brandLogoUrl", alias = "partnerLogoUrl")]
    pub brand_logo_reference: Option<String>,
    #[schema(example = "#3F2E91")]
    pub end_card_color: Option<String>,
    /// Free-form flags (captions, safe zones, ...), stored as given.
    pub options: Option<HashMap<String, serde_json::Value>>,
}

impl SubmitRenderRequest {
    /// Single validation pass. Reports the first failing field, in wire order.
    pub fn into_new_job(self) -> Result<NewRenderJob, RenderJobError> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            for (key, wire_name) in REQUIRED_FIELDS {
                if let Some(first) = field_errors.get(key).and_then(|errs| errs.first()) {
                    let reason = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{wire_name} is invalid"));
                    return Err(RenderJobError::validation(wire_name, reason));
                }
            }
            return Err(RenderJobError::validation("request", errors.to_string()));
        }

        let video_reference = self
            .video_reference
            .ok_or_else(|| RenderJobError::validation("videoReference", "videoReference is required"))?;
        let raw_platform = self
            .platform
            .ok_or_else(|| RenderJobError::validation("platform", "platform is required"))?;

        let platform: Platform = raw_platform.parse().map_err(|_| {
            let known: Vec<&str> = Platform::ALL.iter().map(Platform::as_str).collect();
            RenderJobError::validation(
                "platform",
                format!(
                    "platform `{raw_platform}` is not supported; expected one of: {}",
                    known.join(", ")
                ),
            )
        })?;

        let end_card_color = match self.end_card_color {
            Some(raw) => Some(EndCardColor::parse(&raw).ok_or_else(|| {
                RenderJobError::validation(
                    "endCardColor",
                    format!("endCardColor `{raw}` must be a hex colour like #RRGGBB or #RGB"),
                )
            })?),
            None => None,
        };

        Ok(NewRenderJob {
            video_reference,
            platform,
            brand_logo_reference: self.brand_logo_reference,
            end_card_color,
            options: self.options.unwrap_or_default(),
        })
    }
}

/// Echo of the accepted fields.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedRender {
    pub video_reference: String,
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_logo_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub end_card_color: Option<EndCardColor>,
    pub options: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRenderResponse {
    pub job_id: String,
    pub state: JobState,
    pub message: String,
    pub received: ReceivedRender,
}

impl From<&RenderJob> for SubmitRenderResponse {
    fn from(job: &RenderJob) -> Self {
        Self {
            job_id: job.id.to_string(),
            state: job.state,
            message: "Job accepted".to_string(),
            received: ReceivedRender {
                video_reference: job.video_reference.clone(),
                platform: job.platform,
                brand_logo_reference: job.brand_logo_reference.clone(),
                end_card_color: job.end_card_color.clone(),
                options: job.options.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> SubmitRenderRequest {
        serde_json::from_value(value).unwrap()
    }

    fn failed_field(value: serde_json::Value) -> &'static str {
        match request(value).into_new_job() {
            Err(RenderJobError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn minimal_request_is_accepted() {
        let job = request(json!({"videoReference": "https://x/clip.mp4", "platform": "tiktok"}))
            .into_new_job()
            .unwrap();
        assert_eq!(job.video_reference, "https://x/clip.mp4");
        assert_eq!(job.platform, Platform::Tiktok);
        assert!(job.options.is_empty());
        assert!(job.end_card_color.is_none());
    }

    #[test]
    fn missing_video_reference_is_reported_first() {
        assert_eq!(failed_field(json!({"platform": "tiktok"})), "videoReference");
        assert_eq!(failed_field(json!({})), "videoReference");
        assert_eq!(failed_field(json!({"videoReference": "", "platform": "fax-machine"})), "videoReference");
    }

    #[test]
    fn platform_must_be_present_and_known() {
        assert_eq!(failed_field(json!({"videoReference": "a.mp4"})), "platform");
        assert_eq!(failed_field(json!({"videoReference": "a.mp4", "platform": ""})), "platform");
        assert_eq!(failed_field(json!({"videoReference": "a.mp4", "platform": "fax-machine"})), "platform");
    }

    #[test]
    fn end_card_color_checked_after_required_fields() {
        assert_eq!(
            failed_field(json!({"videoReference": "a.mp4", "platform": "reels", "endCardColor": "purple"})),
            "endCardColor"
        );
        assert_eq!(
            failed_field(json!({"platform": "reels", "endCardColor": "purple"})),
            "videoReference"
        );
    }

    #[test]
    fn missing_field_reason_names_the_field() {
        match request(json!({"platform": "tiktok"})).into_new_job() {
            Err(RenderJobError::Validation { reason, .. }) => assert!(reason.contains("videoReference")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_platform_reason_names_platform() {
        match request(json!({"videoReference": "a.mp4"})).into_new_job() {
            Err(RenderJobError::Validation { field, reason }) => {
                assert_eq!(field, "platform");
                assert_eq!(reason, "platform is required");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn options_pass_through_untouched() {
        let job = request(json!({
            "videoReference": "s3://bucket/clip.mp4",
            "platform": "shorts",
            "brandLogoReference": "https://x/logo.png",
            "endCardColor": "#3F2E91",
            "options": {"captions": true, "safeZone": {"top": 120}}
        }))
        .into_new_job()
        .unwrap();

        assert_eq!(job.options["captions"], json!(true));
        assert_eq!(job.options["safeZone"], json!({"top": 120}));
        assert_eq!(job.brand_logo_reference.as_deref(), Some("https://x/logo.png"));
        assert_eq!(job.end_card_color.unwrap().as_str(), "#3F2E91");
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let job = request(json!({
            "videoUrl": "https://x/clip.mp4",
            "platform": "tiktok",
            "partnerLogoUrl": "https://x/logo.png"
        }))
        .into_new_job()
        .unwrap();
        assert_eq!(job.video_reference, "https://x/clip.mp4");
        assert_eq!(job.brand_logo_reference.as_deref(), Some("https://x/logo.png"));

        let job = request(json!({"videoPath": "uploads/clip.mp4", "platform": "reels"}))
            .into_new_job()
            .unwrap();
        assert_eq!(job.video_reference, "uploads/clip.mp4");
    }
}
