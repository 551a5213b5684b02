use utoipa::OpenApi;
use crate::common::response::ErrorBody;
use crate::modules::render::dto::{ReceivedRender, SubmitRenderRequest, SubmitRenderResponse};
use crate::modules::render::model::{JobState, Platform, RenderJob};
use crate::routes::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::modules::render::handler::submit_render,
        crate::modules::render::handler::get_render,
    ),
    components(
        schemas(
            HealthResponse, ErrorBody,
            SubmitRenderRequest, SubmitRenderResponse, ReceivedRender,
            RenderJob, JobState, Platform,
        )
    ),
    tags(
        (name = "System", description = "Service health"),
        (name = "Render", description = "Render job admission and status")
    )
)]
pub struct ApiDoc;
