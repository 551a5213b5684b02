use crate::config::settings::AppConfig;
use crate::modules::render::service::RenderJobService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub render_jobs: RenderJobService,
}

impl AppState {
    pub fn new(config: AppConfig, render_jobs: RenderJobService) -> Self {
        Self {
            config,
            render_jobs,
        }
    }
}
