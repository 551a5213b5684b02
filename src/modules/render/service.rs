use super::dto::SubmitRenderRequest;
use super::error::RenderJobError;
use super::model::{JobId, JobUpdate, RenderJob};
use super::repository::{JobRepository, RepoError};
use anyhow::anyhow;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{info, warn};

/// Fresh ids to try before giving up on a submission.
pub const MAX_ID_ATTEMPTS: usize = 3;

pub trait JobIdGenerator: Send + Sync {
    fn next_id(&self) -> JobId;
}

/// Random v4 UUIDs.
pub struct RandomJobIds;

impl JobIdGenerator for RandomJobIds {
    fn next_id(&self) -> JobId {
        JobId::new_v4()
    }
}

#[derive(Clone)]
pub struct RenderJobService {
    repo: Arc<dyn JobRepository>,
    ids: Arc<dyn JobIdGenerator>,
}

impl RenderJobService {
    pub fn new(repo: Arc<dyn JobRepository>) -> Self {
        Self::with_id_generator(repo, Arc::new(RandomJobIds))
    }

    pub fn with_id_generator(repo: Arc<dyn JobRepository>, ids: Arc<dyn JobIdGenerator>) -> Self {
        Self { repo, ids }
    }

    pub async fn submit_job(&self, req: SubmitRenderRequest) -> Result<RenderJob, RenderJobError> {
        let new_job = match req.into_new_job() {
            Ok(job) => job,
            Err(e) => {
                warn!(error = %e, "render submission rejected");
                return Err(e);
            }
        };

        let now = OffsetDateTime::now_utc();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let job = RenderJob::admit(self.ids.next_id(), new_job.clone(), now);
            match self.repo.insert(job.clone()).await {
                Ok(()) => {
                    info!(job_id = %job.id, platform = %job.platform, "render job accepted");
                    return Ok(job);
                }
                Err(RepoError::DuplicateId(id)) => {
                    warn!(job_id = %id, attempt, "job id collision, retrying with a fresh id");
                }
                Err(e) => return Err(anyhow!(e).context("failed to store render job").into()),
            }
        }

        Err(anyhow!("no unique job id after {MAX_ID_ATTEMPTS} attempts").into())
    }

    pub async fn get_job(&self, id: JobId) -> Result<RenderJob, RenderJobError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow!(e).context("failed to load render job"))?
            .ok_or(RenderJobError::NotFound)
    }

    /// Advances a job through its lifecycle on behalf of the processing pipeline.
    pub async fn advance_job_state(
        &self,
        id: JobId,
        update: JobUpdate,
    ) -> Result<RenderJob, RenderJobError> {
        let target = update.target_state();
        match self.repo.update(id, update, OffsetDateTime::now_utc()).await {
            Ok(job) => {
                info!(job_id = %id, state = %job.state, "render job advanced");
                Ok(job)
            }
            Err(RepoError::NotFound(_)) => Err(RenderJobError::NotFound),
            Err(RepoError::Transition(e)) => {
                warn!(job_id = %id, to = %target, error = %e, "rejected render job transition");
                Err(e.into())
            }
            Err(e) => Err(anyhow!(e).context("failed to update render job").into()),
        }
    }

    pub async fn job_count(&self) -> Result<usize, RenderJobError> {
        Ok(self.repo.count().await.map_err(|e| anyhow!(e))?)
    }
}
