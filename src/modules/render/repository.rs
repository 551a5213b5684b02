use super::model::{JobId, JobUpdate, RenderJob, TransitionError};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("job {0} already exists")]
    DuplicateId(JobId),
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Storage for render jobs.
///
/// Implementations must make `insert` atomic with respect to the id check, and
/// must never expose a partially written record to `find_by_id`.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Stores a new job. Fails with `DuplicateId` if the id is taken.
    async fn insert(&self, job: RenderJob) -> Result<(), RepoError>;

    async fn find_by_id(&self, id: JobId) -> Result<Option<RenderJob>, RepoError>;

    /// Applies `update` to the stored job and returns the new snapshot.
    async fn update(
        &self,
        id: JobId,
        update: JobUpdate,
        at: OffsetDateTime,
    ) -> Result<RenderJob, RepoError>;

    async fn count(&self) -> Result<usize, RepoError>;
}

#[derive(Clone, Default)]
pub struct InMemoryJobRepository {
    jobs: Arc<DashMap<JobId, RenderJob>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: RenderJob) -> Result<(), RepoError> {
        match self.jobs.entry(job.id) {
            Entry::Occupied(_) => Err(RepoError::DuplicateId(job.id)),
            Entry::Vacant(slot) => {
                slot.insert(job);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<RenderJob>, RepoError> {
        Ok(self.jobs.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(
        &self,
        id: JobId,
        update: JobUpdate,
        at: OffsetDateTime,
    ) -> Result<RenderJob, RepoError> {
        let mut entry = self.jobs.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        entry.apply(update, at)?;
        Ok(entry.value().clone())
    }

    async fn count(&self) -> Result<usize, RepoError> {
        Ok(self.jobs.len())
    }
}
