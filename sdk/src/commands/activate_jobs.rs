//! Activate jobs of a type and stream them back

use super::{require_non_empty, ActivationStream, Command};
use crate::error::{Result, ZbcError};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use zbc_core::protocol::gateway_protocol::{ActivateJobsRequest, ActivateJobsResponse};
use zbc_core::{CommandKind, DispatchOptions, Dispatcher};

/// Worker and job timeout used when a command doesn't set them
#[derive(Debug, Clone)]
pub(crate) struct ActivationDefaults {
    pub(crate) worker_name: String,
    pub(crate) job_timeout: Duration,
}

pub struct ActivateJobsCommandStep1 {
    dispatcher: Arc<Dispatcher>,
    defaults: ActivationDefaults,
}

impl ActivateJobsCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>, defaults: ActivationDefaults) -> Self {
        Self {
            dispatcher,
            defaults,
        }
    }

    pub fn job_type(self, job_type: impl Into<String>) -> ActivateJobsCommandStep2 {
        ActivateJobsCommandStep2 {
            dispatcher: self.dispatcher,
            defaults: self.defaults,
            job_type: job_type.into(),
        }
    }
}

/// The maximum number of jobs is mandatory.
pub struct ActivateJobsCommandStep2 {
    dispatcher: Arc<Dispatcher>,
    defaults: ActivationDefaults,
    job_type: String,
}

impl ActivateJobsCommandStep2 {
    pub fn max_jobs_to_activate(self, amount: i32) -> ActivateJobsCommand {
        ActivateJobsCommand {
            dispatcher: self.dispatcher,
            job_type: self.job_type,
            amount,
            worker_name: self.defaults.worker_name,
            timeout: self.defaults.job_timeout,
            options: DispatchOptions::new(),
        }
    }
}

pub struct ActivateJobsCommand {
    dispatcher: Arc<Dispatcher>,
    job_type: String,
    amount: i32,
    worker_name: String,
    timeout: Duration,
    options: DispatchOptions,
}

impl ActivateJobsCommand {
    /// Name recorded on the activated jobs
    pub fn worker_name(mut self, worker: impl Into<String>) -> Self {
        self.worker_name = worker.into();
        self
    }

    /// How long the jobs stay locked to this worker
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the client's stream inactivity timeout
    pub fn stream_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_stream_timeout(timeout);
        self
    }

    fn request(&self) -> Result<ActivateJobsRequest> {
        require_non_empty("job type", &self.job_type)?;
        require_non_empty("worker name", &self.worker_name)?;
        if self.amount <= 0 {
            return Err(ZbcError::validation(format!(
                "max jobs to activate must be positive, got {}",
                self.amount
            )));
        }
        if self.timeout.is_zero() {
            return Err(ZbcError::validation("job timeout must be positive"));
        }
        let timeout = i64::try_from(self.timeout.as_millis()).map_err(|_| {
            ZbcError::validation(format!(
                "job timeout of {:?} does not fit in milliseconds",
                self.timeout
            ))
        })?;

        Ok(ActivateJobsRequest {
            r#type: self.job_type.clone(),
            worker: self.worker_name.clone(),
            timeout,
            amount: self.amount,
        })
    }

    pub fn command(&self) -> Result<Command> {
        Ok(Command::ActivateJobs(self.request()?))
    }

    /// Open the activation stream.
    pub async fn send(self) -> Result<ActivationStream> {
        let request = self.request()?;
        let responses = self
            .dispatcher
            .open_stream::<_, ActivateJobsResponse>(CommandKind::ActivateJobs, &request, self.options)
            .await?;

        info!(
            job_type = %request.r#type,
            worker = %request.worker,
            amount = request.amount,
            "Activating jobs"
        );
        Ok(ActivationStream::new(responses))
    }
}
