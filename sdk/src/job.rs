//! Jobs handed out by an activation

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use zbc_core::protocol::gateway_protocol as proto;

/// Where in a workflow instance a job was created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHeaders {
    pub workflow_instance_key: i64,
    pub bpmn_process_id: String,
    pub workflow_definition_version: i32,
    pub workflow_key: i64,
    pub element_id: String,
    pub element_instance_key: i64,
}

/// A job locked for this worker until its deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivatedJob {
    pub key: i64,
    #[serde(rename = "type")]
    pub job_type: String,
    pub headers: JobHeaders,
    /// Custom headers as a JSON document
    pub custom_headers: String,
    pub worker: String,
    pub retries: i32,
    /// Epoch milliseconds after which the job may be handed to another worker
    pub deadline: i64,
    /// Payload as a JSON document
    pub payload: String,
}

impl ActivatedJob {
    /// Deserialize the payload.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.payload)?)
    }

    /// Custom headers parsed as JSON
    pub fn custom_headers_value(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.custom_headers)?)
    }
}

impl From<proto::ActivatedJob> for ActivatedJob {
    fn from(job: proto::ActivatedJob) -> Self {
        let headers = job
            .job_headers
            .map(|h| JobHeaders {
                workflow_instance_key: h.workflow_instance_key,
                bpmn_process_id: h.bpmn_process_id,
                workflow_definition_version: h.workflow_definition_version,
                workflow_key: h.workflow_key,
                element_id: h.element_id,
                element_instance_key: h.element_instance_key,
            })
            .unwrap_or_default();

        Self {
            key: job.key,
            job_type: job.r#type,
            headers,
            custom_headers: job.custom_headers,
            worker: job.worker,
            retries: job.retries,
            deadline: job.deadline,
            payload: job.payload,
        }
    }
}
