//! Messages of the `gateway_protocol.Gateway` service.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TopologyRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TopologyResponse {
    #[prost(message, repeated, tag = "1")]
    pub brokers: Vec<BrokerInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BrokerInfo {
    #[prost(string, tag = "1")]
    pub host: String,
    #[prost(int32, tag = "2")]
    pub port: i32,
    #[prost(message, repeated, tag = "3")]
    pub partitions: Vec<Partition>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Partition {
    #[prost(int32, tag = "1")]
    pub partition_id: i32,
    /// `PARTITION_ROLE_LEADER` or `PARTITION_ROLE_FOLLOWER`
    #[prost(int32, tag = "2")]
    pub role: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeployWorkflowRequest {
    #[prost(message, repeated, tag = "1")]
    pub workflows: Vec<WorkflowRequestObject>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WorkflowRequestObject {
    #[prost(string, tag = "1")]
    pub name: String,
    /// `RESOURCE_TYPE_BPMN` or `RESOURCE_TYPE_YAML`
    #[prost(int32, tag = "2")]
    pub r#type: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub definition: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeployWorkflowResponse {
    #[prost(int64, tag = "1")]
    pub key: i64,
    #[prost(message, repeated, tag = "2")]
    pub workflows: Vec<WorkflowResponseObject>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WorkflowResponseObject {
    #[prost(string, tag = "1")]
    pub bpmn_process_id: String,
    #[prost(int32, tag = "2")]
    pub version: i32,
    #[prost(int64, tag = "3")]
    pub workflow_key: i64,
    #[prost(string, tag = "4")]
    pub resource_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateWorkflowInstanceRequest {
    #[prost(int64, tag = "1")]
    pub workflow_key: i64,
    #[prost(string, tag = "2")]
    pub bpmn_process_id: String,
    /// -1 selects the latest deployed version
    #[prost(int32, tag = "3")]
    pub version: i32,
    #[prost(string, tag = "4")]
    pub payload: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateWorkflowInstanceResponse {
    #[prost(int64, tag = "1")]
    pub workflow_key: i64,
    #[prost(string, tag = "2")]
    pub bpmn_process_id: String,
    #[prost(int32, tag = "3")]
    pub version: i32,
    #[prost(int32, tag = "4")]
    pub partition_id: i32,
    #[prost(int64, tag = "5")]
    pub workflow_instance_key: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelWorkflowInstanceRequest {
    #[prost(int64, tag = "1")]
    pub workflow_instance_key: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelWorkflowInstanceResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateWorkflowInstancePayloadRequest {
    #[prost(int64, tag = "1")]
    pub element_instance_key: i64,
    #[prost(string, tag = "2")]
    pub payload: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateWorkflowInstancePayloadResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PublishMessageRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub correlation_key: String,
    /// Milliseconds the message is buffered for correlation
    #[prost(int64, tag = "3")]
    pub time_to_live: i64,
    #[prost(string, tag = "4")]
    pub message_id: String,
    #[prost(string, tag = "5")]
    pub payload: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PublishMessageResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateJobRequest {
    #[prost(string, tag = "1")]
    pub job_type: String,
    #[prost(int32, tag = "2")]
    pub retries: i32,
    /// JSON object of string headers
    #[prost(string, tag = "3")]
    pub custom_headers: String,
    #[prost(string, tag = "4")]
    pub payload: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateJobResponse {
    #[prost(int64, tag = "1")]
    pub key: i64,
    #[prost(int32, tag = "2")]
    pub partition_id: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActivateJobsRequest {
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(string, tag = "2")]
    pub worker: String,
    /// Job lock timeout in milliseconds
    #[prost(int64, tag = "3")]
    pub timeout: i64,
    #[prost(int32, tag = "4")]
    pub amount: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActivateJobsResponse {
    #[prost(message, repeated, tag = "1")]
    pub jobs: Vec<ActivatedJob>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActivatedJob {
    #[prost(int64, tag = "1")]
    pub key: i64,
    #[prost(string, tag = "2")]
    pub r#type: String,
    #[prost(message, optional, tag = "3")]
    pub job_headers: Option<JobHeaders>,
    #[prost(string, tag = "4")]
    pub custom_headers: String,
    #[prost(string, tag = "5")]
    pub worker: String,
    #[prost(int32, tag = "6")]
    pub retries: i32,
    /// Epoch milliseconds after which the job may be handed to another worker
    #[prost(int64, tag = "7")]
    pub deadline: i64,
    #[prost(string, tag = "8")]
    pub payload: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobHeaders {
    #[prost(int64, tag = "1")]
    pub workflow_instance_key: i64,
    #[prost(string, tag = "2")]
    pub bpmn_process_id: String,
    #[prost(int32, tag = "3")]
    pub workflow_definition_version: i32,
    #[prost(int64, tag = "4")]
    pub workflow_key: i64,
    #[prost(string, tag = "5")]
    pub element_id: String,
    #[prost(int64, tag = "6")]
    pub element_instance_key: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompleteJobRequest {
    #[prost(int64, tag = "1")]
    pub job_key: i64,
    #[prost(string, tag = "2")]
    pub payload: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompleteJobResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FailJobRequest {
    #[prost(int64, tag = "1")]
    pub job_key: i64,
    #[prost(int32, tag = "2")]
    pub retries: i32,
    #[prost(string, tag = "3")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FailJobResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateJobRetriesRequest {
    #[prost(int64, tag = "1")]
    pub job_key: i64,
    #[prost(int32, tag = "2")]
    pub retries: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateJobRetriesResponse {}
