//! Gateway protocol messages.
//!
//! The message types are declared with `prost` derives so the crate builds
//! without `protoc`. Field tags follow the `gateway_protocol` package and must
//! not change.

pub mod gateway_protocol;

/// Partition role of a broker, as carried in `Partition::role`.
pub const PARTITION_ROLE_LEADER: i32 = 0;
pub const PARTITION_ROLE_FOLLOWER: i32 = 1;

/// Resource type of a deployed workflow, as carried in `WorkflowRequestObject::r#type`.
pub const RESOURCE_TYPE_BPMN: i32 = 0;
pub const RESOURCE_TYPE_YAML: i32 = 1;
