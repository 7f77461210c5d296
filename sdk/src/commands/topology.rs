//! Topology request: which brokers serve which partitions

use super::{dispatch_unary, Command};
use crate::error::Result;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{self as proto, TopologyRequest, TopologyResponse};
use zbc_core::protocol::{PARTITION_ROLE_FOLLOWER, PARTITION_ROLE_LEADER};
use zbc_core::{DispatchOptions, Dispatcher};

/// Cluster topology as seen by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub brokers: Vec<BrokerInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerInfo {
    pub host: String,
    pub port: i32,
    pub partitions: Vec<PartitionInfo>,
}

impl BrokerInfo {
    /// `host:port` of the broker
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionInfo {
    pub partition_id: i32,
    pub role: PartitionBrokerRole,
}

impl PartitionInfo {
    pub fn is_leader(&self) -> bool {
        self.role == PartitionBrokerRole::Leader
    }
}

/// Role of a broker for one partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartitionBrokerRole {
    Leader,
    Follower,
    /// Role value this client doesn't know
    Unknown(i32),
}

impl From<i32> for PartitionBrokerRole {
    fn from(role: i32) -> Self {
        match role {
            PARTITION_ROLE_LEADER => PartitionBrokerRole::Leader,
            PARTITION_ROLE_FOLLOWER => PartitionBrokerRole::Follower,
            other => PartitionBrokerRole::Unknown(other),
        }
    }
}

impl From<TopologyResponse> for Topology {
    fn from(response: TopologyResponse) -> Self {
        Self {
            brokers: response.brokers.into_iter().map(BrokerInfo::from).collect(),
        }
    }
}

impl From<proto::BrokerInfo> for BrokerInfo {
    fn from(broker: proto::BrokerInfo) -> Self {
        Self {
            host: broker.host,
            port: broker.port,
            partitions: broker
                .partitions
                .into_iter()
                .map(|p| PartitionInfo {
                    partition_id: p.partition_id,
                    role: p.role.into(),
                })
                .collect(),
        }
    }
}

/// Request the cluster topology. Takes no arguments.
pub struct TopologyCommand {
    dispatcher: Arc<Dispatcher>,
    options: DispatchOptions,
}

impl TopologyCommand {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            options: DispatchOptions::new(),
        }
    }

    /// Override the client's request timeout for this dispatch
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_request_timeout(timeout);
        self
    }

    pub fn command(&self) -> Result<Command> {
        Ok(Command::Topology(TopologyRequest {}))
    }

    pub async fn send(self) -> Result<Topology> {
        let command = self.command()?;
        let response: TopologyResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(response.into())
    }
}
