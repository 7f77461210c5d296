//! Replace the payload of an element instance

use super::{dispatch_unary, require_key, Command};
use crate::error::Result;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{
    UpdateWorkflowInstancePayloadRequest, UpdateWorkflowInstancePayloadResponse,
};
use zbc_core::{DispatchOptions, Dispatcher};

pub struct UpdatePayloadCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl UpdatePayloadCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn element_instance_key(self, key: i64) -> UpdatePayloadCommandStep2 {
        UpdatePayloadCommandStep2 {
            dispatcher: self.dispatcher,
            element_instance_key: key,
        }
    }
}

/// The new payload is mandatory.
pub struct UpdatePayloadCommandStep2 {
    dispatcher: Arc<Dispatcher>,
    element_instance_key: i64,
}

impl UpdatePayloadCommandStep2 {
    pub fn payload(self, payload: impl Into<String>) -> UpdatePayloadCommand {
        UpdatePayloadCommand {
            dispatcher: self.dispatcher,
            element_instance_key: self.element_instance_key,
            payload: payload.into(),
            options: DispatchOptions::new(),
        }
    }

    pub fn payload_value(self, payload: &Value) -> UpdatePayloadCommand {
        self.payload(payload.to_string())
    }
}

pub struct UpdatePayloadCommand {
    dispatcher: Arc<Dispatcher>,
    element_instance_key: i64,
    payload: String,
    options: DispatchOptions,
}

impl UpdatePayloadCommand {
    /// Override the client's request timeout for this dispatch
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_request_timeout(timeout);
        self
    }

    pub fn command(&self) -> Result<Command> {
        require_key("element instance key", self.element_instance_key)?;
        Ok(Command::UpdatePayload(UpdateWorkflowInstancePayloadRequest {
            element_instance_key: self.element_instance_key,
            payload: self.payload.clone(),
        }))
    }

    pub async fn send(self) -> Result<()> {
        let command = self.command()?;
        let _: UpdateWorkflowInstancePayloadResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(())
    }
}
