//! Publish a message for correlation

use super::{dispatch_unary, require_non_empty, Command, EMPTY_PAYLOAD};
use crate::error::{Result, ZbcError};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{PublishMessageRequest, PublishMessageResponse};
use zbc_core::{DispatchOptions, Dispatcher};

pub struct PublishMessageCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl PublishMessageCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn message_name(self, name: impl Into<String>) -> PublishMessageCommandStep2 {
        PublishMessageCommandStep2 {
            command: PublishMessageCommand {
                dispatcher: self.dispatcher,
                name: name.into(),
                correlation_key: String::new(),
                message_id: String::new(),
                time_to_live: Duration::ZERO,
                payload: EMPTY_PAYLOAD.to_string(),
                options: DispatchOptions::new(),
            },
        }
    }
}

/// Message with a name. Without a correlation key the message is published
/// uncorrelated.
pub struct PublishMessageCommandStep2 {
    command: PublishMessageCommand,
}

impl PublishMessageCommandStep2 {
    pub fn correlation_key(mut self, key: impl Into<String>) -> PublishMessageCommand {
        self.command.correlation_key = key.into();
        self.command
    }

    pub fn message_id(self, id: impl Into<String>) -> PublishMessageCommand {
        self.command.message_id(id)
    }

    pub fn time_to_live(self, ttl: Duration) -> PublishMessageCommand {
        self.command.time_to_live(ttl)
    }

    pub fn payload(self, payload: impl Into<String>) -> PublishMessageCommand {
        self.command.payload(payload)
    }

    pub fn payload_value(self, payload: &Value) -> PublishMessageCommand {
        self.command.payload_value(payload)
    }

    pub fn request_timeout(self, timeout: Duration) -> PublishMessageCommand {
        self.command.request_timeout(timeout)
    }

    pub fn command(&self) -> Result<Command> {
        self.command.command()
    }

    pub async fn send(self) -> Result<()> {
        self.command.send().await
    }
}

pub struct PublishMessageCommand {
    dispatcher: Arc<Dispatcher>,
    name: String,
    correlation_key: String,
    message_id: String,
    time_to_live: Duration,
    payload: String,
    options: DispatchOptions,
}

impl PublishMessageCommand {
    /// Unique id; the broker drops a second message with the same name and id
    /// while the first one is buffered.
    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = id.into();
        self
    }

    /// How long the message is buffered waiting for a subscription
    pub fn time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = ttl;
        self
    }

    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn payload_value(self, payload: &Value) -> Self {
        self.payload(payload.to_string())
    }

    /// Override the client's request timeout for this dispatch
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_request_timeout(timeout);
        self
    }

    pub fn command(&self) -> Result<Command> {
        require_non_empty("message name", &self.name)?;
        let time_to_live = i64::try_from(self.time_to_live.as_millis()).map_err(|_| {
            ZbcError::validation(format!(
                "time to live of {:?} does not fit in milliseconds",
                self.time_to_live
            ))
        })?;

        Ok(Command::PublishMessage(PublishMessageRequest {
            name: self.name.clone(),
            correlation_key: self.correlation_key.clone(),
            time_to_live,
            message_id: self.message_id.clone(),
            payload: self.payload.clone(),
        }))
    }

    pub async fn send(self) -> Result<()> {
        let command = self.command()?;
        let _: PublishMessageResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(())
    }
}
