//! Testing utilities for code built on the client.
//!
//! [`RecordingTransport`] stands in for the gateway: it answers with scripted
//! replies and records what the client sent, so command construction and the
//! dispatch policy can be asserted without a broker.

mod recording_transport;

pub use recording_transport::{RecordedRequest, RecordingTransport, StreamFeeder};
