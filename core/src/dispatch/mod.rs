//! Dispatch policy: timeouts, retries and streaming for gateway commands.

mod dispatcher;
mod policy;
mod stream;

pub use dispatcher::Dispatcher;
pub use policy::{
    DispatchOptions, DispatchPolicy, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRIES,
    DEFAULT_STREAM_TIMEOUT,
};
pub use stream::InactivityStream;
