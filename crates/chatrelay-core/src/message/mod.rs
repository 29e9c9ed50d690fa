//! Inbound message plumbing between the chat platform and the relay.
//!
//! - `transport` -- `ChatTransport` port for outbound delivery
//! - `handler` -- `MessageHandler` trait the dispatcher drives
//! - `dispatcher` -- per-chat mailboxes so one slow chat never stalls another

pub mod dispatcher;
pub mod handler;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use handler::MessageHandler;
pub use transport::ChatTransport;
