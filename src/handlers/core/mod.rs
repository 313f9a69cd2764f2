//! Core handler infrastructure.
//!
//! - [`PostRegHandler`]: commands from registered clients, receiving
//!   `Context<'_, RegisteredState>`
//! - [`ServerHandler`]: commands from linked peers, receiving
//!   `Context<'_, ServerState>`
//! - [`Registry`]: name-to-handler maps for both, with instrumented dispatch

pub mod context;
pub mod registry;
pub mod traits;

pub use context::Context;
pub use registry::Registry;
pub use traits::{PostRegHandler, ServerHandler};
