//! Handler traits, split by who is allowed to send the command.

use super::context::Context;
use crate::error::HandlerResult;
use crate::state::{RegisteredState, ServerState};
use async_trait::async_trait;
use relaymsg_proto::Message;

/// Handler for commands that require a registered client connection.
///
/// ```ignore
/// pub struct RelayMsgHandler;
///
/// #[async_trait]
/// impl PostRegHandler for RelayMsgHandler {
///     async fn handle(
///         &self,
///         ctx: &mut Context<'_, RegisteredState>,
///         msg: &Message,
///     ) -> HandlerResult {
///         let channel = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
///         // ...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait PostRegHandler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_, RegisteredState>, msg: &Message)
    -> HandlerResult;
}

/// Handler for commands arriving over a server link.
///
/// Errors are logged by the registry and never answered over the link.
#[async_trait]
pub trait ServerHandler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_, ServerState>, msg: &Message) -> HandlerResult;
}
