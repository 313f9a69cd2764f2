//! Command handler context.
//!
//! `Context<'a, S>` is passed to every handler. `S` is the session state:
//! [`RegisteredState`](crate::state::RegisteredState) for clients,
//! [`ServerState`](crate::state::ServerState) for peer links.

use crate::error::HandlerResult;
use crate::handlers::helpers::{server_notice, with_label};
use crate::state::Matrix;
use relaymsg_proto::Message;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct Context<'a, S> {
    /// The client's UID, or the peer's SID on a server link.
    pub uid: &'a str,
    /// Shared server state.
    pub matrix: &'a Arc<Matrix>,
    /// Outbound queue of this connection.
    pub sender: &'a mpsc::Sender<Arc<Message>>,
    /// Session state.
    pub state: &'a mut S,
    /// Label from incoming message for labeled-response (IRCv3).
    pub label: Option<String>,
}

impl<'a, S> Context<'a, S> {
    pub fn new(
        uid: &'a str,
        matrix: &'a Arc<Matrix>,
        sender: &'a mpsc::Sender<Arc<Message>>,
        state: &'a mut S,
    ) -> Self {
        Self {
            uid,
            matrix,
            sender,
            state,
            label: None,
        }
    }

    /// Send a message to this connection, labeled if the command was.
    pub async fn send(&self, msg: Message) -> HandlerResult {
        let msg = with_label(msg, self.label.as_deref());
        self.sender.send(Arc::new(msg)).await?;
        Ok(())
    }

    /// Send a server NOTICE to `target`.
    pub async fn send_notice(&self, target: &str, text: impl Into<String>) -> HandlerResult {
        let notice = server_notice(&self.matrix.server_info.name, target, text);
        self.send(notice).await
    }
}
