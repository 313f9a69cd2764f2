//! Command handler registry and dispatch.
//!
//! Client and server commands live in separate maps: a client cannot reach a
//! server-only command such as `RRELAYMSG`, it gets `ERR_UNKNOWNCOMMAND`.

use super::context::Context;
use super::traits::{PostRegHandler, ServerHandler};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{CapHandler, RRelayMsgHandler, RelayMsgHandler};
use crate::relay::tags::strip_client_tags;
use crate::state::{RegisteredState, ServerState};
use crate::telemetry::CommandTimer;
use relaymsg_proto::{ChannelExt, Message};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, Level, debug, span};

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn PostRegHandler>>,
    server_handlers: HashMap<&'static str, Box<dyn ServerHandler>>,
    /// Command usage counters
    command_counts: HashMap<&'static str, Arc<AtomicU64>>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn PostRegHandler>> = HashMap::new();
        handlers.insert("CAP", Box::new(CapHandler));
        handlers.insert("RELAYMSG", Box::new(RelayMsgHandler));

        let mut server_handlers: HashMap<&'static str, Box<dyn ServerHandler>> = HashMap::new();
        server_handlers.insert("RRELAYMSG", Box::new(RRelayMsgHandler));

        let command_counts = handlers
            .keys()
            .chain(server_handlers.keys())
            .map(|&cmd| (cmd, Arc::new(AtomicU64::new(0))))
            .collect();

        Self {
            handlers,
            server_handlers,
            command_counts,
        }
    }

    /// Get command usage statistics, most used first.
    pub fn get_command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1));
        stats
    }

    fn count(&self, cmd_name: &str) {
        if let Some(counter) = self.command_counts.get(cmd_name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Dispatch a message from a registered client.
    ///
    /// Tags a client may not set are stripped first. Errors with a numeric
    /// reply are answered here and reported as `Ok`; the rest are returned.
    pub async fn dispatch(
        &self,
        ctx: &mut Context<'_, RegisteredState>,
        msg: &Message,
    ) -> HandlerResult {
        let sanitized = strip_client_tags(msg);
        if sanitized.is_some() {
            debug!(uid = %ctx.uid, "Stripped server-only tags from client message");
        }
        let msg = sanitized.as_ref().unwrap_or(msg);

        let cmd_name = msg.command.name();
        ctx.label = msg.label().map(str::to_string);

        let Some(handler) = self.handlers.get(cmd_name.as_str()) else {
            crate::metrics::record_command_error(&cmd_name, "unknown_command");
            let err = HandlerError::UnknownCommand(cmd_name.clone());
            if let Some(reply) =
                err.to_irc_reply(&ctx.matrix.server_info.name, &ctx.state.nick, &cmd_name)
            {
                ctx.send(reply).await?;
            }
            return Ok(());
        };
        self.count(&cmd_name);

        let channel = msg.arg(0).filter(|a| a.is_channel_name());
        let msgid = crate::telemetry::extract_msgid(msg);
        let irc_span = span!(
            Level::DEBUG,
            "irc.command",
            command = %cmd_name,
            uid = %ctx.uid,
            source_nick = %ctx.state.nick,
            channel = channel,
            msgid = msgid.as_deref(),
        );

        let _timer = CommandTimer::new(&cmd_name);
        let result = handler.handle(ctx, msg).instrument(irc_span).await;

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                crate::metrics::record_command_error(&cmd_name, e.error_code());
                debug!(command = %cmd_name, error = %e, "Command error");
                match e.to_irc_reply(&ctx.matrix.server_info.name, &ctx.state.nick, &cmd_name) {
                    Some(reply) => ctx.send(reply).await,
                    None => Err(e),
                }
            }
        }
    }

    /// Dispatch a message received over a server link.
    ///
    /// Nothing is ever sent back to the peer from here.
    pub async fn dispatch_server(
        &self,
        ctx: &mut Context<'_, ServerState>,
        msg: &Message,
    ) -> HandlerResult {
        let cmd_name = msg.command.name();

        let Some(handler) = self.server_handlers.get(cmd_name.as_str()) else {
            crate::metrics::record_command_error(&cmd_name, "unknown_command");
            debug!(peer = %ctx.state.name, command = %cmd_name, "Unhandled server command");
            return Ok(());
        };
        self.count(&cmd_name);

        let irc_span = span!(
            Level::DEBUG,
            "irc.command",
            command = %cmd_name,
            peer_sid = %ctx.state.sid,
            peer = %ctx.state.name,
        );

        let _timer = CommandTimer::new(&cmd_name);
        let result = handler.handle(ctx, msg).instrument(irc_span).await;

        if let Err(ref e) = result {
            crate::metrics::record_command_error(&cmd_name, e.error_code());
            debug!(command = %cmd_name, error = %e, "Server command error");
        }
        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
