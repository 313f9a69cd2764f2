//! RRELAYMSG command handler.
//!
//! `RRELAYMSG <origin uid> <channel> <spoofed nick> :<text>`
//!
//! A relay event forwarded by a peer. Frames that are short, carry a nick
//! failing the character or separator checks, or name a channel unknown here
//! are dropped without a reply over the link. Otherwise the line is delivered
//! to local members and passed on to every other peer.

use crate::handlers::{Context, HandlerResult, ServerHandler, deliver_to_channel};
use crate::metrics;
use crate::relay::{self, Origin, RelayEvent};
use crate::state::ServerState;
use async_trait::async_trait;
use relaymsg_proto::{Command, Message};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct RRelayMsgHandler;

#[async_trait]
impl ServerHandler for RRelayMsgHandler {
    async fn handle(&self, ctx: &mut Context<'_, ServerState>, msg: &Message) -> HandlerResult {
        let Command::RRELAYMSG(origin, channel, spoofed_nick, text) = &msg.command else {
            metrics::record_relay("remote", "malformed");
            warn!(
                peer = %ctx.state.name,
                args = msg.command.args().len(),
                "Dropping short RRELAYMSG frame"
            );
            return Ok(());
        };

        let policy = ctx.matrix.policy.snapshot();
        if let Err(rejection) = relay::check_format(spoofed_nick, policy.require_separator) {
            metrics::record_relay("remote", rejection.as_str());
            warn!(
                peer = %ctx.state.name,
                nick = %spoofed_nick,
                reason = %rejection,
                "Dropping RRELAYMSG with invalid spoofed nick"
            );
            return Ok(());
        }

        let Some(target) = ctx.matrix.channel_manager.find(channel) else {
            metrics::record_relay("remote", "no_such_channel");
            debug!(peer = %ctx.state.name, channel = %channel, "RRELAYMSG for unknown channel");
            return Ok(());
        };

        let event = RelayEvent {
            origin: Origin::Remote(origin.clone()),
            channel: channel.clone(),
            spoofed_nick: spoofed_nick.clone(),
            text: text.clone(),
            tags: msg.tags.clone().unwrap_or_default(),
        };

        let stats = deliver_to_channel(ctx.matrix, &target, &event, &policy).await;

        let frame = Arc::new(event.relay_frame(&ctx.matrix.server_info.name));
        let peers = ctx
            .matrix
            .link_manager
            .broadcast(frame, Some(ctx.state.sid.as_str()));

        metrics::record_relay("remote", "relayed");
        debug!(
            peer = %ctx.state.name,
            origin = %event.origin.id(),
            provenance = event.provenance(),
            channel = %event.channel,
            delivered = stats.delivered,
            forwarded = peers.sent,
            "Re-relayed message"
        );

        Ok(())
    }
}
