//! RELAYMSG command handler.
//!
//! `RELAYMSG <channel> <spoofed nick> :<text>`
//!
//! Lets an authorized bridge client post into a channel as `<spoofed nick>`.
//! The line is delivered to local members with the configured display
//! hostmask and then propagated to every peer as `RRELAYMSG`.

use super::delivery::deliver_to_channel;
use crate::caps::CapabilityAuthority;
use crate::handlers::{Context, HandlerError, HandlerResult, PostRegHandler};
use crate::metrics;
use crate::relay::tags::origination_tags;
use crate::relay::{self, Origin, RELAYMSG_TAG, RelayEvent};
use crate::state::RegisteredState;
use async_trait::async_trait;
use relaymsg_proto::{Command, Message};
use std::sync::Arc;
use tracing::{debug, info};

pub struct RelayMsgHandler;

#[async_trait]
impl PostRegHandler for RelayMsgHandler {
    async fn handle(
        &self,
        ctx: &mut Context<'_, RegisteredState>,
        msg: &Message,
    ) -> HandlerResult {
        // Clients that never negotiated the extension don't get to know it exists.
        if !ctx.state.has_cap(RELAYMSG_TAG) {
            metrics::record_relay("local", "no_capability");
            debug!(uid = %ctx.uid, "RELAYMSG without draft/relaymsg capability, ignoring");
            return Ok(());
        }

        let authority = CapabilityAuthority::new(Arc::clone(ctx.matrix));
        let Some(cap) = authority.request_relaymsg_cap(ctx.uid).await else {
            metrics::record_relay("local", "no_privilege");
            return Err(HandlerError::NoPrivileges);
        };

        let Command::RELAYMSG(channel, spoofed_nick, text) = &msg.command else {
            metrics::record_relay("local", "malformed");
            return Err(HandlerError::NeedMoreParams);
        };

        let policy = ctx.matrix.policy.snapshot();
        if let Err(rejection) = relay::validate(spoofed_nick, policy.require_separator) {
            metrics::record_relay("local", rejection.as_str());
            debug!(nick = %spoofed_nick, reason = %rejection, "Rejected spoofed nick");
            let nick = ctx.state.nick.clone();
            return ctx.send_notice(&nick, rejection.notice_text()).await;
        }

        let Some(target) = ctx.matrix.channel_manager.find(channel) else {
            metrics::record_relay("local", "no_such_channel");
            return Err(HandlerError::NoSuchChannel(channel.clone()));
        };

        let nick = ctx.state.nick.clone();
        ctx.send_notice(&nick, format!("Sending message to {channel}"))
            .await?;

        let event = RelayEvent {
            origin: Origin::Local(cap.into_scope()),
            channel: channel.clone(),
            spoofed_nick: spoofed_nick.clone(),
            text: text.clone(),
            tags: origination_tags(&nick),
        };

        let stats = deliver_to_channel(ctx.matrix, &target, &event, &policy).await;

        let frame = Arc::new(event.relay_frame(&ctx.matrix.server_info.name));
        let peers = ctx.matrix.link_manager.broadcast(frame, None);

        metrics::record_relay("local", "relayed");
        info!(
            issuer = %nick,
            channel = %event.channel,
            spoofed = %event.spoofed_nick,
            delivered = stats.delivered,
            peers = peers.sent,
            "Relayed message"
        );

        Ok(())
    }
}
