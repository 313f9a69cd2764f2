//! CAP command handler for registered clients.
//!
//! Supports `LS`, `LIST` and `REQ`. Negotiated capabilities are stored on the
//! session and mirrored onto the user record, which fan-out consults when
//! deciding which tags each recipient sees.

use super::{Context, HandlerError, HandlerResult, PostRegHandler};
use crate::state::RegisteredState;
use async_trait::async_trait;
use relaymsg_proto::caps::get_capability;
use relaymsg_proto::{CAPABILITIES, Command, Message, Prefix};
use tracing::debug;

pub struct CapHandler;

fn cap_reply(server_name: &str, nick: &str, subcommand: &str, body: String) -> Message {
    Message::from(Command::Raw(
        "CAP".to_string(),
        vec![nick.to_string(), subcommand.to_string(), body],
    ))
    .with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// Split a REQ body into `(enable, name)` pairs, or `None` if any name is unknown.
fn parse_request(body: &str) -> Option<Vec<(bool, &str)>> {
    body.split_whitespace()
        .map(|token| {
            let (enable, name) = match token.strip_prefix('-') {
                Some(name) => (false, name),
                None => (true, token),
            };
            get_capability(name).map(|_| (enable, name))
        })
        .collect()
}

#[async_trait]
impl PostRegHandler for CapHandler {
    async fn handle(
        &self,
        ctx: &mut Context<'_, RegisteredState>,
        msg: &Message,
    ) -> HandlerResult {
        let subcommand = msg
            .arg(0)
            .ok_or(HandlerError::NeedMoreParams)?
            .to_ascii_uppercase();
        let server_name = ctx.matrix.server_info.name.clone();

        match subcommand.as_str() {
            "LS" => {
                let requested = msg.arg(1).and_then(|v| v.parse::<u32>().ok()).unwrap_or(301);
                ctx.state.cap_version = ctx.state.cap_version.max(requested);
                let version = ctx.state.cap_version;
                let tokens: Vec<String> = CAPABILITIES
                    .iter()
                    .filter(|c| c.version <= version)
                    .map(|c| c.ls_token(version))
                    .collect();
                let reply = cap_reply(&server_name, &ctx.state.nick, "LS", tokens.join(" "));
                ctx.send(reply).await
            }
            "LIST" => {
                let mut enabled: Vec<&str> =
                    ctx.state.capabilities.iter().map(String::as_str).collect();
                enabled.sort_unstable();
                let reply = cap_reply(&server_name, &ctx.state.nick, "LIST", enabled.join(" "));
                ctx.send(reply).await
            }
            "REQ" => {
                let body = msg.arg(1).unwrap_or("");
                let Some(changes) = parse_request(body) else {
                    let reply = cap_reply(&server_name, &ctx.state.nick, "NAK", body.to_string());
                    return ctx.send(reply).await;
                };

                for (enable, name) in &changes {
                    if *enable {
                        ctx.state.capabilities.insert(name.to_string());
                    } else {
                        ctx.state.capabilities.remove(*name);
                    }
                }
                if let Some(user) = ctx.matrix.user_manager.get(ctx.uid) {
                    user.write().await.caps = ctx.state.capabilities.clone();
                }
                debug!(uid = %ctx.uid, caps = %body, "Capabilities updated");

                let reply = cap_reply(&server_name, &ctx.state.nick, "ACK", body.to_string());
                ctx.send(reply).await
            }
            other => {
                debug!(subcommand = %other, "Ignoring unsupported CAP subcommand");
                Ok(())
            }
        }
    }
}
