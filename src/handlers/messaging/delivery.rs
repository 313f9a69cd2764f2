//! Local fan-out of relay events.
//!
//! Every local member of the target channel receives the synthesized
//! `PRIVMSG`, the issuing bridge included. Tags are filtered per recipient
//! against that recipient's negotiated capabilities.

use crate::metrics;
use crate::policy::RelayPolicy;
use crate::relay::RelayEvent;
use crate::relay::tags::for_client;
use crate::state::{Channel, DashMapExt, Matrix};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{trace, warn};

/// Counts from one fan-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: usize,
    pub dropped: usize,
}

/// Deliver `event` to the local members of `channel`.
///
/// Sends never block: a recipient whose queue is full or closed loses the
/// line and is counted in [`DeliveryStats::dropped`].
pub async fn deliver_to_channel(
    matrix: &Matrix,
    channel: &RwLock<Channel>,
    event: &RelayEvent,
    policy: &RelayPolicy,
) -> DeliveryStats {
    let members: Vec<String> = channel.read().await.members.iter().cloned().collect();
    let base = event.channel_line(&policy.display_hostmask);
    let mut stats = DeliveryStats::default();

    for uid in members {
        let Some(sender) = matrix.user_manager.senders.get_cloned(&uid) else {
            trace!(uid = %uid, "Channel member has no local sender");
            continue;
        };
        let tags = match matrix.user_manager.get(&uid) {
            Some(user) => for_client(&event.tags, &user.read().await.caps),
            None => Vec::new(),
        };
        let line = base.clone().with_tags(Some(tags));

        match sender.try_send(Arc::new(line)) {
            Ok(()) => stats.delivered += 1,
            Err(e) => {
                stats.dropped += 1;
                metrics::record_dropped_delivery("client");
                warn!(uid = %uid, channel = %event.channel, error = %e, "Dropped relayed line");
            }
        }
    }

    metrics::record_fanout(stats.delivered);
    stats
}
