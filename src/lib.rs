//! relaymsgd - IRCv3 `draft/relaymsg` for bridge clients.
//!
//! Bridge clients holding the `relaymsg` privilege post into channels under
//! spoofed nicks with `RELAYMSG`; servers propagate those events with
//! `RRELAYMSG`. The display hostmask and separator policy come from the
//! `[relaymsg]` configuration block and can be rehashed at runtime.

pub mod caps;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod policy;
pub mod relay;
pub mod state;
pub mod telemetry;
