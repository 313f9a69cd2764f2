mod channel;
mod dashmap_ext;
mod links;
mod matrix;
mod session;
mod uid;
mod user;

pub use channel::{Channel, ChannelManager};
pub use dashmap_ext::DashMapExt;
pub use links::{BroadcastOutcome, Link, LinkManager};
pub use matrix::{Matrix, ServerInfo, Sid};
pub use session::{RegisteredState, ServerState};
pub use uid::{Uid, UidGenerator};
pub use user::{User, UserManager};
