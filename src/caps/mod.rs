//! Capability-based permissions.
//!
//! Privileged relay paths take a [`Cap<T>`] token instead of re-checking the
//! user's privileges inline. Only [`CapabilityAuthority`] can mint tokens,
//! and every grant or denial is logged.
//!
//! ```ignore
//! let authority = CapabilityAuthority::new(ctx.matrix.clone());
//! let cap = authority
//!     .request_relaymsg_cap(ctx.uid)
//!     .await
//!     .ok_or(HandlerError::NoPrivileges)?;
//! let origin = Origin::Local(cap.into_scope());
//! ```

mod authority;
mod irc;
mod tokens;

pub use authority::CapabilityAuthority;
pub use irc::RelayMsgCap;
pub use tokens::{Cap, Capability};
