//! UID generation for TS6-style user identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a user (TS6 UID string).
pub type Uid = String;

/// Generates unique user IDs (UIDs) in TS6 format.
///
/// Format: SID (3 chars) + Client ID (6 chars base36) = 9 chars total.
/// Example: "001AAAAAA"
pub struct UidGenerator {
    sid: String,
    counter: AtomicU64,
}

impl UidGenerator {
    pub fn new(sid: String) -> Self {
        Self {
            sid,
            counter: AtomicU64::new(0),
        }
    }

    /// Generate the next unique UID.
    pub fn next(&self) -> Uid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.sid, base36_encode_6(n))
    }
}

fn base36_encode_6(mut n: u64) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut result = [b'A'; 6];

    for slot in result.iter_mut().rev() {
        *slot = CHARS[(n % 36) as usize];
        n /= 36;
    }

    String::from_utf8_lossy(&result).into_owned()
}
