//! Snowflake ID Generator
//!
//! Twitter-style distributed unique ID generation for rooms and messages.
//!
//! ```text
//! 63                      22       17       12          0
//! +-------------------------+--------+--------+----------+
//! |  ms since ROOM_EPOCH    | machine|  node  | sequence |
//! +-------------------------+--------+--------+----------+
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Custom epoch (2024-01-01T00:00:00.000Z)
pub const ROOM_EPOCH: u64 = 1_704_067_200_000;

const SEQUENCE_BITS: u64 = 12;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Snowflake ID generator
///
/// Lock-free: the last timestamp and sequence are packed into one atomic so
/// concurrent callers never observe the same `(timestamp, sequence)` pair.
pub struct SnowflakeGenerator {
    machine_id: u64,
    node_id: u64,
    /// `(timestamp << SEQUENCE_BITS) | sequence` of the last issued ID
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64, node_id: u64) -> Self {
        Self {
            machine_id: machine_id & 0x1F, // 5 bits
            node_id: node_id & 0x1F,       // 5 bits
            state: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let last_ts = current >> SEQUENCE_BITS;
            let now = current_timestamp().max(last_ts);

            let next = if now == last_ts {
                let sequence = (current & SEQUENCE_MASK) + 1;
                if sequence > SEQUENCE_MASK {
                    // Sequence exhausted for this millisecond, borrow the next one
                    (now + 1) << SEQUENCE_BITS
                } else {
                    (now << SEQUENCE_BITS) | sequence
                }
            } else {
                now << SEQUENCE_BITS
            };

            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return self.compose(next),
                Err(actual) => current = actual,
            }
        }
    }

    fn compose(&self, state: u64) -> i64 {
        let timestamp = state >> SEQUENCE_BITS;
        let sequence = state & SEQUENCE_MASK;

        let id = (timestamp.saturating_sub(ROOM_EPOCH) << 22)
            | (self.machine_id << 17)
            | (self.node_id << 12)
            | sequence;

        id as i64
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
