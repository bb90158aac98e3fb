//! Object id generation.
//!
//! Layout matches the document store's native ids: 4 bytes of big-endian
//! Unix seconds, 5 random bytes fixed per generator, and a 3-byte
//! big-endian counter seeded randomly.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use rand_core::{OsRng, RngCore};
use roster_core::{PersonId, id::ID_LEN};

const COUNTER_MASK: u32 = 0x00ff_ffff;

pub(crate) struct IdGenerator {
  process: [u8; 5],
  counter: AtomicU32,
}

impl IdGenerator {
  pub fn new() -> Self {
    let mut process = [0u8; 5];
    OsRng.fill_bytes(&mut process);
    Self {
      process,
      counter: AtomicU32::new(OsRng.next_u32() & COUNTER_MASK),
    }
  }

  pub fn next_id(&self) -> PersonId {
    let secs = Utc::now().timestamp() as u32;
    let count = self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

    let mut bytes = [0u8; ID_LEN];
    bytes[0..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..9].copy_from_slice(&self.process);
    bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
    PersonId::from_bytes(bytes)
  }
}
