//! Bounded FIFO of variable-length messages in one fixed buffer (MFIFO).
//!
//! The caller supplies the backing storage. It is split into two regions:
//!
//! ```text
//! ┌──────────────────────────────┬───────────────────────────────────┐
//! │ slot index (max_slots × 8 B) │ payload area (remaining bytes)    │
//! └──────────────────────────────┴───────────────────────────────────┘
//! ```
//!
//! Each slot is an `(offset, length)` pair of little-endian `u32`s pointing
//! into the payload area. Slots are consumed strictly FIFO and one slot is
//! always kept empty, so at most `max_slots - 1` messages are stored.
//!
//! Every message occupies one contiguous run of the payload area. A write
//! goes after the newest message if it fits before the end of the area,
//! otherwise at the start of the area if it fits before the oldest message,
//! otherwise it fails. This gives up some utilisation so that [`peek`]
//! can hand out a plain slice into the buffer without copying.
//!
//! No allocation happens after construction.
//!
//! [`peek`]: FrameQueue::peek

use crate::error::QueueError;

/// Bytes per slot index entry.
const SLOT_SIZE: usize = 8;

/// Circular message queue over caller-provided storage.
#[derive(Debug, Clone)]
pub struct FrameQueue<B = Vec<u8>> {
    storage: B,
    max_slots: usize,
    /// Slot holding the oldest unread message
    first: usize,
    /// Slot the next write goes into
    next: usize,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameQueue<B> {
    /// Partition `storage` into a slot index of `max_slots` entries and a
    /// payload area made of the remaining bytes.
    pub fn new(storage: B, max_slots: usize) -> Result<Self, QueueError> {
        if max_slots < 2 {
            return Err(QueueError::InvalidSlotCount(max_slots));
        }

        let total = storage.as_ref().len();
        let index_len = max_slots.saturating_mul(SLOT_SIZE);
        if total <= index_len {
            return Err(QueueError::BufferTooSmall { needed: index_len, actual: total });
        }
        if u32::try_from(total).is_err() {
            return Err(QueueError::BufferTooLarge(total));
        }

        Ok(Self { storage, max_slots, first: 0, next: 0 })
    }

    /// Number of index slots, including the one kept empty.
    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// Size of the payload area in bytes.
    pub fn payload_capacity(&self) -> usize {
        self.storage.as_ref().len() - self.index_len()
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        (self.next + self.max_slots - self.first) % self.max_slots
    }

    /// Whether no message is stored.
    pub fn is_empty(&self) -> bool {
        self.first == self.next
    }

    /// Whether every usable slot is occupied.
    pub fn is_full(&self) -> bool {
        self.len() == self.max_slots - 1
    }

    /// Copy `message` into the queue.
    pub fn write(&mut self, message: &[u8]) -> Result<(), QueueError> {
        let offset = self.placement(message.len())?;

        let start = self.index_len() + offset;
        self.storage.as_mut()[start..start + message.len()].copy_from_slice(message);
        self.set_slot(self.next, offset, message.len());
        self.next = (self.next + 1) % self.max_slots;

        Ok(())
    }

    /// Copy `message` into the queue, evicting the oldest messages until it
    /// fits.
    ///
    /// Fails only when the message could not be stored even in an empty
    /// queue.
    pub fn write_overwrite(&mut self, message: &[u8]) -> Result<(), QueueError> {
        loop {
            match self.write(message) {
                Err(QueueError::SlotsExhausted(_) | QueueError::NoContiguousSpace(_))
                    if !self.is_empty() =>
                {
                    self.pop();
                },
                result => return result,
            }
        }
    }

    /// Oldest message, borrowed straight from the backing buffer.
    pub fn peek(&self) -> Option<&[u8]> {
        if self.is_empty() {
            return None;
        }

        let (offset, len) = self.slot(self.first);
        let start = self.index_len() + offset;
        Some(&self.storage.as_ref()[start..start + len])
    }

    /// Drop the oldest message. Returns `false` if the queue was empty.
    pub fn pop(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }

        self.first = (self.first + 1) % self.max_slots;
        true
    }

    /// Drop every stored message.
    pub fn clear(&mut self) {
        self.first = 0;
        self.next = 0;
    }

    fn index_len(&self) -> usize {
        self.max_slots * SLOT_SIZE
    }

    /// Payload-area offset for a new message of `len` bytes.
    fn placement(&self, len: usize) -> Result<usize, QueueError> {
        let capacity = self.payload_capacity();

        if len == 0 {
            return Err(QueueError::EmptyMessage);
        }
        if len > capacity {
            return Err(QueueError::MessageTooLarge { len, capacity });
        }
        if self.is_full() {
            return Err(QueueError::SlotsExhausted(self.max_slots - 1));
        }
        if self.is_empty() {
            return Ok(0);
        }

        let (first_occupied, _) = self.slot(self.first);
        let newest = (self.next + self.max_slots - 1) % self.max_slots;
        let (newest_offset, newest_len) = self.slot(newest);
        let first_free = newest_offset + newest_len;

        // Messages are never empty, so unwrapped data always ends strictly
        // after it starts.
        if first_free > first_occupied {
            if capacity - first_free >= len {
                return Ok(first_free);
            }
            if first_occupied >= len {
                return Ok(0);
            }
        } else if first_occupied - first_free >= len {
            return Ok(first_free);
        }

        Err(QueueError::NoContiguousSpace(len))
    }

    fn slot(&self, index: usize) -> (usize, usize) {
        let at = index * SLOT_SIZE;
        let entry = &self.storage.as_ref()[at..at + SLOT_SIZE];
        let offset = u32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]);
        let len = u32::from_le_bytes([entry[4], entry[5], entry[6], entry[7]]);
        (offset as usize, len as usize)
    }

    fn set_slot(&mut self, index: usize, offset: usize, len: usize) {
        let at = index * SLOT_SIZE;
        let entry = &mut self.storage.as_mut()[at..at + SLOT_SIZE];
        entry[..4].copy_from_slice(&(offset as u32).to_le_bytes());
        entry[4..].copy_from_slice(&(len as u32).to_le_bytes());
    }
}
