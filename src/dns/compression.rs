use rustc_hash::FxHashMap;
use tracing::trace;

use super::name::Name;

/// Largest offset a compression pointer can encode (14 bits)
pub const MAX_POINTER: usize = 0x3fff;

/// Name-suffix to message-offset table shared by every name written into
/// one message. Owned by the message writer and threaded through each
/// record's `to_wire` call.
#[derive(Debug, Default, Clone)]
pub struct Compression {
    table: FxHashMap<Name, u16>,
}

impl Compression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that `name` was written at `offset`. Offsets past the pointer
    /// range and names already present are ignored.
    pub fn add(&mut self, offset: usize, name: &Name) {
        if offset > MAX_POINTER {
            return;
        }
        if !self.table.contains_key(name) {
            trace!("Compression: {} at offset {}", name, offset);
            self.table.insert(name.clone(), offset as u16);
        }
    }

    pub fn get(&self, name: &Name) -> Option<u16> {
        self.table.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
