//! Render handles name host-side meshes and lines.
//!
//! The host creates one mesh per node and one line per edge. A handle pairs
//! the load generation with a slot so the host can tell a stale handle from a
//! live one after a dataset switch.

use std::fmt;

/// Token naming one host-side render object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle {
    pub generation: u32,
    pub slot: u32,
}

impl fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}:{})", self.generation, self.slot)
    }
}

/// Hands out handles for one load generation.
#[derive(Debug)]
pub struct HandleAllocator {
    generation: u32,
    next_slot: u32,
}

impl HandleAllocator {
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            next_slot: 0,
        }
    }

    pub fn allocate(&mut self) -> RenderHandle {
        let handle = RenderHandle {
            generation: self.generation,
            slot: self.next_slot,
        };
        self.next_slot += 1;
        handle
    }

    /// Number of handles allocated so far.
    pub fn allocated(&self) -> u32 {
        self.next_slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_sequential_slots() {
        let mut alloc = HandleAllocator::new(7);
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_eq!(a, RenderHandle { generation: 7, slot: 0 });
        assert_eq!(b, RenderHandle { generation: 7, slot: 1 });
        assert_eq!(alloc.allocated(), 2);
    }

    #[test]
    fn test_display() {
        let handle = RenderHandle { generation: 3, slot: 99 };
        assert_eq!(format!("{}", handle), "Handle(3:99)");
    }
}
