//! Generational slot storage for the nodes of a single tree.

use crate::node::{Node, NodeId};

#[derive(Clone)]
struct Slot<K> {
    /// Bumped every time the slot is vacated so old ids stop resolving.
    generation: u32,
    node: Option<Node<K>>,
}

/// Owns every node of a tree. Freed slots are recycled through `free`.
#[derive(Clone)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    free: Vec<u32>,
    len: usize,
}

impl<K> Default for Arena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn allocate(&mut self, node: Node<K>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                debug_assert!(slot.node.is_none(), "free list points at a live slot");
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = u32::try_from(self.slots.len()).expect("more than u32::MAX nodes");
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(index, 0)
            }
        }
    }

    /// Removes the node from the arena and returns it. Returns `None` for stale ids.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node<K>> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index() as u32);
        self.len -= 1;
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K>> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    /// Every live node, in slot order.
    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node<K>> {
        self.slots.iter_mut().filter_map(|slot| slot.node.as_mut())
    }

    /// Drops every node. Generations are kept (and bumped) so ids handed out before the clear
    /// stay stale forever. The slots are never shrunk.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.len = 0;
    }
}
