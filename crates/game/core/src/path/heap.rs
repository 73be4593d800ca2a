//! Indexed binary heap over an external node arena.
//!
//! Items record their own position in the heap, which lets the search move a
//! node up after lowering its cost without scanning for it.

use std::cmp::Ordering;

/// An item that can sit in an [`OpenSet`].
pub trait HeapItem {
    fn heap_index(&self) -> usize;

    fn set_heap_index(&mut self, index: usize);

    /// `Greater` when `self` should come out of the heap before `other`.
    fn priority_cmp(&self, other: &Self) -> Ordering;
}

/// Max-priority heap of arena indices.
#[derive(Clone, Debug, Default)]
pub struct OpenSet {
    slots: Vec<usize>,
}

impl OpenSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn push<T: HeapItem>(&mut self, arena: &mut [T], item: usize) {
        arena[item].set_heap_index(self.slots.len());
        self.slots.push(item);
        self.sift_up(arena, item);
    }

    /// Removes the highest-priority item.
    pub fn pop<T: HeapItem>(&mut self, arena: &mut [T]) -> Option<usize> {
        let first = *self.slots.first()?;
        let last = self.slots.pop()?;
        if last != first {
            self.slots[0] = last;
            arena[last].set_heap_index(0);
            self.sift_down(arena, last);
        }
        Some(first)
    }

    /// Restores heap order after `item`'s priority increased.
    pub fn update<T: HeapItem>(&mut self, arena: &mut [T], item: usize) {
        self.sift_up(arena, item);
    }

    pub fn contains<T: HeapItem>(&self, arena: &[T], item: usize) -> bool {
        self.slots.get(arena[item].heap_index()) == Some(&item)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    fn sift_up<T: HeapItem>(&mut self, arena: &mut [T], item: usize) {
        loop {
            let index = arena[item].heap_index();
            if index == 0 {
                return;
            }
            let parent = self.slots[(index - 1) / 2];
            if arena[item].priority_cmp(&arena[parent]) != Ordering::Greater {
                return;
            }
            self.swap(arena, item, parent);
        }
    }

    fn sift_down<T: HeapItem>(&mut self, arena: &mut [T], item: usize) {
        loop {
            let index = arena[item].heap_index();
            let left = index * 2 + 1;
            let right = left + 1;
            if left >= self.slots.len() {
                return;
            }

            let mut child = self.slots[left];
            if right < self.slots.len()
                && arena[self.slots[right]].priority_cmp(&arena[child]) == Ordering::Greater
            {
                child = self.slots[right];
            }
            if arena[item].priority_cmp(&arena[child]) != Ordering::Less {
                return;
            }
            self.swap(arena, item, child);
        }
    }

    fn swap<T: HeapItem>(&mut self, arena: &mut [T], a: usize, b: usize) {
        let (ia, ib) = (arena[a].heap_index(), arena[b].heap_index());
        self.slots.swap(ia, ib);
        arena[a].set_heap_index(ib);
        arena[b].set_heap_index(ia);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathNode;
    use glam::Vec3;

    fn arena(costs: &[(i32, i32)]) -> Vec<PathNode> {
        costs
            .iter()
            .map(|&(g, h)| {
                let mut n = PathNode::new(true, Vec3::ZERO, 0, 0);
                n.g_cost = g;
                n.h_cost = h;
                n
            })
            .collect()
    }

    #[test]
    fn pops_in_priority_order() {
        let mut nodes = arena(&[(30, 10), (10, 10), (20, 0), (10, 20), (5, 50)]);
        let mut open = OpenSet::default();
        for i in 0..nodes.len() {
            open.push(&mut nodes, i);
        }

        let order: Vec<usize> = std::iter::from_fn(|| open.pop(&mut nodes)).collect();
        // f: 40, 20, 20, 30, 55; ties broken on h (2 has h=0)
        assert_eq!(order, vec![2, 1, 3, 0, 4]);
    }

    #[test]
    fn update_after_cost_drop_repositions_the_node() {
        let mut nodes = arena(&[(10, 10), (20, 10), (30, 10), (40, 10)]);
        let mut open = OpenSet::default();
        for i in 0..nodes.len() {
            open.push(&mut nodes, i);
        }

        nodes[3].g_cost = 0;
        open.update(&mut nodes, 3);
        nodes[2].g_cost = 5;
        open.update(&mut nodes, 2);

        assert_eq!(open.pop(&mut nodes), Some(3));
        assert_eq!(open.pop(&mut nodes), Some(2));
        assert_eq!(open.pop(&mut nodes), Some(0));
        assert_eq!(open.pop(&mut nodes), Some(1));
        assert_eq!(open.pop(&mut nodes), None);
    }

    #[test]
    fn contains_tracks_membership() {
        let mut nodes = arena(&[(1, 1), (2, 2)]);
        let mut open = OpenSet::default();
        open.push(&mut nodes, 1);
        assert!(open.contains(&nodes, 1));
        assert!(!open.contains(&nodes, 0));
        open.pop(&mut nodes);
        assert!(!open.contains(&nodes, 1));
    }
}
