use std::cmp::Ordering;

use glam::Vec3;

use super::heap::HeapItem;

/// One cell of a navigation grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    /// Walkable.
    pub clear: bool,
    pub position: Vec3,
    /// Cost of the best known route from the start.
    pub g_cost: i32,
    /// Heuristic cost to the goal.
    pub h_cost: i32,
    pub grid_x: i32,
    pub grid_y: i32,
    /// Arena index of the node this one was reached from.
    pub parent: Option<usize>,
    heap_index: usize,
}

impl PathNode {
    pub fn new(clear: bool, position: Vec3, grid_x: i32, grid_y: i32) -> Self {
        Self {
            clear,
            position,
            g_cost: 0,
            h_cost: 0,
            grid_x,
            grid_y,
            parent: None,
            heap_index: 0,
        }
    }

    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.g_cost + self.h_cost
    }

    /// Search priority: lower total cost first, then lower heuristic cost.
    ///
    /// `Greater` means `self` should be expanded before `other`.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        self.f_cost()
            .cmp(&other.f_cost())
            .then_with(|| self.h_cost.cmp(&other.h_cost))
            .reverse()
    }
}

impl HeapItem for PathNode {
    #[inline]
    fn heap_index(&self) -> usize {
        self.heap_index
    }

    #[inline]
    fn set_heap_index(&mut self, index: usize) {
        self.heap_index = index;
    }

    fn priority_cmp(&self, other: &Self) -> Ordering {
        PathNode::priority_cmp(self, other)
    }
}
