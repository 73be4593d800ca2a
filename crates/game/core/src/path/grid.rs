//! Navigation grid with 8-neighbour A*.

use arrayvec::ArrayVec;
use glam::Vec3;

use super::heap::OpenSet;
use super::node::PathNode;

const STRAIGHT_COST: i32 = 10;
const DIAGONAL_COST: i32 = 14;

/// Rectangular grid of [`PathNode`]s laid out on the XZ plane.
#[derive(Clone, Debug)]
pub struct PathGrid {
    width: i32,
    height: i32,
    cell_size: f32,
    /// World position of the centre of cell (0, 0).
    origin: Vec3,
    nodes: Vec<PathNode>,
}

impl PathGrid {
    /// Builds a grid, asking `is_clear` whether each cell is walkable.
    pub fn new(
        width: i32,
        height: i32,
        cell_size: f32,
        origin: Vec3,
        is_clear: impl Fn(i32, i32) -> bool,
    ) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        let mut nodes = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let position = origin + Vec3::new(x as f32 * cell_size, 0.0, y as f32 * cell_size);
                nodes.push(PathNode::new(is_clear(x, y), position, x, y));
            }
        }
        Self {
            width,
            height,
            cell_size,
            origin,
            nodes,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn node(&self, x: i32, y: i32) -> Option<&PathNode> {
        self.index_of(x, y).map(|i| &self.nodes[i])
    }

    pub fn set_clear(&mut self, x: i32, y: i32, clear: bool) {
        if let Some(i) = self.index_of(x, y) {
            self.nodes[i].clear = clear;
        }
    }

    /// Cell containing a world position, clamped to the grid.
    pub fn cell_at(&self, position: Vec3) -> Option<(i32, i32)> {
        if self.nodes.is_empty() || self.cell_size <= 0.0 {
            return None;
        }
        let local = (position - self.origin) / self.cell_size;
        let x = (local.x.round() as i32).clamp(0, self.width - 1);
        let y = (local.z.round() as i32).clamp(0, self.height - 1);
        Some((x, y))
    }

    /// Octile distance in grid cost units.
    pub fn distance(a: &PathNode, b: &PathNode) -> i32 {
        let dx = (a.grid_x - b.grid_x).abs();
        let dy = (a.grid_y - b.grid_y).abs();
        if dx > dy {
            DIAGONAL_COST * dy + STRAIGHT_COST * (dx - dy)
        } else {
            DIAGONAL_COST * dx + STRAIGHT_COST * (dy - dx)
        }
    }

    /// Waypoints from the cell under `start` to the cell under `goal`,
    /// inclusive of the goal cell and exclusive of the start cell.
    ///
    /// `None` when either end is blocked or no route exists.
    pub fn find_path(&mut self, start: Vec3, goal: Vec3) -> Option<Vec<Vec3>> {
        let (sx, sy) = self.cell_at(start)?;
        let (gx, gy) = self.cell_at(goal)?;
        let start = self.index_of(sx, sy)?;
        let goal = self.index_of(gx, gy)?;
        if !self.nodes[start].clear || !self.nodes[goal].clear {
            return None;
        }

        for node in &mut self.nodes {
            node.g_cost = 0;
            node.h_cost = 0;
            node.parent = None;
        }

        let mut open = OpenSet::with_capacity(self.nodes.len());
        let mut closed = vec![false; self.nodes.len()];
        open.push(&mut self.nodes, start);

        while let Some(current) = open.pop(&mut self.nodes) {
            closed[current] = true;
            if current == goal {
                return Some(self.retrace(start, goal));
            }

            for next in self.neighbours(current) {
                if !self.nodes[next].clear || closed[next] {
                    continue;
                }
                let cost = self.nodes[current].g_cost
                    + Self::distance(&self.nodes[current], &self.nodes[next]);
                let queued = open.contains(&self.nodes, next);
                if queued && cost >= self.nodes[next].g_cost {
                    continue;
                }

                let h_cost = Self::distance(&self.nodes[next], &self.nodes[goal]);
                let node = &mut self.nodes[next];
                node.g_cost = cost;
                node.h_cost = h_cost;
                node.parent = Some(current);
                if queued {
                    open.update(&mut self.nodes, next);
                } else {
                    open.push(&mut self.nodes, next);
                }
            }
        }

        tracing::trace!(?start, ?goal, "no path");
        None
    }

    fn retrace(&self, start: usize, goal: usize) -> Vec<Vec3> {
        let mut path = Vec::new();
        let mut current = goal;
        while current != start {
            path.push(self.nodes[current].position);
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        ((0..self.width).contains(&x) && (0..self.height).contains(&y))
            .then(|| (y * self.width + x) as usize)
    }

    fn neighbours(&self, index: usize) -> ArrayVec<usize, 8> {
        let node = &self.nodes[index];
        let mut out = ArrayVec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(i) = self.index_of(node.grid_x + dx, node.grid_y + dy) {
                    out.push(i);
                }
            }
        }
        out
    }
}
