//! Grid pathfinding support for the movement collaborator.
//!
//! [`PathNode`]'s priority ordering is the contract the search depends on:
//! lower total cost first, ties broken toward the node nearer the goal.
mod grid;
mod heap;
mod node;

pub use grid::PathGrid;
pub use heap::{HeapItem, OpenSet};
pub use node::PathNode;
