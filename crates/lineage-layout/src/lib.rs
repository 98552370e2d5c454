//! Layered graph layout for ranked feature-lineage graphs
//!
//! This crate lays out directed graphs whose vertices already carry a rank
//! (a stage or time-step index assigned by the caller). It chooses a
//! left-to-right order within every rank that reduces edge crossings, then
//! writes a final position onto each vertex. Rank assignment, rendering and
//! interaction are all left to the caller.
//!
//! # Example
//!
//! ```
//! use lineage_layout::{LayeredLayout, Point, RankedGraph};
//!
//! // Two stages, one tracked feature splitting into two
//! let mut graph = RankedGraph::new();
//! let root = graph.add_vertex(0, Point::zero());
//! let left = graph.add_vertex(1, Point::zero());
//! let right = graph.add_vertex(1, Point::zero());
//! graph.add_edge(root, left)?;
//! graph.add_edge(root, right)?;
//!
//! LayeredLayout::default().run(&mut graph)?;
//!
//! // x is the rank, y the slot within the rank centered around zero
//! assert_eq!(graph.vertex(root).unwrap().pos, Point::new(0.0, 0.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod graph;
mod stats;

pub mod layered;

pub use graph::{Edge, EdgeId, GraphError, Point, RankedGraph, Vertex, VertexId};
pub use layered::{LayeredLayout, LayoutError};
pub use stats::GraphStatistics;
