//! Layered (Sugiyama-style) ordering and coordinate assignment
//!
//! Ranks come in already assigned; the work here is picking an order
//! within each rank. Crossing minimization for layered graphs is NP-hard,
//! so the engine runs a bounded number of weighted-median sweeps with
//! transpose local search and keeps the best order it saw.

mod crossings;
mod ordering;
mod positions;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{GraphStatistics, RankedGraph, VertexId};

use crossings::total_crossings;
use ordering::{initial_order, transpose, wmedian};
use positions::assign_coordinates;

/// Vertex ids per rank, left to right; `order[r]` is always a permutation
/// of the vertices whose rank is `r`
pub(crate) type Order = Vec<Vec<VertexId>>;

/// Errors raised when the graph violates the layout preconditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A rank kept open slots after every header chain was placed: some
    /// vertex at this rank is unreachable from any header vertex
    #[error("rank {rank} has only {placed} of {expected} slots filled after placement")]
    IncompleteRank {
        rank: usize,
        placed: usize,
        expected: usize,
    },

    /// More vertices were routed to a rank than it has slots; a vertex's
    /// recorded rank disagrees with the rank statistics
    #[error("no open slot left at rank {rank} for vertex {vertex:?}")]
    RankOverflow { rank: usize, vertex: VertexId },
}

/// Configuration for the layered layout pass
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    /// Number of median/transpose improvement iterations
    pub iterations: usize,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self { iterations: 4 }
    }
}

impl LayeredLayout {
    /// Create a layout pass with the given iteration count
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    /// Lay out `graph`, writing a position onto every vertex
    ///
    /// Statistics are recomputed from the graph at entry, so the graph may
    /// have been mutated freely since the previous run. On success every
    /// vertex holds `x = rank` and `y = slot` within its rank, centered
    /// around zero and spaced one unit apart.
    ///
    /// # Errors
    /// [`LayoutError`] if some vertex cannot be reached from the header
    /// vertices, or a rank holds more vertices than its statistics claim.
    /// The graph's positions are untouched on error.
    pub fn run(&self, graph: &mut RankedGraph) -> Result<(), LayoutError> {
        let mut stats = GraphStatistics::new();
        stats.update(graph);

        let mut best = initial_order(graph, &stats)?;
        let mut best_crossings = total_crossings(&stats, &best);
        debug!(crossings = best_crossings, "initial ordering");

        let mut current = best.clone();
        for iteration in 0..self.iterations {
            let forward = iteration % 2 == 0;
            wmedian(&mut current, graph, &stats, forward);
            transpose(&mut current, &stats);

            let crossings = total_crossings(&stats, &current);
            trace!(iteration, forward, crossings, "improvement pass");
            if crossings < best_crossings {
                best_crossings = crossings;
                best = current.clone();
            }
        }
        debug!(crossings = best_crossings, "final ordering");

        assign_coordinates(graph, &best);
        Ok(())
    }
}
