use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;

use crate::{GraphStatistics, RankedGraph, VertexId};

use super::crossings::boundary_crossings;
use super::{LayoutError, Order};

/// Build the initial per-rank order by growing each header's descendant
/// chain depth first
///
/// Headers are processed highest rank first, so late-appearing features
/// claim their slots before earlier chains reach the same ranks. Placing a
/// vertex takes the next open slot of its rank and then queues its
/// children in adjacency order; an already placed vertex is a no-op. Uses
/// an explicit stack so deep descendant chains cannot exhaust the call
/// stack.
pub(crate) fn initial_order(
    graph: &RankedGraph,
    stats: &GraphStatistics,
) -> Result<Order, LayoutError> {
    let mut order: Order = (0..=stats.max_rank())
        .map(|rank| Vec::with_capacity(stats.count_at_rank(rank)))
        .collect();

    let mut headers: Vec<VertexId> = graph
        .vertices()
        .keys()
        .copied()
        .filter(|&id| stats.is_header(id))
        .collect();
    headers.sort_by_key(|&id| Reverse(graph.vertex(id).map(|v| v.rank)));

    let mut placed: HashSet<VertexId> = HashSet::with_capacity(graph.vertices().len());
    let mut pending: Vec<VertexId> = Vec::new();
    for header in headers {
        pending.push(header);
        while let Some(id) = pending.pop() {
            if !placed.insert(id) {
                continue;
            }
            let Some(vertex) = graph.vertex(id) else {
                continue;
            };

            let slots = &mut order[vertex.rank];
            if slots.len() >= stats.count_at_rank(vertex.rank) {
                return Err(LayoutError::RankOverflow {
                    rank: vertex.rank,
                    vertex: id,
                });
            }
            slots.push(id);

            // Reversed so the children pop in adjacency order
            let children: Vec<VertexId> = stats.children_of(id).collect();
            for &child in children.iter().rev() {
                if !placed.contains(&child) {
                    pending.push(child);
                }
            }
        }
    }

    for (rank, slots) in order.iter().enumerate() {
        let expected = stats.count_at_rank(rank);
        if slots.len() != expected {
            return Err(LayoutError::IncompleteRank {
                rank,
                placed: slots.len(),
                expected,
            });
        }
    }
    Ok(order)
}

/// One weighted-median sweep over all ranks
///
/// A forward sweep walks ranks upward, reordering each rank by the median
/// position of its parents; a backward sweep walks downward using the
/// children. The re-sort is stable, so vertices with equal medians keep
/// their relative order and repeated runs stay deterministic.
pub(crate) fn wmedian(
    order: &mut Order,
    graph: &RankedGraph,
    stats: &GraphStatistics,
    forward: bool,
) {
    if forward {
        for rank in 1..order.len() {
            reorder_rank(order, graph, stats, rank, forward);
        }
    } else {
        for rank in (0..order.len().saturating_sub(1)).rev() {
            reorder_rank(order, graph, stats, rank, forward);
        }
    }
}

fn reorder_rank(
    order: &mut Order,
    graph: &RankedGraph,
    stats: &GraphStatistics,
    rank: usize,
    forward: bool,
) {
    let mut keyed: Vec<(f32, VertexId)> = order[rank]
        .iter()
        .map(|&id| {
            let adjacent: Vec<VertexId> = if forward {
                stats.parents_of(id).collect()
            } else {
                stats.children_of(id).collect()
            };
            let positions: Vec<f32> = adjacent
                .into_iter()
                .filter_map(|other| position_of(order, graph, other))
                .map(|slot| slot as f32)
                .collect();
            (median_value(positions), id)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    order[rank] = keyed.into_iter().map(|(_, id)| id).collect();
}

/// Slot of `id` within its own rank's order
fn position_of(order: &Order, graph: &RankedGraph, id: VertexId) -> Option<usize> {
    let vertex = graph.vertex(id)?;
    order.get(vertex.rank)?.iter().position(|&v| v == id)
}

/// Median of the adjacent slots, per the weighted-median heuristic
///
/// No neighbors yields the -1 sentinel, which sorts before every real
/// slot. The even case beyond two elements interpolates between the two
/// middle values, weighted toward the side whose values spread wider; a
/// zero spread on both sides degenerates to the plain two-element mean.
fn median_value(mut positions: Vec<f32>) -> f32 {
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = positions.len();
    let m = n / 2;
    match n {
        0 => -1.0,
        _ if n % 2 == 1 => positions[m],
        2 => (positions[0] + positions[1]) / 2.0,
        _ => {
            let left = positions[m - 1] - positions[0];
            let right = positions[n - 1] - positions[m];
            if left + right == 0.0 {
                (positions[m - 1] + positions[m]) / 2.0
            } else {
                (positions[m - 1] * right + positions[m] * left) / (left + right)
            }
        }
    }
}

/// Swap adjacent vertices while doing so strictly reduces the crossings at
/// their rank boundary, until a full scan finds no improving swap
///
/// The boundary is always measured through child adjacency against the
/// next rank, whichever direction the enclosing sweep ran. Each kept swap
/// strictly decreases a non-negative count, so the scan terminates.
pub(crate) fn transpose(order: &mut Order, stats: &GraphStatistics) {
    let mut improved = true;
    while improved {
        improved = false;
        for rank in 0..order.len().saturating_sub(1) {
            for slot in 0..order[rank].len().saturating_sub(1) {
                let before = boundary_crossings(stats, order, rank);
                order[rank].swap(slot, slot + 1);
                let after = boundary_crossings(stats, order, rank);
                if after < before {
                    improved = true;
                } else {
                    order[rank].swap(slot, slot + 1);
                }
            }
        }
    }
}
