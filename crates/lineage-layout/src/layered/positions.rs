use crate::{Point, RankedGraph};

use super::Order;

/// Write final coordinates onto the graph from the committed order
///
/// `x` is the rank itself; `y` is the slot within the rank shifted so the
/// rank is centered around zero, one unit between neighbors. Mapping these
/// into pixels, curve routing and everything else visual belongs to the
/// rendering side.
pub(crate) fn assign_coordinates(graph: &mut RankedGraph, order: &Order) {
    for (rank, row) in order.iter().enumerate() {
        let offset = (row.len().saturating_sub(1)) as f32 / 2.0;
        for (slot, &id) in row.iter().enumerate() {
            if let Some(vertex) = graph.vertex_mut(id) {
                vertex.pos = Point::new(rank as f32, slot as f32 - offset);
            }
        }
    }
}
