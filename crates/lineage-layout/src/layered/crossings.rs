use crate::{GraphStatistics, VertexId};

use super::Order;

/// Count the crossings contributed by the boundary between `rank` and the
/// rank above it
///
/// Two vertices of the same rank cross once for every pair of their
/// children whose slots in the next rank invert the parents' relative
/// order. Children that do not sit in the next rank (edges spanning more
/// than one rank, or edges pointing back down) project to nothing and
/// contribute no crossings.
pub(crate) fn boundary_crossings(stats: &GraphStatistics, order: &Order, rank: usize) -> usize {
    let Some(next) = order.get(rank + 1) else {
        return 0;
    };

    let row = &order[rank];
    let mut crossings = 0;
    for (slot, &left) in row.iter().enumerate() {
        let left_slots = projected_slots(stats, next, left);
        for &right in &row[slot + 1..] {
            let right_slots = projected_slots(stats, next, right);
            for &a in &left_slots {
                for &b in &right_slots {
                    if a > b {
                        crossings += 1;
                    }
                }
            }
        }
    }
    crossings
}

/// Total crossings over every adjacent rank pair
pub(crate) fn total_crossings(stats: &GraphStatistics, order: &Order) -> usize {
    (0..order.len())
        .map(|rank| boundary_crossings(stats, order, rank))
        .sum()
}

/// Slots in `next` occupied by the vertex's children, in adjacency order
fn projected_slots(stats: &GraphStatistics, next: &[VertexId], id: VertexId) -> Vec<usize> {
    stats
        .children_of(id)
        .filter_map(|child| next.iter().position(|&v| v == child))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, RankedGraph};
    use test_log::test;

    #[test]
    fn inverted_pair_crosses_once() {
        let mut graph = RankedGraph::new();
        let a = graph.add_vertex(0, Point::zero());
        let b = graph.add_vertex(0, Point::zero());
        let c = graph.add_vertex(1, Point::zero());
        let d = graph.add_vertex(1, Point::zero());
        graph.add_edge(a, d).unwrap();
        graph.add_edge(b, c).unwrap();

        let mut stats = GraphStatistics::new();
        stats.update(&graph);

        // a's child right of b's child when a is left of b: one crossing
        assert_eq!(
            boundary_crossings(&stats, &vec![vec![a, b], vec![c, d]], 0),
            1
        );
        // The untangled order of the same rank pair
        assert_eq!(
            boundary_crossings(&stats, &vec![vec![a, b], vec![d, c]], 0),
            0
        );
    }

    #[test]
    fn shared_children_do_not_cross_themselves() {
        let mut graph = RankedGraph::new();
        let a = graph.add_vertex(0, Point::zero());
        let b = graph.add_vertex(0, Point::zero());
        let c = graph.add_vertex(1, Point::zero());
        graph.add_edge(a, c).unwrap();
        graph.add_edge(b, c).unwrap();

        let mut stats = GraphStatistics::new();
        stats.update(&graph);
        assert_eq!(total_crossings(&stats, &vec![vec![a, b], vec![c]]), 0);
    }

    #[test]
    fn rank_spanning_edges_are_ignored() {
        let mut graph = RankedGraph::new();
        let a = graph.add_vertex(0, Point::zero());
        let b = graph.add_vertex(0, Point::zero());
        let near = graph.add_vertex(1, Point::zero());
        let far = graph.add_vertex(2, Point::zero());
        graph.add_edge(a, far).unwrap();
        graph.add_edge(b, near).unwrap();

        let mut stats = GraphStatistics::new();
        stats.update(&graph);

        // a's child skips rank 1 entirely, so the boundary sees one child
        let order = vec![vec![a, b], vec![near], vec![far]];
        assert_eq!(total_crossings(&stats, &order), 0);
    }

    #[test]
    fn totals_sum_every_boundary() {
        let mut graph = RankedGraph::new();
        let a = graph.add_vertex(0, Point::zero());
        let b = graph.add_vertex(0, Point::zero());
        let c = graph.add_vertex(1, Point::zero());
        let d = graph.add_vertex(1, Point::zero());
        let e = graph.add_vertex(2, Point::zero());
        let f = graph.add_vertex(2, Point::zero());
        graph.add_edge(a, d).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(c, f).unwrap();
        graph.add_edge(d, e).unwrap();

        let mut stats = GraphStatistics::new();
        stats.update(&graph);

        let order = vec![vec![a, b], vec![c, d], vec![e, f]];
        assert_eq!(boundary_crossings(&stats, &order, 0), 1);
        assert_eq!(boundary_crossings(&stats, &order, 1), 1);
        assert_eq!(total_crossings(&stats, &order), 2);
    }
}
