use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use crate::{RankedGraph, VertexId};

/// Derived statistics over a [`RankedGraph`]
///
/// A recomputable snapshot, not an authoritative store: [`update`] walks
/// the whole graph and rebuilds the maximum rank, the per-rank vertex
/// counts, the parent/child adjacency and the header classification. There
/// is no dirty tracking; callers must refresh the snapshot after any
/// mutation of the underlying graph or the accessors answer for stale
/// state.
///
/// [`update`]: GraphStatistics::update
#[derive(Debug, Clone)]
pub struct GraphStatistics {
    /// Internal adjacency representation for efficient lookups
    adjacency: DiGraphMap<VertexId, ()>,
    max_rank: usize,
    count_by_rank: Vec<usize>,
}

impl Default for GraphStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStatistics {
    pub fn new() -> Self {
        Self {
            adjacency: DiGraphMap::new(),
            max_rank: 0,
            count_by_rank: Vec::new(),
        }
    }

    /// Rebuild the snapshot from the current graph contents, O(V + E)
    pub fn update(&mut self, graph: &RankedGraph) {
        self.adjacency = DiGraphMap::new();
        self.max_rank = 0;
        self.count_by_rank.clear();

        for (&id, vertex) in graph.vertices() {
            self.adjacency.add_node(id);
            if vertex.rank >= self.count_by_rank.len() {
                self.count_by_rank.resize(vertex.rank + 1, 0);
            }
            self.count_by_rank[vertex.rank] += 1;
            self.max_rank = self.max_rank.max(vertex.rank);
        }

        // Adding edges in id order keeps every per-vertex neighbor list in
        // edge insertion order, which the ordering phase relies on.
        for edge in graph.edges().values() {
            self.adjacency.add_edge(edge.from, edge.to, ());
        }
    }

    /// Highest rank seen at the last [`update`](GraphStatistics::update)
    pub fn max_rank(&self) -> usize {
        self.max_rank
    }

    /// Number of vertices at `rank`, zero for ranks beyond the snapshot
    pub fn count_at_rank(&self, rank: usize) -> usize {
        self.count_by_rank.get(rank).copied().unwrap_or(0)
    }

    /// True iff no edge targets `id`
    ///
    /// Header vertices are the roots the ordering phase grows from. A
    /// header may sit at any rank, not just rank zero. Ids absent from the
    /// snapshot are not headers.
    pub fn is_header(&self, id: VertexId) -> bool {
        self.adjacency.contains_node(id)
            && self
                .adjacency
                .neighbors_directed(id, Direction::Incoming)
                .next()
                .is_none()
    }

    /// Sources of edges ending at `id`, in edge insertion order
    ///
    /// Empty for ids absent from the snapshot.
    pub fn parents_of(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.neighbors_directed(id, Direction::Incoming)
    }

    /// Targets of edges starting at `id`, in edge insertion order
    ///
    /// Empty for ids absent from the snapshot.
    pub fn children_of(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.neighbors_directed(id, Direction::Outgoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use test_log::test;

    fn fork() -> (RankedGraph, VertexId, VertexId, VertexId) {
        let mut graph = RankedGraph::new();
        let root = graph.add_vertex(0, Point::zero());
        let left = graph.add_vertex(1, Point::zero());
        let right = graph.add_vertex(1, Point::zero());
        graph.add_edge(root, left).unwrap();
        graph.add_edge(root, right).unwrap();
        (graph, root, left, right)
    }

    #[test]
    fn rank_counts_and_max() {
        let (graph, ..) = fork();
        let mut stats = GraphStatistics::new();
        stats.update(&graph);

        assert_eq!(stats.max_rank(), 1);
        assert_eq!(stats.count_at_rank(0), 1);
        assert_eq!(stats.count_at_rank(1), 2);
        assert_eq!(stats.count_at_rank(7), 0);
    }

    #[test]
    fn adjacency_in_edge_order() {
        let (graph, root, left, right) = fork();
        let mut stats = GraphStatistics::new();
        stats.update(&graph);

        let children: Vec<_> = stats.children_of(root).collect();
        assert_eq!(children, vec![left, right]);
        let parents: Vec<_> = stats.parents_of(left).collect();
        assert_eq!(parents, vec![root]);
    }

    #[test]
    fn headers_are_untargeted_vertices() {
        let (mut graph, root, left, _) = fork();
        // A feature first detected mid-sequence: header at a non-zero rank
        let late = graph.add_vertex(2, Point::zero());
        graph.add_edge(left, late).unwrap();
        let orphan = graph.add_vertex(3, Point::zero());

        let mut stats = GraphStatistics::new();
        stats.update(&graph);

        assert!(stats.is_header(root));
        assert!(!stats.is_header(left));
        assert!(!stats.is_header(late));
        assert!(stats.is_header(orphan));
        assert!(!stats.is_header(VertexId(999)));
    }

    #[test]
    fn unknown_ids_have_no_adjacency() {
        let (graph, ..) = fork();
        let mut stats = GraphStatistics::new();
        stats.update(&graph);

        assert_eq!(stats.parents_of(VertexId(999)).count(), 0);
        assert_eq!(stats.children_of(VertexId(999)).count(), 0);
    }

    #[test]
    fn update_replaces_previous_snapshot() {
        let (graph, root, ..) = fork();
        let mut stats = GraphStatistics::new();
        stats.update(&graph);
        assert_eq!(stats.children_of(root).count(), 2);

        let empty = RankedGraph::new();
        stats.update(&empty);
        assert_eq!(stats.max_rank(), 0);
        assert_eq!(stats.count_at_rank(0), 0);
        assert_eq!(stats.children_of(root).count(), 0);
    }
}
