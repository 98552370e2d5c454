use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while mutating a [`RankedGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint does not name a vertex of this graph
    #[error("edge references unknown vertex {0:?}")]
    UnknownVertex(VertexId),

    /// Both edge endpoints sit at the same rank
    #[error("edge {from:?} -> {to:?} connects two vertices at rank {rank}")]
    SameRank {
        from: VertexId,
        to: VertexId,
        rank: usize,
    },
}

/// Identifier of a vertex within its owning [`RankedGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u64);

/// Identifier of an edge within its owning [`RankedGraph`]
///
/// Edge ids live in their own id space, disjoint from vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u64);

/// 2D position with f32 coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// A tracked feature at one stage of the sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Stage or time-step index, assigned by the caller and fixed for the
    /// duration of a layout run
    pub rank: usize,

    /// Final position, written by [`LayeredLayout::run`](crate::LayeredLayout::run)
    pub pos: Point,
}

/// A correspondence between two features at different stages
///
/// Holds vertex ids only, never ownership of the vertices themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
}

/// A directed graph whose vertices carry caller-assigned ranks
///
/// Pure data container: vertices and edges are added one at a time and
/// never removed. Storage is keyed by id in `BTreeMap`s so that iteration
/// order is deterministic regardless of insertion pattern.
#[derive(Debug, Clone, Default)]
pub struct RankedGraph {
    vertices: BTreeMap<VertexId, Vertex>,
    edges: BTreeMap<EdgeId, Edge>,
    next_vertex: u64,
    next_edge: u64,
}

impl RankedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex at the given rank and return its fresh id
    ///
    /// The position is a placeholder until the layout engine overwrites it.
    pub fn add_vertex(&mut self, rank: usize, pos: Point) -> VertexId {
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;
        self.vertices.insert(id, Vertex { rank, pos });
        id
    }

    /// Add an edge between two existing vertices of different ranks
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if either endpoint is not a vertex of
    /// this graph, [`GraphError::SameRank`] if both endpoints share a rank.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<EdgeId, GraphError> {
        let from_rank = self
            .vertices
            .get(&from)
            .ok_or(GraphError::UnknownVertex(from))?
            .rank;
        let to_rank = self
            .vertices
            .get(&to)
            .ok_or(GraphError::UnknownVertex(to))?
            .rank;
        if from_rank == to_rank {
            return Err(GraphError::SameRank {
                from,
                to,
                rank: from_rank,
            });
        }

        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.insert(id, Edge { from, to });
        Ok(id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(&id)
    }

    /// All vertices, keyed by id
    pub fn vertices(&self) -> &BTreeMap<VertexId, Vertex> {
        &self.vertices
    }

    /// All edges, keyed by id, in insertion order
    pub fn edges(&self) -> &BTreeMap<EdgeId, Edge> {
        &self.edges
    }
}
