//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR stores neighbor lists contiguously, which is what rank propagation
//! wants: every round walks all edges in the same order.

use super::builder::SimilarityGraph;

/// A sentence graph in Compressed Sparse Row format
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Neighbor indices, sorted ascending within each row
    pub col_idx: Vec<u32>,
    /// Similarity on each edge
    pub weights: Vec<f64>,
    /// Degree of each node
    pub degrees: Vec<u32>,
}

impl CsrGraph {
    /// Convert a [`SimilarityGraph`] into CSR format
    pub fn from_graph(graph: &SimilarityGraph) -> Self {
        let num_nodes = graph.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(graph.edge_count() * 2);
        let mut weights = Vec::with_capacity(graph.edge_count() * 2);
        let mut degrees = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for node in 0..num_nodes {
            // Sort for deterministic iteration
            let mut edges: Vec<(u32, f64)> = graph
                .edges_of(node)
                .map(|edges| edges.iter().map(|(&k, &v)| (k, v)).collect())
                .unwrap_or_default();
            edges.sort_by_key(|(k, _)| *k);

            degrees.push(edges.len() as u32);
            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            degrees,
        }
    }

    /// Iterate over neighbors of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Degree of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.degrees[node as usize]
    }

    /// Each undirected edge once, as `(i, j)` with `i < j`, in row order
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.num_nodes as u32).flat_map(move |node| {
            self.neighbors(node)
                .filter(move |&(target, _)| node < target)
                .map(move |(target, _)| (node, target))
        })
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Nodes without any edge
    pub fn isolated_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.degrees[n as usize] == 0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            degrees: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_graph() -> SimilarityGraph {
        let mut graph = SimilarityGraph::new(4);
        graph.add_edge(0, 2, 0.5);
        graph.add_edge(0, 1, 0.8);
        graph.add_edge(1, 2, 0.3);
        graph
    }

    #[test]
    fn test_csr_conversion() {
        let csr = CsrGraph::from_graph(&build_test_graph());

        assert_eq!(csr.num_nodes, 4);
        assert_eq!(csr.row_ptr, vec![0, 2, 4, 6, 6]);
        assert_eq!(csr.num_edges(), 3);
    }

    #[test]
    fn test_neighbors_sorted() {
        let csr = CsrGraph::from_graph(&build_test_graph());

        let neighbors: Vec<_> = csr.neighbors(0).collect();
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].0, 1);
        assert!((neighbors[0].1 - 0.8).abs() < 1e-10);
        assert_eq!(neighbors[1].0, 2);
    }

    #[test]
    fn test_degree() {
        let csr = CsrGraph::from_graph(&build_test_graph());

        assert_eq!(csr.degree(0), 2);
        assert_eq!(csr.degree(2), 2);
        assert_eq!(csr.degree(3), 0);
    }

    #[test]
    fn test_edges_listed_once() {
        let csr = CsrGraph::from_graph(&build_test_graph());

        let edges: Vec<_> = csr.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_isolated_nodes() {
        let csr = CsrGraph::from_graph(&build_test_graph());
        assert_eq!(csr.isolated_nodes(), vec![3]);
    }

    #[test]
    fn test_empty_graph() {
        let csr = CsrGraph::from_graph(&SimilarityGraph::new(0));

        assert!(csr.is_empty());
        assert_eq!(csr.num_edges(), 0);
        assert_eq!(csr.edges().count(), 0);
    }
}
