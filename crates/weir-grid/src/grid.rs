//! 1D node grid over a single channel reach.

use std::ops::Range;

use weir_core::ConfigError;

/// A one-dimensional, uniformly spaced node grid.
///
/// Node `j` sits at `x_j = j * spacing` for `0 <= j < node_count`, so the
/// first and last nodes lie exactly on the ends of the reach. Nodes `0`
/// and `node_count - 1` are boundary nodes; everything in
/// [`interior()`](Grid::interior) has two neighbours.
///
/// # Examples
///
/// ```
/// use weir_grid::Grid;
///
/// let grid = Grid::new(1000.0, 101).unwrap();
/// assert_eq!(grid.node_count(), 101);
/// assert_eq!(grid.spacing(), 10.0);
/// assert_eq!(grid.position(50), 500.0);
/// assert_eq!(grid.interior(), 1..100);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    length: f64,
    node_count: usize,
    spacing: f64,
}

impl Grid {
    /// Smallest node count that leaves at least one interior node.
    pub const MIN_NODES: usize = 3;

    /// Create a grid of `node_count` nodes spanning `length` metres.
    ///
    /// Returns `Err(ConfigError::InvalidGrid)` if `node_count < 3` or
    /// `length` is not finite and positive.
    pub fn new(length: f64, node_count: usize) -> Result<Self, ConfigError> {
        if node_count < Self::MIN_NODES {
            return Err(ConfigError::InvalidGrid {
                reason: format!(
                    "node_count must be >= {} (got {node_count})",
                    Self::MIN_NODES
                ),
            });
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(ConfigError::InvalidGrid {
                reason: format!("length must be finite and > 0 (got {length})"),
            });
        }
        let spacing = length / (node_count - 1) as f64;
        // Subnormal lengths with many nodes can underflow to zero.
        if spacing <= 0.0 {
            return Err(ConfigError::InvalidGrid {
                reason: format!("spacing underflows for length {length} with {node_count} nodes"),
            });
        }
        Ok(Self {
            length,
            node_count,
            spacing,
        })
    }

    /// Reach length in metres.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of nodes, including both boundary nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Distance between adjacent nodes in metres.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Index of the right boundary node.
    pub fn last(&self) -> usize {
        self.node_count - 1
    }

    /// Indices of the interior nodes, `1..N-1`.
    pub fn interior(&self) -> Range<usize> {
        1..self.node_count - 1
    }

    /// Position of node `j` in metres from the left end.
    pub fn position(&self, j: usize) -> f64 {
        j as f64 * self.spacing
    }

    /// Positions of every node, in node order.
    pub fn positions(&self) -> Vec<f64> {
        (0..self.node_count).map(|j| self.position(j)).collect()
    }
}
