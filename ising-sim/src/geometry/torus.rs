/// Periodic 2D square lattice with a precomputed neighbor table.
///
/// Sites are indexed in row-major order, so site `(i, j)` has flat index
/// `i * cols + j`. Every site has exactly four neighbors, wrapped modulo the
/// lattice extent along each axis (toroidal boundary).
#[derive(Debug, Clone)]
pub struct Torus {
    rows: usize,
    cols: usize,
    /// Neighbor table, length `n_sites * 4`.
    /// Layout: `neighbors[i * 4 + slot]` with slots ordered up, down, left, right.
    neighbors: Vec<u32>,
}

impl Torus {
    /// Build the topology for a `rows x cols` grid.
    ///
    /// Both extents must be at least 1. A 1-wide axis wraps onto itself, so a
    /// site can be its own neighbor.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "lattice extent must be positive");

        let n_sites = rows * cols;
        let mut neighbors = vec![0u32; n_sites * 4];

        for i in 0..rows {
            for j in 0..cols {
                let site = i * cols + j;
                let up = (i + rows - 1) % rows;
                let down = (i + 1) % rows;
                let left = (j + cols - 1) % cols;
                let right = (j + 1) % cols;
                neighbors[site * 4] = (up * cols + j) as u32;
                neighbors[site * 4 + 1] = (down * cols + j) as u32;
                neighbors[site * 4 + 2] = (i * cols + left) as u32;
                neighbors[site * 4 + 3] = (i * cols + right) as u32;
            }
        }

        Self {
            rows,
            cols,
            neighbors,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn n_sites(&self) -> usize {
        self.rows * self.cols
    }

    /// Flat index of `(row, col)`, both taken modulo the lattice extent.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        (row % self.rows) * self.cols + col % self.cols
    }

    /// The four neighbors of `site` in up, down, left, right order.
    #[inline]
    pub fn neighbors(&self, site: usize) -> &[u32] {
        &self.neighbors[site * 4..site * 4 + 4]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_neighbors() {
        // 3x4 lattice, site (1,1) = 5
        let t = Torus::new(3, 4);
        assert_eq!(t.n_sites(), 12);
        assert_eq!(t.neighbors(5), &[1, 9, 4, 6]);
    }

    #[test]
    fn test_edges_wrap() {
        let t = Torus::new(3, 4);

        // (0,0): up wraps to (2,0)=8, left wraps to (0,3)=3
        assert_eq!(t.neighbors(0), &[8, 4, 3, 1]);

        // (2,3): down wraps to (0,3)=3, right wraps to (2,0)=8
        assert_eq!(t.neighbors(11), &[7, 3, 10, 8]);

        // last column of row 1: (1,3)=7 -> right (1,0)=4
        assert_eq!(t.neighbors(7)[3], 4);
    }

    #[test]
    fn test_index_wraps() {
        let t = Torus::new(3, 4);
        assert_eq!(t.index(3, 0), 0);
        assert_eq!(t.index(1, 5), t.index(1, 1));
        assert_eq!(t.index(2, 3), 11);
    }

    #[test]
    fn test_every_site_has_four_neighbors() {
        let t = Torus::new(5, 5);
        for site in 0..t.n_sites() {
            let nb = t.neighbors(site);
            assert_eq!(nb.len(), 4);
            // the relation is symmetric: each neighbor lists `site` back
            for &j in nb {
                assert!(t.neighbors(j as usize).contains(&(site as u32)));
            }
        }
    }
}
