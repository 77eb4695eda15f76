//! Edge extraction and the Euler characteristic.
//!
//! The Euler characteristic `V - E + F` is a cheap closure sanity check, not
//! a full manifold validator: a closed simple polyhedron-like surface yields
//! 2, anything else yields something different. The number is exposed to the
//! caller; nothing here asserts on it.

use hashbrown::HashSet;

use crate::TriMesh;

/// Normalize an edge to an unordered pair `[min, max]`.
fn edge_key(a: u32, b: u32) -> [u32; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

impl TriMesh {
    /// The set of distinct undirected edges across all faces.
    ///
    /// Each face contributes its three index pairs; pairs shared between
    /// faces collapse into one entry. Self-pairs from degenerate faces are
    /// not edges and are skipped.
    #[must_use]
    pub fn edges(&self) -> HashSet<[u32; 2]> {
        let mut edges = HashSet::with_capacity(self.faces.len() * 3 / 2);
        for &[a, b, c] in &self.faces {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                if u != v {
                    edges.insert(edge_key(u, v));
                }
            }
        }
        edges
    }

    /// The Euler characteristic `V - E + F`.
    ///
    /// `V` counts the distinct vertices referenced by faces (not the registry
    /// size — unreferenced vertices do not contribute), `E` the distinct
    /// undirected edges and `F` the faces. An empty face table yields 0; a
    /// closed simple surface yields 2.
    ///
    /// # Example
    ///
    /// ```
    /// use record_mesh::TriMesh;
    ///
    /// // A tetrahedron: 4 vertices, 6 edges, 4 faces.
    /// let mut mesh = TriMesh::new();
    /// mesh.add_face([0, 2, 1]);
    /// mesh.add_face([0, 1, 3]);
    /// mesh.add_face([1, 2, 3]);
    /// mesh.add_face([2, 0, 3]);
    ///
    /// assert_eq!(mesh.euler_characteristic(), 2);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // counts are far below i64::MAX
    pub fn euler_characteristic(&self) -> i64 {
        if self.faces.is_empty() {
            return 0;
        }

        let mut referenced: HashSet<u32> = HashSet::new();
        for face in &self.faces {
            referenced.extend(face);
        }

        let v = referenced.len() as i64;
        let e = self.edges().len() as i64;
        let f = self.faces.len() as i64;
        v - e + f
    }
}
