//! Cleanup passes: duplicate and degenerate face removal.
//!
//! Generators append faces without validation and run these passes once
//! before export (see the crate docs on batch-then-clean).

use hashbrown::HashSet;
use tracing::debug;

use crate::TriMesh;

impl TriMesh {
    /// Remove exact repeated faces, keeping the first occurrence.
    ///
    /// Two faces are duplicates only when their index triples are identical
    /// in the same order — a reversed or rotated triple has different winding
    /// and is kept. Relative order of the remaining faces is preserved.
    ///
    /// Returns the number of faces removed.
    ///
    /// # Example
    ///
    /// ```
    /// use record_mesh::TriMesh;
    ///
    /// let mut mesh = TriMesh::new();
    /// mesh.add_face([0, 1, 2]);
    /// mesh.add_face([0, 1, 2]);
    /// mesh.add_face([2, 1, 0]); // reversed winding: a different face
    ///
    /// assert_eq!(mesh.remove_duplicate_faces(), 1);
    /// assert_eq!(mesh.faces, vec![[0, 1, 2], [2, 1, 0]]);
    /// ```
    pub fn remove_duplicate_faces(&mut self) -> usize {
        let before = self.faces.len();

        let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(before);
        self.faces.retain(|face| seen.insert(*face));

        let removed = before - self.faces.len();
        if removed > 0 {
            debug!(removed, "removed duplicate faces");
        }
        removed
    }

    /// Remove degenerate faces: any face with two or more equal indices.
    ///
    /// Such faces are collinear or zero-area by construction. Relative order
    /// of the remaining faces is preserved.
    ///
    /// Returns the number of faces removed.
    ///
    /// # Example
    ///
    /// ```
    /// use record_mesh::TriMesh;
    ///
    /// let mut mesh = TriMesh::new();
    /// mesh.add_face([0, 1, 2]);
    /// mesh.add_face([0, 0, 2]);
    /// mesh.add_face([3, 3, 3]);
    ///
    /// assert_eq!(mesh.remove_degenerate_faces(), 2);
    /// assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    /// ```
    pub fn remove_degenerate_faces(&mut self) -> usize {
        let before = self.faces.len();

        self.faces
            .retain(|&[a, b, c]| a != b && b != c && a != c);

        let removed = before - self.faces.len();
        if removed > 0 {
            debug!(removed, "removed degenerate faces");
        }
        removed
    }
}
