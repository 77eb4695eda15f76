//! The [`TriMesh`] type: a deduplicating vertex registry plus a face table.

use hashbrown::HashMap;
use nalgebra::Point3;

/// An indexed triangle mesh with value-deduplicated vertices.
///
/// Vertices live in an arena (`Vec<Point3<f64>>`, index order = insertion
/// order) with a hash map from coordinate bit patterns back to indices, so
/// each distinct point is stored exactly once and the vertex array stays
/// contiguous for export. Faces are index triples in insertion order with
/// counter-clockwise winding.
///
/// # Example
///
/// ```
/// use record_mesh::{Point3, TriMesh};
///
/// let mut mesh = TriMesh::new();
/// let a = mesh.insert(Point3::new(0.0, 0.0, 0.0));
/// let b = mesh.insert(Point3::new(1.0, 0.0, 0.0));
/// let c = mesh.insert(Point3::new(0.0, 1.0, 0.0));
/// mesh.add_face([a, b, c]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.faces, vec![[a, b, c]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    /// Vertex positions, in insertion order.
    positions: Vec<Point3<f64>>,

    /// Exact-value lookup from coordinate bit patterns to vertex index.
    /// Invariant: bijective with `positions`.
    lookup: HashMap<[u64; 3], u32>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

/// Hash key for a position. `-0.0` and `0.0` compare equal as coordinates and
/// must map to the same entry, so zero is canonicalized before taking bits.
fn position_key(point: &Point3<f64>) -> [u64; 3] {
    let bits = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
    [bits(point.x), bits(point.y), bits(point.z)]
}

impl TriMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    ///
    /// # Arguments
    ///
    /// * `vertex_count` - Expected number of distinct vertices
    /// * `face_count` - Expected number of faces
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            lookup: HashMap::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Insert a point, returning its vertex index.
    ///
    /// If a point with bit-identical coordinates is already stored, its
    /// existing index is returned and the mesh is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the mesh already holds `u32::MAX` vertices.
    pub fn insert(&mut self, point: Point3<f64>) -> u32 {
        self.insert_full(point).0
    }

    /// Insert a point, returning its vertex index and whether it was new.
    ///
    /// The flag is `true` for a newly inserted point and `false` when the
    /// point was already present. Generators use the `false` case to detect
    /// geometry they have already emitted (for example where spiral turns
    /// touch).
    ///
    /// # Panics
    ///
    /// Panics if the mesh already holds `u32::MAX` vertices.
    ///
    /// # Example
    ///
    /// ```
    /// use record_mesh::{Point3, TriMesh};
    ///
    /// let mut mesh = TriMesh::new();
    /// let (first, fresh) = mesh.insert_full(Point3::new(1.0, 2.0, 3.0));
    /// let (again, fresh_again) = mesh.insert_full(Point3::new(1.0, 2.0, 3.0));
    ///
    /// assert_eq!(first, again);
    /// assert!(fresh);
    /// assert!(!fresh_again);
    /// assert_eq!(mesh.vertex_count(), 1);
    /// ```
    pub fn insert_full(&mut self, point: Point3<f64>) -> (u32, bool) {
        let key = position_key(&point);
        if let Some(&index) = self.lookup.get(&key) {
            return (index, false);
        }

        let index = u32::try_from(self.positions.len())
            .unwrap_or_else(|_| panic!("vertex registry overflowed u32 index space"));
        self.positions.push(point);
        self.lookup.insert(key, index);
        (index, true)
    }

    /// Insert a sequence of points, returning their indices in order.
    ///
    /// Duplicates within the sequence (or against already-stored points)
    /// resolve to the existing indices.
    pub fn insert_all<I>(&mut self, points: I) -> Vec<u32>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        points.into_iter().map(|p| self.insert(p)).collect()
    }

    /// Position of the vertex at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. An out-of-range index is a
    /// programming error, not a recoverable condition.
    #[inline]
    #[must_use]
    pub fn position(&self, index: u32) -> Point3<f64> {
        self.positions[index as usize]
    }

    /// All vertex positions, in index order.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Number of distinct vertices stored.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Append a triangle face.
    ///
    /// No validation is performed — degenerate or repeated triples are
    /// accepted and removed later by the cleanup passes.
    #[inline]
    pub fn add_face(&mut self, face: [u32; 3]) {
        self.faces.push(face);
    }

    /// Insert three raw points and append the resulting triangle.
    ///
    /// Convenience form of [`TriMesh::add_face`] for callers holding
    /// coordinates rather than indices; each point passes through the
    /// deduplicating registry first.
    pub fn add_face_points(&mut self, p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) {
        let a = self.insert(p0);
        let b = self.insert(p1);
        let c = self.insert(p2);
        self.add_face([a, b, c]);
    }

    /// Append a quadrilateral as two triangles, split along its shorter
    /// diagonal.
    ///
    /// `quad` lists the corners in cyclic order. Of the two diagonals
    /// (`q0–q2` and `q1–q3`), the split never runs along the longer one —
    /// splitting along the diagonal that connects the two most distant
    /// corners produces sliver or folded triangles on non-planar quads.
    /// Exactly two triangles are emitted, covering the quad without overlap.
    pub fn add_quad(&mut self, quad: [u32; 4]) {
        let [q0, q1, q2, q3] = quad;
        let d02 = (self.position(q2) - self.position(q0)).norm_squared();
        let d13 = (self.position(q3) - self.position(q1)).norm_squared();

        if d02 <= d13 {
            self.add_face([q0, q1, q2]);
            self.add_face([q0, q2, q3]);
        } else {
            self.add_face([q0, q1, q3]);
            self.add_face([q1, q2, q3]);
        }
    }

    /// Merge another mesh into this one.
    ///
    /// Every vertex of `other` is re-inserted through this mesh's registry
    /// (coincident points deduplicate), and every face of `other` is appended
    /// under the remapped indices. No faces are dropped; only indices change.
    pub fn merge(&mut self, other: &TriMesh) {
        let remap: Vec<u32> = other.positions.iter().map(|p| self.insert(*p)).collect();

        self.faces.reserve(other.faces.len());
        for face in &other.faces {
            self.faces.push([
                remap[face[0] as usize],
                remap[face[1] as usize],
                remap[face[2] as usize],
            ]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates_exact_points() {
        let mut mesh = TriMesh::new();
        let a = mesh.insert(Point3::new(1.0, 2.0, 3.0));
        let b = mesh.insert(Point3::new(1.0, 2.0, 3.0));

        assert_eq!(a, b);
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn insert_distinct_points_grow_registry() {
        let mut mesh = TriMesh::new();
        mesh.insert(Point3::new(0.0, 0.0, 0.0));
        mesh.insert(Point3::new(0.0, 0.0, 1.0));
        mesh.insert(Point3::new(0.0, 1.0, 0.0));

        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn insert_full_flags_existing() {
        let mut mesh = TriMesh::new();
        let (_, fresh) = mesh.insert_full(Point3::new(5.0, 5.0, 5.0));
        let (_, again) = mesh.insert_full(Point3::new(5.0, 5.0, 5.0));

        assert!(fresh);
        assert!(!again);
    }

    #[test]
    fn insert_no_epsilon_matching() {
        let mut mesh = TriMesh::new();
        let a = mesh.insert(Point3::new(1.0, 0.0, 0.0));
        let b = mesh.insert(Point3::new(1.0 + 1e-12, 0.0, 0.0));

        // Exact-value policy: nearby points are distinct vertices.
        assert_ne!(a, b);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let mut mesh = TriMesh::new();
        let a = mesh.insert(Point3::new(0.0, 1.0, 0.0));
        let b = mesh.insert(Point3::new(-0.0, 1.0, -0.0));

        assert_eq!(a, b);
    }

    #[test]
    fn position_round_trips() {
        let mut mesh = TriMesh::new();
        let index = mesh.insert(Point3::new(1.5, -2.5, 3.5));

        assert_eq!(mesh.position(index), Point3::new(1.5, -2.5, 3.5));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn position_out_of_range_panics() {
        let mesh = TriMesh::new();
        let _ = mesh.position(0);
    }

    #[test]
    fn insert_all_preserves_order() {
        let mut mesh = TriMesh::new();
        let indices = mesh.insert_all([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ]);

        assert_eq!(indices, vec![0, 1, 0]);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn add_face_points_inserts_through_registry() {
        let mut mesh = TriMesh::new();
        let shared = mesh.insert(Point3::new(0.0, 0.0, 0.0));
        mesh.add_face_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces[0][0], shared);
    }

    #[test]
    fn add_quad_splits_along_shorter_diagonal() {
        let mut mesh = TriMesh::new();
        // A skewed quad where the q0–q2 diagonal is clearly longer.
        let q0 = mesh.insert(Point3::new(0.0, 0.0, 0.0));
        let q1 = mesh.insert(Point3::new(3.0, 0.0, 0.0));
        let q2 = mesh.insert(Point3::new(3.5, 1.0, 0.0));
        let q3 = mesh.insert(Point3::new(0.5, 1.0, 0.0));

        mesh.add_quad([q0, q1, q2, q3]);

        assert_eq!(mesh.faces, vec![[q0, q1, q3], [q1, q2, q3]]);
    }

    #[test]
    fn add_quad_default_diagonal_on_symmetric_quad() {
        let mut mesh = TriMesh::new();
        let q0 = mesh.insert(Point3::new(0.0, 0.0, 0.0));
        let q1 = mesh.insert(Point3::new(1.0, 0.0, 0.0));
        let q2 = mesh.insert(Point3::new(1.0, 1.0, 0.0));
        let q3 = mesh.insert(Point3::new(0.0, 1.0, 0.0));

        mesh.add_quad([q0, q1, q2, q3]);

        assert_eq!(mesh.faces, vec![[q0, q1, q2], [q0, q2, q3]]);
    }

    #[test]
    fn add_quad_always_two_faces() {
        let mut mesh = TriMesh::new();
        let q0 = mesh.insert(Point3::new(0.0, 0.0, 0.0));
        let q1 = mesh.insert(Point3::new(2.0, 0.0, 0.5));
        let q2 = mesh.insert(Point3::new(2.0, 2.0, 0.0));
        let q3 = mesh.insert(Point3::new(0.0, 2.0, -0.5));

        mesh.add_quad([q0, q1, q2, q3]);

        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn merge_remaps_faces() {
        let mut left = TriMesh::new();
        let a = left.insert(Point3::new(0.0, 0.0, 0.0));
        let b = left.insert(Point3::new(1.0, 0.0, 0.0));
        let c = left.insert(Point3::new(0.0, 1.0, 0.0));
        left.add_face([a, b, c]);

        let mut right = TriMesh::new();
        let d = right.insert(Point3::new(5.0, 0.0, 0.0));
        let e = right.insert(Point3::new(6.0, 0.0, 0.0));
        let f = right.insert(Point3::new(5.0, 1.0, 0.0));
        right.add_face([d, e, f]);

        left.merge(&right);

        assert_eq!(left.vertex_count(), 6);
        assert_eq!(left.face_count(), 2);
        assert_eq!(left.faces[1], [3, 4, 5]);
    }

    #[test]
    fn merge_deduplicates_shared_vertices() {
        let mut left = TriMesh::new();
        let a = left.insert(Point3::new(0.0, 0.0, 0.0));
        let b = left.insert(Point3::new(1.0, 0.0, 0.0));
        let c = left.insert(Point3::new(0.0, 1.0, 0.0));
        left.add_face([a, b, c]);

        // Shares the edge a–b with `left`.
        let mut right = TriMesh::new();
        let d = right.insert(Point3::new(0.0, 0.0, 0.0));
        let e = right.insert(Point3::new(1.0, 0.0, 0.0));
        let f = right.insert(Point3::new(0.5, -1.0, 0.0));
        right.add_face([d, e, f]);

        left.merge(&right);

        assert_eq!(left.vertex_count(), 4);
        assert_eq!(left.faces[1], [a, b, 3]);
    }

    #[test]
    fn merge_into_empty_copies_everything() {
        let mut source = TriMesh::new();
        let a = source.insert(Point3::new(0.0, 0.0, 0.0));
        let b = source.insert(Point3::new(1.0, 0.0, 0.0));
        let c = source.insert(Point3::new(0.0, 1.0, 0.0));
        source.add_face([a, b, c]);

        let mut target = TriMesh::new();
        target.merge(&source);

        assert_eq!(target.vertex_count(), source.vertex_count());
        assert_eq!(target.faces, source.faces);
    }
}
