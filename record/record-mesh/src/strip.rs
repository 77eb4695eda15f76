//! Strip builders: triangulated ribbons between two vertex rails.

use crate::TriMesh;

impl TriMesh {
    /// Stitch two vertex rails into a ribbon of triangles.
    ///
    /// Walks `i` from `0` to `min(a.len(), b.len()) - 2` and emits two
    /// triangles per step: `(a[i], a[i+1], b[i])` and `(b[i], b[i+1], a[i+1])`.
    /// Rails of unequal length are walked up to the shorter one.
    ///
    /// The builder does not wrap around: rails that represent closed rings
    /// must be closed by the caller (append each rail's first index to its
    /// end) before stitching.
    ///
    /// Returns the number of faces emitted: `2 * (min(m, n) - 1)`, or 0 when
    /// either rail is shorter than 2.
    ///
    /// # Example
    ///
    /// ```
    /// use record_mesh::{Point3, TriMesh};
    ///
    /// let mut mesh = TriMesh::new();
    /// let top: Vec<u32> = (0..4)
    ///     .map(|i| mesh.insert(Point3::new(f64::from(i), 0.0, 1.0)))
    ///     .collect();
    /// let bottom: Vec<u32> = (0..4)
    ///     .map(|i| mesh.insert(Point3::new(f64::from(i), 0.0, 0.0)))
    ///     .collect();
    ///
    /// assert_eq!(mesh.tristrip(&top, &bottom), 6);
    /// ```
    pub fn tristrip(&mut self, a: &[u32], b: &[u32]) -> usize {
        let len = a.len().min(b.len());
        if len < 2 {
            return 0;
        }

        self.faces.reserve(2 * (len - 1));
        for i in 0..len - 1 {
            self.add_face([a[i], a[i + 1], b[i]]);
            self.add_face([b[i], b[i + 1], a[i + 1]]);
        }
        2 * (len - 1)
    }

    /// Stitch two vertex rails into a ribbon of quads.
    ///
    /// Same walk as [`TriMesh::tristrip`], but each step emits one quad
    /// `(a[i], a[i+1], b[i+1], b[i])` through [`TriMesh::add_quad`], so every
    /// cell is split along its shorter diagonal.
    ///
    /// Returns the number of faces emitted (two per quad).
    pub fn quadstrip(&mut self, a: &[u32], b: &[u32]) -> usize {
        let len = a.len().min(b.len());
        if len < 2 {
            return 0;
        }

        self.faces.reserve(2 * (len - 1));
        for i in 0..len - 1 {
            self.add_quad([a[i], a[i + 1], b[i + 1], b[i]]);
        }
        2 * (len - 1)
    }
}
