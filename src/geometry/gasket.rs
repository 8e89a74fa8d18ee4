//! Sierpinski gasket in three dimensions: a tetrahedron recursively replaced by its four corner
//! tetrahedra, each leaf drawn as four flat coloured triangles.
use std::convert::TryFrom;

use cgmath::Point3;
use log::{debug, info};

use crate::error::{GasketError, Result};
use super::{Colour, Geometry, Palette, Tetrahedron, Triangle, Vertex};

/// Deepest subdivision accepted. 12 * 4^10 vertices is already past twelve million.
pub const MAX_DEPTH: u32 = 10;

/// Vertices emitted per leaf: four triangles of three vertices.
pub const VERTICES_PER_LEAF: usize = 12;

/// A validated recursion depth.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Depth(u32);

impl Depth {
    pub fn new(depth: i64) -> Result<Self> {
        if depth < 0 {
            return Err(GasketError::InvalidDepth(depth));
        }
        if depth > i64::from(MAX_DEPTH) {
            return Err(GasketError::DepthTooDeep {
                depth: u32::try_from(depth).unwrap_or(u32::max_value()),
                max: MAX_DEPTH,
            });
        }
        Ok(Depth(depth as u32))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// `4^depth`
    pub fn leaves(self) -> usize {
        4usize.pow(self.0)
    }

    /// `12 * 4^depth`
    pub fn vertex_count(self) -> usize {
        VERTICES_PER_LEAF * self.leaves()
    }

    /// Every invocation of the recursion, leaves included: `(4^(depth+1) - 1) / 3`.
    pub fn call_count(self) -> usize {
        (4usize.pow(self.0 + 1) - 1) / 3
    }
}

impl TryFrom<i64> for Depth {
    type Error = GasketError;

    fn try_from(depth: i64) -> Result<Self> {
        Depth::new(depth)
    }
}

/// Parallel position and colour buffers. Insertion order is draw order and both always hold
/// the same number of entries, a multiple of three.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Point3<f32>>,
    colours: Vec<Colour>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Mesh {
            positions: Vec::with_capacity(vertices),
            colours: Vec::with_capacity(vertices),
        }
    }

    /// Three positions, the colour repeated for each.
    pub fn push_triangle(&mut self, triangle: &Triangle) {
        self.positions.extend_from_slice(&triangle.vertices);
        self.colours.extend_from_slice(&[triangle.colour; 3]);
    }

    pub fn append(&mut self, other: &mut Mesh) {
        self.positions.append(&mut other.positions);
        self.colours.append(&mut other.colours);
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colours.chunks_exact(3))
            .map(|(p, c)| Triangle::new(p[0], p[1], p[2], c[0]))
    }

    /// `x, y, z` per vertex for a position buffer upload.
    pub fn flat_positions(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(3 * self.positions.len());
        for p in self.positions.iter() {
            flat.extend_from_slice(&[p.x, p.y, p.z]);
        }
        flat
    }

    /// `r, g, b` per vertex for a colour buffer upload.
    pub fn flat_colours(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(3 * self.colours.len());
        for c in self.colours.iter() {
            flat.extend_from_slice(c);
        }
        flat
    }
}

/// Subdivide `(a, b, c, d)` to `depth` with the default palette.
///
/// A negative `depth` fails with [`GasketError::InvalidDepth`] and nothing is produced.
pub fn subdivide(
    a: Point3<f32>,
    b: Point3<f32>,
    c: Point3<f32>,
    d: Point3<f32>,
    depth: i64,
) -> Result<Mesh> {
    let depth = Depth::new(depth)?;
    let mut mesh = Mesh::with_capacity(depth.vertex_count());
    subdivide_into(&Tetrahedron::new(a, b, c, d), depth, &Palette::default(), &mut mesh);
    Ok(mesh)
}

/// Append the gasket of `tetra` to `mesh`. Exactly `depth.vertex_count()` vertices are added.
pub fn subdivide_into(tetra: &Tetrahedron, depth: Depth, palette: &Palette, mesh: &mut Mesh) {
    divide(tetra, depth.get(), palette, mesh);
}

fn divide(tetra: &Tetrahedron, depth: u32, palette: &Palette, mesh: &mut Mesh) {
    for_each_leaf(tetra, depth, &mut |leaf: &Tetrahedron| {
        for triangle in leaf.triangles(palette).iter() {
            mesh.push_triangle(triangle);
        }
    });
}

/// Visit the `4^depth` leaves in emission order. Depth is handed to each child by value.
fn for_each_leaf<F>(tetra: &Tetrahedron, depth: u32, visit: &mut F)
where
    F: FnMut(&Tetrahedron),
{
    if depth == 0 {
        visit(tetra);
        return;
    }

    for child in tetra.split().iter() {
        for_each_leaf(child, depth - 1, visit);
    }
}

/// Corners, depth and colours of a gasket. Geometry is regenerated on demand and never kept,
/// so changing the depth is a full rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct Gasket {
    tetra: Tetrahedron,
    depth: Depth,
    palette: Palette,
}

impl Gasket {
    pub fn new(tetra: Tetrahedron, depth: i64) -> Result<Self> {
        Ok(Gasket {
            tetra,
            depth: Depth::new(depth)?,
            palette: Palette::default(),
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// On error the previous depth is kept.
    pub fn set_depth(&mut self, depth: i64) -> Result<()> {
        self.depth = Depth::new(depth)?;
        Ok(())
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn mesh(&self) -> Mesh {
        info!("Subdividing gasket to depth {}.", self.depth.get());
        let mut mesh = Mesh::with_capacity(self.depth.vertex_count());
        subdivide_into(&self.tetra, self.depth, &self.palette, &mut mesh);
        debug!(
            "Gasket has {} leaves, {} triangles, {} vertices.",
            self.depth.leaves(),
            mesh.triangle_count(),
            mesh.len()
        );
        mesh
    }

    /// Leaf tetrahedra in emission order.
    pub fn leaves(&self) -> Vec<Tetrahedron> {
        let mut leaves = Vec::with_capacity(self.depth.leaves());
        for_each_leaf(&self.tetra, self.depth.get(), &mut |leaf: &Tetrahedron| leaves.push(*leaf));
        leaves
    }
}

impl Geometry for Gasket {
    /// Same vertices and colours as [`Gasket::mesh`], in the same order, with each triangle
    /// carrying the outward normal of its face.
    fn geometry(&self) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(self.depth.vertex_count());
        for_each_leaf(&self.tetra, self.depth.get(), &mut |leaf: &Tetrahedron| {
            for triangle in leaf.triangles(&self.palette).iter() {
                let n = leaf.outward_normal(triangle);
                for p in triangle.vertices.iter() {
                    vertices.push(Vertex::new([p.x, p.y, p.z], [n.x, n.y, n.z], triangle.colour));
                }
            }
        });

        vertices
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;
    use crate::geometry::Face;

    fn regular() -> Tetrahedron {
        Tetrahedron::regular()
    }

    #[test]
    fn depth_rejects_negative() {
        assert_eq!(Depth::new(-1), Err(GasketError::InvalidDepth(-1)));
        assert_eq!(Depth::try_from(-7i64), Err(GasketError::InvalidDepth(-7)));
    }

    #[test]
    fn depth_rejects_too_deep() {
        assert_eq!(
            Depth::new(i64::from(MAX_DEPTH) + 1),
            Err(GasketError::DepthTooDeep { depth: MAX_DEPTH + 1, max: MAX_DEPTH })
        );
        assert!(Depth::new(i64::from(MAX_DEPTH)).is_ok());
    }

    #[test]
    fn depth_counts() {
        let d = Depth::new(3).unwrap();
        assert_eq!(d.leaves(), 64);
        assert_eq!(d.vertex_count(), 768);
        assert_eq!(d.call_count(), 85);
        assert_eq!(Depth::new(0).unwrap().call_count(), 1);
    }

    #[test]
    fn leaf_emits_four_flat_triangles_in_order() {
        let t = regular();
        let mesh = subdivide(t.a, t.b, t.c, t.d, 0).unwrap();
        let palette = Palette::default();

        assert_eq!(mesh.len(), 12);
        assert_eq!(
            mesh.positions(),
            &[t.a, t.c, t.b, t.a, t.b, t.d, t.a, t.d, t.c, t.b, t.c, t.d][..]
        );

        let faces = [Face::OppositeD, Face::OppositeC, Face::OppositeB, Face::OppositeA];
        for (chunk, &face) in mesh.colours().chunks(3).zip(faces.iter()) {
            assert_eq!(chunk, &[palette.colour(face); 3][..]);
        }
    }

    #[test]
    fn buffers_grow_by_four_per_level() {
        let t = regular();
        for depth in 0..=5 {
            let mesh = subdivide(t.a, t.b, t.c, t.d, depth).unwrap();
            let expected = 12 * 4usize.pow(depth as u32);
            assert_eq!(mesh.len(), expected);
            assert_eq!(mesh.colours().len(), mesh.positions().len());
            assert_eq!(mesh.flat_positions().len(), 3 * expected);
            assert_eq!(mesh.flat_colours().len(), 3 * expected);
        }
    }

    #[test]
    fn depth_one_is_the_four_corner_leaves() {
        let t = regular();
        let mesh = subdivide(t.a, t.b, t.c, t.d, 1).unwrap();
        assert_eq!(mesh.len(), 48);

        let palette = Palette::default();
        let mut expected = Mesh::new();
        for child in t.split().iter() {
            for tri in child.triangles(&palette).iter() {
                expected.push_triangle(tri);
            }
        }
        assert_eq!(mesh, expected);
    }

    #[test]
    fn recursion_is_structural() {
        let t = regular();
        let palette = Palette::default();
        let depth = 3;

        let direct = subdivide(t.a, t.b, t.c, t.d, depth).unwrap();

        let mut joined = Mesh::new();
        for child in t.split().iter() {
            let mut part = subdivide(child.a, child.b, child.c, child.d, depth - 1).unwrap();
            joined.append(&mut part);
        }
        assert_eq!(direct, joined);

        let mut accumulated = Mesh::new();
        subdivide_into(&t, Depth::new(depth).unwrap(), &palette, &mut accumulated);
        assert_eq!(direct, accumulated);
    }

    #[test]
    fn subdivide_into_appends() {
        let t = regular();
        let palette = Palette::default();
        let mut mesh = subdivide(t.a, t.b, t.c, t.d, 0).unwrap();
        subdivide_into(&t, Depth::new(1).unwrap(), &palette, &mut mesh);
        assert_eq!(mesh.len(), 12 + 48);
    }

    #[test]
    fn negative_depth_produces_nothing() {
        let t = regular();
        assert_eq!(
            subdivide(t.a, t.b, t.c, t.d, -1),
            Err(GasketError::InvalidDepth(-1))
        );
    }

    #[test]
    fn set_depth_rebuilds_from_scratch() {
        let mut gasket = Gasket::new(regular(), 2).unwrap();
        assert_eq!(gasket.mesh().len(), 192);

        gasket.set_depth(1).unwrap();
        assert_eq!(gasket.mesh().len(), 48);

        assert!(gasket.set_depth(-3).is_err());
        assert_eq!(gasket.depth().get(), 1);
    }

    #[test]
    fn geometry_matches_mesh() {
        let gasket = Gasket::new(regular(), 2).unwrap();
        let mesh = gasket.mesh();
        let vertices = gasket.geometry();

        assert_eq!(vertices.len(), mesh.len());
        for ((v, p), c) in vertices.iter().zip(mesh.positions()).zip(mesh.colours()) {
            assert_eq!(*v.position(), [p.x, p.y, p.z]);
            assert_eq!(v.colour(), c);
        }

        for tri in vertices.chunks(3) {
            assert_eq!(tri[0].normal(), tri[1].normal());
            assert_eq!(tri[1].normal(), tri[2].normal());
        }
    }

    #[test]
    fn custom_palette_flows_through() {
        let grey = [0.5, 0.5, 0.5];
        let palette = Palette::new(enum_map::enum_map! { _ => grey });
        let mesh = Gasket::new(regular(), 1).unwrap().with_palette(palette).mesh();
        assert!(mesh.colours().iter().all(|c| *c == grey));
    }

    #[test]
    fn leaf_walk_visits_each_leaf_once_in_child_order() {
        let t = regular();
        let depth = Depth::new(3).unwrap();

        let mut visited = Vec::new();
        for_each_leaf(&t, depth.get(), &mut |leaf: &Tetrahedron| visited.push(*leaf));
        assert_eq!(visited.len(), depth.leaves());

        let mut expected = Vec::new();
        for child in t.split().iter() {
            for_each_leaf(child, depth.get() - 1, &mut |leaf: &Tetrahedron| expected.push(*leaf));
        }
        assert_eq!(visited, expected);

        let mut corner = t;
        for _ in 0..depth.get() {
            corner = corner.split()[0];
        }
        assert_eq!(visited[0], corner);
        assert_eq!(visited[0].a, t.a);
    }

    #[test]
    fn leaves_are_in_emission_order() {
        let gasket = Gasket::new(regular(), 2).unwrap();
        let leaves = gasket.leaves();
        assert_eq!(leaves.len(), 16);

        let mesh = gasket.mesh();
        for (leaf, tris) in leaves.iter().zip(mesh.positions().chunks(12)) {
            assert_eq!(tris[0], leaf.a);
            assert_eq!(tris[1], leaf.c);
            assert_eq!(tris[2], leaf.b);
        }
    }
}
