//! Super simple geometry
use std::mem;

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};
use derive_getters::Getters;
use enum_map::{enum_map, Enum, EnumMap};

use crate::linalg::mix;

pub mod gasket;

pub type Colour = [f32; 3];

/// Final vertex data ready for consumption by the video device. A vector of these will be
/// the last step in getting some arbitrary geometry loaded in video memory for rendering.
#[derive(Debug, Copy, Clone, PartialEq, Getters)]
pub struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    colour: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], colour: [f32; 3]) -> Self {
        Vertex { position, normal, colour }
    }

    pub const fn sizeof() -> usize {
        mem::size_of::<Vertex>()
    }
}

/// Unindexed triangle list, three consecutive vertices per triangle, for slurping into video
/// memory.
pub trait Geometry {
    fn geometry(&self) -> Vec<Vertex>;
}

/// The four faces of a tetrahedron `(a, b, c, d)`, named after the corner each one leaves out.
/// Declaration order is emission order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Enum)]
pub enum Face {
    /// `(a, c, b)`
    OppositeD,
    /// `(a, b, d)`
    OppositeC,
    /// `(a, d, c)`
    OppositeB,
    /// `(b, c, d)`
    OppositeA,
}

/// One flat colour per face, shared by every leaf of a subdivision.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette(EnumMap<Face, Colour>);

impl Palette {
    pub fn new(colours: EnumMap<Face, Colour>) -> Self {
        Palette(colours)
    }

    #[inline]
    pub fn colour(&self, face: Face) -> Colour {
        self.0[face]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(enum_map! {
            Face::OppositeD => [0.95, 0.25, 0.25], // red
            Face::OppositeC => [0.25, 0.70, 0.35], // green
            Face::OppositeB => [0.25, 0.45, 0.95], // blue
            Face::OppositeA => [0.95, 0.85, 0.35], // yellow
        })
    }
}

/// Winding is significant. It is never reordered after construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
    pub colour: Colour,
}

impl Triangle {
    pub fn new(p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>, colour: Colour) -> Self {
        Triangle { vertices: [p0, p1, p2], colour }
    }

    /// Right hand rule over the stored winding. Zero for a degenerate triangle.
    pub fn normal(&self) -> Vector3<f32> {
        let [p0, p1, p2] = self.vertices;
        let n = (p1 - p0).cross(p2 - p0);
        if n.magnitude2() > 0.0 {
            n.normalize()
        } else {
            n
        }
    }

    pub fn centroid(&self) -> Point3<f32> {
        Point3::centroid(&self.vertices)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tetrahedron {
    pub a: Point3<f32>,
    pub b: Point3<f32>,
    pub c: Point3<f32>,
    pub d: Point3<f32>,
}

impl Tetrahedron {
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, d: Point3<f32>) -> Self {
        Tetrahedron { a, b, c, d }
    }

    /// Regular tetrahedron inscribed in the unit sphere with `a` at the north pole.
    pub fn regular() -> Self {
        Tetrahedron::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.942809, -0.333333),
            Point3::new(-0.816497, -0.471405, -0.333333),
            Point3::new(0.816497, -0.471405, -0.333333),
        )
    }

    pub fn corners(&self) -> [Point3<f32>; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn centroid(&self) -> Point3<f32> {
        Point3::centroid(&self.corners())
    }

    /// Corner triples of each face with the winding the renderer expects.
    pub fn faces(&self) -> EnumMap<Face, [Point3<f32>; 3]> {
        let Tetrahedron { a, b, c, d } = *self;
        enum_map! {
            Face::OppositeD => [a, c, b],
            Face::OppositeC => [a, b, d],
            Face::OppositeB => [a, d, c],
            Face::OppositeA => [b, c, d],
        }
    }

    /// The four flat coloured triangles, in face order.
    pub fn triangles(&self, palette: &Palette) -> [Triangle; 4] {
        let faces = self.faces();
        let tri = |face: Face| {
            let [p0, p1, p2] = faces[face];
            Triangle::new(p0, p1, p2, palette.colour(face))
        };

        [
            tri(Face::OppositeD),
            tri(Face::OppositeC),
            tri(Face::OppositeB),
            tri(Face::OppositeA),
        ]
    }

    /// The four corner tetrahedra spanned by the edge midpoints. The central octahedron is
    /// left out.
    pub fn split(&self) -> [Tetrahedron; 4] {
        let Tetrahedron { a, b, c, d } = *self;

        let ab = mix(a, b, 0.5);
        let ac = mix(a, c, 0.5);
        let ad = mix(a, d, 0.5);
        let bc = mix(b, c, 0.5);
        let bd = mix(b, d, 0.5);
        let cd = mix(c, d, 0.5);

        [
            Tetrahedron::new(a, ab, ac, ad),
            Tetrahedron::new(ab, b, bc, bd),
            Tetrahedron::new(ac, bc, c, cd),
            Tetrahedron::new(ad, bd, cd, d),
        ]
    }

    /// Unit normal of `triangle` turned to point away from this tetrahedron's centre,
    /// whatever the winding.
    pub fn outward_normal(&self, triangle: &Triangle) -> Vector3<f32> {
        let n = triangle.normal();
        if n.dot(triangle.centroid() - self.centroid()) < 0.0 {
            -n
        } else {
            n
        }
    }

    pub fn volume(&self) -> f32 {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ad = self.d - self.a;
        ab.dot(ac.cross(ad)).abs() / 6.0
    }
}
