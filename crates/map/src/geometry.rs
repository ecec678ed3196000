use std::fmt;

use foundation::bounds::LatLng;
use foundation::ids::ClientId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeometryCid(pub ClientId);

impl GeometryCid {
    pub fn fresh() -> Self {
        GeometryCid(ClientId::fresh())
    }
}

impl fmt::Display for GeometryCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryShape {
    Point(LatLng),
    Line(Vec<LatLng>),
    /// Outer ring first, holes after.
    Polygon(Vec<Vec<LatLng>>),
}

/// Ad-hoc shape drawn over the layer stack (markers, drawn features).
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    cid: GeometryCid,
    pub shape: GeometryShape,
    pub editable: bool,
}

impl Geometry {
    pub fn new(shape: GeometryShape) -> Self {
        Self {
            cid: GeometryCid::fresh(),
            shape,
            editable: false,
        }
    }

    pub fn point(position: LatLng) -> Self {
        Self::new(GeometryShape::Point(position))
    }

    pub fn line(vertices: Vec<LatLng>) -> Self {
        Self::new(GeometryShape::Line(vertices))
    }

    pub fn polygon(rings: Vec<Vec<LatLng>>) -> Self {
        Self::new(GeometryShape::Polygon(rings))
    }

    pub fn cid(&self) -> GeometryCid {
        self.cid
    }

    pub fn kind(&self) -> GeometryKind {
        match self.shape {
            GeometryShape::Point(_) => GeometryKind::Point,
            GeometryShape::Line(_) => GeometryKind::Line,
            GeometryShape::Polygon(_) => GeometryKind::Polygon,
        }
    }
}

#[derive(Debug, Default)]
pub struct GeometryCollection {
    items: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geometry> {
        self.items.iter()
    }

    pub fn get(&self, cid: GeometryCid) -> Option<&Geometry> {
        self.items.iter().find(|g| g.cid == cid)
    }

    pub fn contains(&self, cid: GeometryCid) -> bool {
        self.get(cid).is_some()
    }

    /// Returns `false` when a geometry with the same client id is present.
    pub fn add(&mut self, geometry: Geometry) -> bool {
        if self.contains(geometry.cid) {
            return false;
        }
        self.items.push(geometry);
        true
    }

    pub fn remove(&mut self, cid: GeometryCid) -> Option<Geometry> {
        let index = self.items.iter().position(|g| g.cid == cid)?;
        Some(self.items.remove(index))
    }
}
