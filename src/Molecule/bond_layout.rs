use super::projection::depth_opacity;
use nalgebra::{Point2, Vector2};

/// distance between the two lines of a double or aromatic bond, each side of the axis
pub const DOUBLE_BOND_OFFSET: f64 = 3.0;
/// distance of the outer lines of a triple bond from the middle one
pub const TRIPLE_BOND_OFFSET: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondStyle {
    Single,
    Double,
    Aromatic,
    Triple,
}

impl BondStyle {
    /// Maps a bond order to a style: 3 triple, 2 double, 1.5 (or the aromatic flag)
    /// aromatic, anything else single.
    pub fn from_order(order: f64, is_aromatic: bool) -> Self {
        if is_aromatic || (order - 1.5).abs() < 0.25 {
            BondStyle::Aromatic
        } else if order >= 2.5 {
            BondStyle::Triple
        } else if order >= 1.75 {
            BondStyle::Double
        } else {
            BondStyle::Single
        }
    }

    pub fn line_count(&self) -> usize {
        match self {
            BondStyle::Single => 1,
            BondStyle::Double | BondStyle::Aromatic => 2,
            BondStyle::Triple => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    /// inner line of an aromatic bond
    pub dashed: bool,
}

/// one bond ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct BondRender {
    /// positions of the bonded atoms in the payload
    pub atoms: (usize, usize),
    pub style: BondStyle,
    pub lines: Vec<LineSegment>,
    pub opacity: f64,
}

/// unit normal of the segment, zero for a zero-length segment
fn perpendicular(start: Point2<f64>, end: Point2<f64>) -> Vector2<f64> {
    let direction = end - start;
    let length = direction.norm();
    if length < f64::EPSILON {
        return Vector2::zeros();
    }
    Vector2::new(-direction.y, direction.x) / length
}

fn offset_line(start: Point2<f64>, end: Point2<f64>, shift: Vector2<f64>, dashed: bool) -> LineSegment {
    LineSegment {
        start: start + shift,
        end: end + shift,
        dashed,
    }
}

/// parallel lines for one bond between two screen points
pub fn bond_lines(start: Point2<f64>, end: Point2<f64>, style: BondStyle) -> Vec<LineSegment> {
    let n = perpendicular(start, end);
    match style {
        BondStyle::Single => vec![offset_line(start, end, Vector2::zeros(), false)],
        BondStyle::Double => vec![
            offset_line(start, end, n * DOUBLE_BOND_OFFSET, false),
            offset_line(start, end, -n * DOUBLE_BOND_OFFSET, false),
        ],
        BondStyle::Aromatic => vec![
            offset_line(start, end, n * DOUBLE_BOND_OFFSET, false),
            offset_line(start, end, -n * DOUBLE_BOND_OFFSET, true),
        ],
        BondStyle::Triple => vec![
            offset_line(start, end, Vector2::zeros(), false),
            offset_line(start, end, n * TRIPLE_BOND_OFFSET, false),
            offset_line(start, end, -n * TRIPLE_BOND_OFFSET, false),
        ],
    }
}

/// bond opacity follows the mean depth of its two atoms
pub fn bond_opacity(depth_a: f64, depth_b: f64) -> f64 {
    depth_opacity((depth_a + depth_b) / 2.0)
}
