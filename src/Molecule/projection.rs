//! # Projection of atoms to the screen
//!
//! ## 3D
//! 1. rotate model coordinates about X by `rotation_x`, then about Y by `rotation_y`
//!    (the Y rotation acts on the already X-rotated point);
//! 2. perspective: the viewer sits on the +z side, `PERSPECTIVE_DISTANCE` pixels beyond the
//!    model's bounding sphere, `factor = d / (d - z_px + Z_OFFSET)` with
//!    `d = PERSPECTIVE_DISTANCE + radius_px`. Rotation about the origin keeps `|z| <= radius`,
//!    so the denominator never drops below `PERSPECTIVE_DISTANCE + Z_OFFSET`;
//! 3. screen = canvas center + pan + (x, -y) * factor * scale * `PIXELS_PER_UNIT_3D`;
//! 4. depth = rotated z, larger is nearer; draw order is farthest first.
//!
//! ## 2D
//! screen = canvas center + pan + (x, -y) * scale * `PIXELS_PER_UNIT_2D`, input order kept.
//!
//! Screen y grows downward, hence the sign flip on model y.
use super::molecule_data::Atom;
use super::view_transform::ViewTransform;
use nalgebra::{Point2, Rotation3, Vector2, Vector3};

pub const PERSPECTIVE_DISTANCE: f64 = 400.0;
/// pushes the whole model away from the viewer, in pixels
pub const Z_OFFSET: f64 = 200.0;
pub const PIXELS_PER_UNIT_3D: f64 = 40.0;
pub const PIXELS_PER_UNIT_2D: f64 = 30.0;
/// atom disc radius at scale 1 and depth 0, pixels
pub const ATOM_RADIUS: f64 = 12.0;
pub const HYDROGEN_RADIUS: f64 = 8.0;

const MIN_OPACITY: f64 = 0.35;
const MAX_OPACITY: f64 = 1.0;
const MIN_RADIUS_FACTOR: f64 = 0.6;
const MAX_RADIUS_FACTOR: f64 = 1.4;
const MIN_PERSPECTIVE_DENOMINATOR: f64 = 1.0;

/// one atom on screen, recomputed on every interaction
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedAtom {
    /// position of the atom in the payload
    pub index: usize,
    pub symbol: String,
    pub screen: Point2<f64>,
    pub depth: f64,
    pub radius: f64,
    pub opacity: f64,
}

/// opacity cue: nearer atoms are more opaque
pub fn depth_opacity(depth: f64) -> f64 {
    (0.7 + 0.15 * depth).clamp(MIN_OPACITY, MAX_OPACITY)
}

/// size cue: nearer atoms are drawn larger
pub fn depth_radius_factor(depth: f64) -> f64 {
    (1.0 + 0.1 * depth).clamp(MIN_RADIUS_FACTOR, MAX_RADIUS_FACTOR)
}

fn base_radius(symbol: &str) -> f64 {
    if symbol.eq_ignore_ascii_case("H") {
        HYDROGEN_RADIUS
    } else {
        ATOM_RADIUS
    }
}

/// rotation about X first, then about Y
pub fn rotate_point(point: Vector3<f64>, rotation_x: f64, rotation_y: f64) -> Vector3<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation_x);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation_y);
    ry * (rx * point)
}

/// largest distance of an atom from the rotation origin, model units
pub fn model_radius(atoms: &[Atom]) -> f64 {
    atoms
        .iter()
        .map(|a| Vector3::new(a.x, a.y, a.z.unwrap_or(0.0)).norm())
        .filter(|r| r.is_finite())
        .fold(0.0, f64::max)
}

/// Perspective factor of a rotated depth `z` for a model of bounding radius `model_radius`
/// (both in model units). Nearer atoms get a larger factor.
pub fn perspective_factor(z: f64, model_radius: f64) -> f64 {
    let distance = PERSPECTIVE_DISTANCE + model_radius.max(0.0) * PIXELS_PER_UNIT_3D;
    let denominator = distance - z * PIXELS_PER_UNIT_3D + Z_OFFSET;
    distance / denominator.max(MIN_PERSPECTIVE_DENOMINATOR)
}

/// Projects atoms with perspective. The result is indexed like `atoms`; use
/// `draw_order` for painting.
pub fn project_atoms_3d(
    atoms: &[Atom],
    view: &ViewTransform,
    center: Point2<f64>,
) -> Vec<ProjectedAtom> {
    let bound = model_radius(atoms);
    atoms
        .iter()
        .enumerate()
        .map(|(index, atom)| {
            let model = Vector3::new(atom.x, atom.y, atom.z.unwrap_or(0.0));
            let rotated = rotate_point(model, view.rotation_x, view.rotation_y);
            let k = perspective_factor(rotated.z, bound) * view.scale() * PIXELS_PER_UNIT_3D;
            let screen = center + view.pan + Vector2::new(rotated.x * k, -rotated.y * k);
            let depth = rotated.z;
            ProjectedAtom {
                index,
                symbol: atom.symbol.clone(),
                screen,
                depth,
                radius: base_radius(&atom.symbol) * view.scale() * depth_radius_factor(depth),
                opacity: depth_opacity(depth),
            }
        })
        .collect()
}

/// Flat projection, z is ignored and every atom gets depth 0 and full opacity.
pub fn project_atoms_2d(
    atoms: &[Atom],
    view: &ViewTransform,
    center: Point2<f64>,
) -> Vec<ProjectedAtom> {
    let k = view.scale() * PIXELS_PER_UNIT_2D;
    atoms
        .iter()
        .enumerate()
        .map(|(index, atom)| ProjectedAtom {
            index,
            symbol: atom.symbol.clone(),
            screen: center + view.pan + Vector2::new(atom.x * k, -atom.y * k),
            depth: 0.0,
            radius: base_radius(&atom.symbol) * view.scale(),
            opacity: MAX_OPACITY,
        })
        .collect()
}

/// Indices into `projected`, farthest first. The sort is stable, so atoms at equal depth
/// keep their payload order.
pub fn draw_order(projected: &[ProjectedAtom]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..projected.len()).collect();
    order.sort_by(|&a, &b| projected[a].depth.total_cmp(&projected[b].depth));
    order
}
