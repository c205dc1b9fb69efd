/// eng
/// Molecule payload as sent by the backend (`/structure/2d`, `/structure/3d`): atoms with
/// 2D or 3D coordinates and bonds referencing atoms by id or by position.
pub mod molecule_data;
/// eng
/// Interactive view state: rotation about two axes, zoom and pan, with zoom limits that
/// depend on whether the structure is flat or spatial.
pub mod view_transform;
/// eng
/// Model coordinates -> screen coordinates. Rotation about X then Y, perspective division,
/// painter's-algorithm draw order (farthest first) and depth cues for size and opacity.
pub mod projection;
/// eng
/// Bond render lines: one line for single bonds, two parallel lines for double and aromatic
/// bonds, three for triple bonds.
pub mod bond_layout;
/// eng
/// Puts it all together: payload + view + canvas size -> list of things to draw, or a
/// placeholder when there is nothing to show.
pub mod scene;
