//! # Render scene
//!
//! `build_scene()` is what a molecule view calls on every drag, pinch or new payload.
//! It returns either a placeholder (no atoms) or the bonds and atoms to paint: bonds
//! first, then atoms farthest first, so near atoms cover far ones.
//!
//! ```rust
//! use ChemLabKit::Molecule::molecule_data::{Atom, MoleculePayload};
//! use ChemLabKit::Molecule::scene::{RenderScene, build_scene};
//! use ChemLabKit::Molecule::view_transform::{ViewMode, ViewTransform};
//! use nalgebra::Vector2;
//! let payload = MoleculePayload::new(vec![Atom::new_3d("C", 0.0, 0.0, 0.0)], vec![]);
//! let scene = build_scene(&payload, &ViewTransform::new(ViewMode::Perspective3D), Vector2::new(400.0, 300.0));
//! assert!(matches!(scene, RenderScene::Structure { .. }));
//! ```
use super::bond_layout::{BondRender, BondStyle, bond_lines, bond_opacity};
use super::molecule_data::MoleculePayload;
use super::projection::{ProjectedAtom, draw_order, project_atoms_2d, project_atoms_3d};
use super::view_transform::{ViewMode, ViewTransform};
use log::debug;
use nalgebra::{Point2, Vector2};
use prettytable::{Cell, Row, Table};

/// watermark shown instead of an empty structure
pub const PLACEHOLDER_TEXT: &str = "No structure";

#[derive(Debug, Clone, PartialEq)]
pub enum RenderScene {
    Placeholder {
        text: &'static str,
    },
    Structure {
        /// in draw order
        atoms: Vec<ProjectedAtom>,
        bonds: Vec<BondRender>,
    },
}

/// view mode matching the payload: perspective when it carries depth
pub fn view_for_payload(payload: &MoleculePayload) -> ViewTransform {
    if payload.has_depth() {
        ViewTransform::new(ViewMode::Perspective3D)
    } else {
        ViewTransform::new(ViewMode::Flat2D)
    }
}

pub fn build_scene(
    payload: &MoleculePayload,
    view: &ViewTransform,
    canvas: Vector2<f64>,
) -> RenderScene {
    if payload.is_empty() {
        return RenderScene::Placeholder {
            text: PLACEHOLDER_TEXT,
        };
    }
    let center = Point2::from(canvas / 2.0);
    let projected = match view.mode() {
        ViewMode::Perspective3D => project_atoms_3d(&payload.atoms, view, center),
        ViewMode::Flat2D => project_atoms_2d(&payload.atoms, view, center),
    };

    let bonds: Vec<BondRender> = payload
        .bonds
        .iter()
        .filter_map(|bond| {
            let (a, b) = payload.resolve_bond(bond)?;
            let style = BondStyle::from_order(bond.order, bond.is_aromatic);
            let (pa, pb) = (&projected[a], &projected[b]);
            Some(BondRender {
                atoms: (a, b),
                style,
                lines: bond_lines(pa.screen, pb.screen, style),
                opacity: match view.mode() {
                    ViewMode::Perspective3D => bond_opacity(pa.depth, pb.depth),
                    ViewMode::Flat2D => 1.0,
                },
            })
        })
        .collect();

    let atoms: Vec<ProjectedAtom> = match view.mode() {
        ViewMode::Perspective3D => draw_order(&projected)
            .into_iter()
            .map(|i| projected[i].clone())
            .collect(),
        ViewMode::Flat2D => projected,
    };
    debug!(
        "scene built: {} atoms, {} of {} bonds",
        atoms.len(),
        bonds.len(),
        payload.bonds.len()
    );
    RenderScene::Structure { atoms, bonds }
}

impl RenderScene {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderScene::Placeholder { .. })
    }

    /// atoms in draw order (empty for the placeholder)
    pub fn atoms(&self) -> &[ProjectedAtom] {
        match self {
            RenderScene::Placeholder { .. } => &[],
            RenderScene::Structure { atoms, .. } => atoms,
        }
    }

    pub fn bonds(&self) -> &[BondRender] {
        match self {
            RenderScene::Placeholder { .. } => &[],
            RenderScene::Structure { bonds, .. } => bonds,
        }
    }

    /// table of atoms in draw order, for the terminal front-end
    pub fn pretty_print(&self) {
        if let RenderScene::Placeholder { text } = self {
            println!("[ {} ]", text);
            return;
        }
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("#"),
            Cell::new("Atom"),
            Cell::new("x"),
            Cell::new("y"),
            Cell::new("depth"),
            Cell::new("radius"),
            Cell::new("opacity"),
        ]));
        for atom in self.atoms() {
            table.add_row(Row::new(vec![
                Cell::new(&atom.index.to_string()),
                Cell::new(&atom.symbol),
                Cell::new(&format!("{:.1}", atom.screen.x)),
                Cell::new(&format!("{:.1}", atom.screen.y)),
                Cell::new(&format!("{:.3}", atom.depth)),
                Cell::new(&format!("{:.1}", atom.radius)),
                Cell::new(&format!("{:.2}", atom.opacity)),
            ]));
        }
        table.printstd();
        for bond in self.bonds() {
            println!(
                "bond {}-{}: {:?}, {} line(s), opacity {:.2}",
                bond.atoms.0,
                bond.atoms.1,
                bond.style,
                bond.lines.len(),
                bond.opacity
            );
        }
    }
}
