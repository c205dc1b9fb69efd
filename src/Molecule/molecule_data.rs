//! # Molecule payload
//!
//! Typed form of the structure JSON returned by the backend:
//! ```json
//! {"smiles": "C=O", "formula": "CH2O", "is_3d": true,
//!  "atoms": [{"id": 0, "symbol": "C", "x": 0.0, "y": 0.0, "z": 0.0},
//!            {"id": 1, "symbol": "O", "x": 1.2, "y": 0.0, "z": 0.1}],
//!  "bonds": [{"atom1": 0, "atom2": 1, "type": 2}]}
//! ```
//! Fields missing from the JSON fall back to defaults (`z` = none, bond order 1), unknown
//! fields such as `descriptors` are ignored.
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an atom from a bond, or an atom's own id. The backend sends integers,
/// some hand-written payloads use string labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AtomRef {
    Index(i64),
    Label(String),
}

impl AtomRef {
    /// position in the atom list if the reference is read as an index
    pub fn as_position(&self) -> Option<usize> {
        match self {
            AtomRef::Index(i) => usize::try_from(*i).ok(),
            AtomRef::Label(s) => s.trim().parse::<usize>().ok(),
        }
    }
}

impl fmt::Display for AtomRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomRef::Index(i) => write!(f, "{}", i),
            AtomRef::Label(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub symbol: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AtomRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic_number: Option<u32>,
}

impl Atom {
    pub fn new_2d(symbol: &str, x: f64, y: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            x,
            y,
            z: None,
            id: None,
            atomic_number: None,
        }
    }

    pub fn new_3d(symbol: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::new_2d(symbol, x, y)
        }
    }

    pub fn with_id(mut self, id: AtomRef) -> Self {
        self.id = Some(id);
        self
    }
}

fn default_bond_order() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub atom1: AtomRef,
    pub atom2: AtomRef,
    /// 1 single, 2 double, 1.5 aromatic, 3 triple
    #[serde(rename = "type", default = "default_bond_order")]
    pub order: f64,
    #[serde(default)]
    pub is_aromatic: bool,
}

impl Bond {
    pub fn new(atom1: i64, atom2: i64, order: f64) -> Self {
        Self {
            atom1: AtomRef::Index(atom1),
            atom2: AtomRef::Index(atom2),
            order,
            is_aromatic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoleculePayload {
    #[serde(default)]
    pub atoms: Vec<Atom>,
    #[serde(default)]
    pub bonds: Vec<Bond>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smiles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_3d: Option<bool>,
}

impl MoleculePayload {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        Self {
            atoms,
            bonds,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// true when the backend flagged the payload as 3D or any atom is off the z = 0 plane
    pub fn has_depth(&self) -> bool {
        self.is_3d.unwrap_or(false) || self.atoms.iter().any(|a| a.z.is_some_and(|z| z != 0.0))
    }

    /// Finds the atom a bond end points to: first by atom id, then by position.
    pub fn resolve_atom(&self, reference: &AtomRef) -> Option<usize> {
        if let Some(pos) = self
            .atoms
            .iter()
            .position(|a| a.id.as_ref() == Some(reference))
        {
            return Some(pos);
        }
        reference.as_position().filter(|&i| i < self.atoms.len())
    }

    /// both ends of a bond, or `None` (with a warning) if either end does not resolve
    pub fn resolve_bond(&self, bond: &Bond) -> Option<(usize, usize)> {
        match (self.resolve_atom(&bond.atom1), self.resolve_atom(&bond.atom2)) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => {
                warn!(
                    "bond {}-{} dropped: atom not found among {} atoms",
                    bond.atom1,
                    bond.atom2,
                    self.atoms.len()
                );
                None
            }
        }
    }
}
