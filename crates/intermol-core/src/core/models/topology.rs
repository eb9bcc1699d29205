use super::ids::AtomIndex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Valence contribution used by chemical perception. Aromatic bonds count as
    /// single bonds; callers wanting conjugation supply Kekulé orders.
    pub fn valence(&self) -> u8 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "ar" | "aromatic" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: AtomIndex, // First atom
    pub atom2: AtomIndex, // Second atom
    pub order: BondOrder, // Bond order
}

impl Bond {
    pub fn new(atom1: AtomIndex, atom2: AtomIndex, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn contains(&self, atom: AtomIndex) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    /// The partner of `atom` in this bond, or `None` if `atom` is not a member.
    pub fn other(&self, atom: AtomIndex) -> Option<AtomIndex> {
        if self.atom1 == atom {
            Some(self.atom2)
        } else if self.atom2 == atom {
            Some(self.atom1)
        } else {
            None
        }
    }
}
