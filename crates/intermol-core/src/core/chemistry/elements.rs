use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_VDW_RADIUS: f64 = 2.0;

static SYMBOLS: [&str; 119] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

// Van der Waals radii in Angstroms (Bondi / Mantina).
static VDW_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 1.1, "He" => 1.4,
    "Li" => 1.81, "Be" => 1.53, "B" => 1.92, "C" => 1.7, "N" => 1.55, "O" => 1.52,
    "F" => 1.47, "Ne" => 1.54,
    "Na" => 2.27, "Mg" => 1.73, "Al" => 1.84, "Si" => 2.1, "P" => 1.8, "S" => 1.8,
    "Cl" => 1.75, "Ar" => 1.88,
    "K" => 2.75, "Ca" => 2.31, "Sc" => 2.3, "Ti" => 2.15, "V" => 2.05, "Cr" => 2.05,
    "Mn" => 2.05, "Fe" => 2.05, "Co" => 2.0, "Ni" => 1.63, "Cu" => 1.4, "Zn" => 1.39,
    "Ga" => 1.87, "Ge" => 2.11, "As" => 1.85, "Se" => 1.9, "Br" => 1.83, "Kr" => 2.02,
    "Rb" => 3.03, "Sr" => 2.49, "Pd" => 1.63, "Ag" => 1.72, "Cd" => 1.58, "In" => 1.93,
    "Sn" => 2.17, "Sb" => 2.06, "Te" => 2.06, "I" => 1.98, "Xe" => 2.16,
    "Cs" => 3.43, "Ba" => 2.68, "Pt" => 1.75, "Au" => 1.66, "Hg" => 1.55, "Tl" => 1.96,
    "Pb" => 2.02, "Bi" => 2.07, "Po" => 1.97, "At" => 2.02, "Rn" => 2.2,
    "Fr" => 3.48, "Ra" => 2.83, "U" => 1.86,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol '{0}'")]
pub struct ParseElementError(pub String);

/// A chemical element identified by its atomic number.
///
/// Atomic number `0` is reserved for unknown or dummy atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Element(u8);

impl Element {
    pub const UNKNOWN: Element = Element(0);
    pub const H: Element = Element(1);
    pub const LI: Element = Element(3);
    pub const BE: Element = Element(4);
    pub const C: Element = Element(6);
    pub const N: Element = Element(7);
    pub const O: Element = Element(8);
    pub const F: Element = Element(9);
    pub const NA: Element = Element(11);
    pub const MG: Element = Element(12);
    pub const AL: Element = Element(13);
    pub const P: Element = Element(15);
    pub const S: Element = Element(16);
    pub const CL: Element = Element(17);
    pub const K: Element = Element(19);
    pub const CA: Element = Element(20);
    pub const SC: Element = Element(21);
    pub const FE: Element = Element(26);
    pub const CU: Element = Element(29);
    pub const ZN: Element = Element(30);
    pub const GA: Element = Element(31);
    pub const BR: Element = Element(35);
    pub const RB: Element = Element(37);
    pub const SR: Element = Element(38);
    pub const CD: Element = Element(48);
    pub const IN: Element = Element(49);
    pub const SN: Element = Element(50);
    pub const SB: Element = Element(51);
    pub const I: Element = Element(53);
    pub const CS: Element = Element(55);
    pub const BA: Element = Element(56);
    pub const HG: Element = Element(80);
    pub const TL: Element = Element(81);
    pub const PB: Element = Element(82);
    pub const BI: Element = Element(83);
    pub const AT: Element = Element(85);
    pub const FR: Element = Element(87);
    pub const RA: Element = Element(88);

    /// Creates an element from its atomic number; numbers past oganesson map to
    /// [`Element::UNKNOWN`].
    pub const fn from_atomic_number(number: u8) -> Self {
        if (number as usize) < SYMBOLS.len() {
            Element(number)
        } else {
            Element::UNKNOWN
        }
    }

    #[inline]
    pub const fn atomic_number(self) -> u8 {
        self.0
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[self.0 as usize]
    }

    /// Looks up an element by symbol, ignoring case and surrounding whitespace.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return None;
        }
        SYMBOLS
            .iter()
            .skip(1)
            .position(|s| s.eq_ignore_ascii_case(symbol))
            .map(|i| Element((i + 1) as u8))
    }

    pub fn is_hydrogen(self) -> bool {
        self == Element::H
    }

    pub fn is_halogen(self) -> bool {
        matches!(self.0, 9 | 17 | 35 | 53 | 85)
    }

    pub fn is_alkali_metal(self) -> bool {
        matches!(self.0, 3 | 11 | 19 | 37 | 55 | 87)
    }

    pub fn is_alkaline_earth_metal(self) -> bool {
        matches!(self.0, 4 | 12 | 20 | 38 | 56 | 88)
    }

    /// Transition metals of groups 3-11. Zinc, cadmium and mercury are handled as
    /// post-transition metals.
    pub fn is_transition_metal(self) -> bool {
        matches!(self.0, 21..=29 | 39..=47 | 72..=79 | 104..=111)
    }

    pub fn is_post_transition_metal(self) -> bool {
        matches!(
            self.0,
            13 | 30 | 31 | 48 | 49 | 50 | 80 | 81 | 82 | 83 | 84 | 112..=116
        )
    }

    pub fn is_lanthanide(self) -> bool {
        matches!(self.0, 57..=71)
    }

    pub fn is_actinide(self) -> bool {
        matches!(self.0, 89..=103)
    }

    pub fn is_metal(self) -> bool {
        self.is_alkali_metal()
            || self.is_alkaline_earth_metal()
            || self.is_transition_metal()
            || self.is_post_transition_metal()
            || self.is_lanthanide()
            || self.is_actinide()
    }

    /// Van der Waals radius in Angstroms, falling back to 2.0 for elements without
    /// a tabulated value.
    pub fn vdw_radius(self) -> f64 {
        VDW_RADII
            .get(self.symbol())
            .copied()
            .unwrap_or(DEFAULT_VDW_RADIUS)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::from_symbol(s).ok_or_else(|| ParseElementError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_symbol_is_case_insensitive() {
        assert_eq!(Element::from_symbol("CL"), Some(Element::CL));
        assert_eq!(Element::from_symbol("cl"), Some(Element::CL));
        assert_eq!(Element::from_symbol(" Zn "), Some(Element::ZN));
        assert_eq!(Element::from_symbol("c"), Some(Element::C));
    }

    #[test]
    fn from_symbol_rejects_unknown_and_dummy_symbols() {
        assert_eq!(Element::from_symbol(""), None);
        assert_eq!(Element::from_symbol("X"), None);
        assert_eq!(Element::from_symbol("Qq"), None);
        assert!("Zz".parse::<Element>().is_err());
    }

    #[test]
    fn symbol_and_atomic_number_agree() {
        assert_eq!(Element::O.symbol(), "O");
        assert_eq!(Element::BR.symbol(), "Br");
        assert_eq!(Element::from_atomic_number(26), Element::FE);
        assert_eq!(Element::from_atomic_number(200), Element::UNKNOWN);
        assert_eq!(Element::HG.to_string(), "Hg");
    }

    #[test]
    fn halogens_are_classified() {
        for el in [Element::F, Element::CL, Element::BR, Element::I, Element::AT] {
            assert!(el.is_halogen(), "{el} should be a halogen");
        }
        assert!(!Element::O.is_halogen());
    }

    #[test]
    fn metal_classes_are_disjoint_where_expected() {
        assert!(Element::FE.is_transition_metal());
        assert!(!Element::ZN.is_transition_metal());
        assert!(Element::ZN.is_post_transition_metal());
        assert!(Element::NA.is_alkali_metal());
        assert!(Element::MG.is_alkaline_earth_metal());
        assert!(Element::from_symbol("Gd").unwrap().is_lanthanide());
        assert!(Element::from_symbol("U").unwrap().is_actinide());
    }

    #[test]
    fn non_metals_are_not_metals() {
        for el in [Element::H, Element::C, Element::N, Element::O, Element::S, Element::CL] {
            assert!(!el.is_metal(), "{el} should not be a metal");
        }
        assert!(Element::CA.is_metal());
        assert!(Element::CU.is_metal());
    }

    #[test]
    fn vdw_radius_uses_table_with_default_fallback() {
        assert_eq!(Element::C.vdw_radius(), 1.7);
        assert_eq!(Element::H.vdw_radius(), 1.1);
        assert_eq!(Element::from_symbol("Og").unwrap().vdw_radius(), 2.0);
        assert_eq!(Element::UNKNOWN.vdw_radius(), 2.0);
    }
}
