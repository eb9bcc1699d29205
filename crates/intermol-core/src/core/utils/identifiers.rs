use crate::core::models::atom::AtomRole;
use crate::core::models::residue::ResidueClass;
use phf::{Set, phf_set};

static AMINO_ACID_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "SEC", "PYL", "MSE", "UNK",
};

static NUCLEOTIDE_NAMES: Set<&'static str> = phf_set! {
    "A", "C", "G", "T", "U", "I", "N",
    "DA", "DC", "DG", "DT", "DU", "DI", "DN",
};

static WATER_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "SOL", "TIP", "TIP3", "SPC",
};

static PROTEIN_BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "N", "H", "HN", "CA", "HA", "C", "O", "OXT", "H1", "H2", "H3", "NT",
    "HT1", "HT2", "HT3", "OT1", "OT2", "HOXT", "HA1", "HA2", "HA3", "1HA", "2HA",
};

static NUCLEIC_BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "P", "OP1", "OP2", "OP3", "O1P", "O2P", "O3P", "HOP2", "HOP3",
    "O5'", "C5'", "H5'", "H5''", "C4'", "H4'", "O4'", "C3'", "H3'", "O3'", "HO3'",
    "C2'", "H2'", "H2''", "O2'", "HO2'", "C1'", "H1'", "HO5'",
};

pub fn is_amino_acid(residue_name: &str) -> bool {
    AMINO_ACID_NAMES.contains(residue_name.trim())
}

pub fn is_nucleotide(residue_name: &str) -> bool {
    NUCLEOTIDE_NAMES.contains(residue_name.trim())
}

pub fn is_water(residue_name: &str) -> bool {
    WATER_NAMES.contains(residue_name.trim())
}

pub fn classify_residue(residue_name: &str) -> ResidueClass {
    if is_amino_acid(residue_name) {
        ResidueClass::AminoAcid
    } else if is_nucleotide(residue_name) {
        ResidueClass::Nucleotide
    } else if is_water(residue_name) {
        ResidueClass::Water
    } else {
        ResidueClass::Other
    }
}

/// Backbone test by atom name within a residue of the given class. Atoms of
/// non-polymer residues are never backbone.
pub fn is_backbone_atom(class: ResidueClass, atom_name: &str) -> bool {
    let name = atom_name.trim();
    match class {
        ResidueClass::AminoAcid => PROTEIN_BACKBONE_ATOM_NAMES.contains(name),
        ResidueClass::Nucleotide => {
            NUCLEIC_BACKBONE_ATOM_NAMES.contains(name)
                || NUCLEIC_BACKBONE_ATOM_NAMES.contains(name.replace('*', "'").as_str())
        }
        ResidueClass::Water | ResidueClass::Other => false,
    }
}

/// Infers the [`AtomRole`] of an atom from its residue and atom names.
pub fn infer_atom_role(residue_name: &str, atom_name: &str) -> AtomRole {
    match classify_residue(residue_name) {
        ResidueClass::Water => AtomRole::Water,
        ResidueClass::Other => AtomRole::Ligand,
        class if is_backbone_atom(class, atom_name) => AtomRole::Backbone,
        _ => AtomRole::Sidechain,
    }
}
