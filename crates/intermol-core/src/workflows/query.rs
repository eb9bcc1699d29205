use super::contacts::ContactsResult;
use crate::core::io::contacts_csv::{ContactRecord, write_contacts_csv, write_contacts_csv_to_path};
use crate::core::models::ids::{AtomIndex, ContactIndex};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::bitset::BitSet;
use crate::core::utils::geometry::midpoint;
use crate::engine::contacts::ContactType;
use crate::engine::error::EngineError;
use nalgebra::Point3;
use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument};

/// Restricts queried contacts by the representative atoms of their
/// endpoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContactFilter {
    #[default]
    None,
    /// Keep a contact when either endpoint is in the set.
    Either(BitSet),
    /// Keep a contact when one endpoint is in the first set and the other in
    /// the second, in either orientation.
    Between(BitSet, BitSet),
}

impl ContactFilter {
    pub fn either(system: &MolecularSystem, predicate: impl Fn(AtomIndex) -> bool) -> Self {
        ContactFilter::Either(atom_set(system, predicate))
    }

    pub fn between(
        system: &MolecularSystem,
        first: impl Fn(AtomIndex) -> bool,
        second: impl Fn(AtomIndex) -> bool,
    ) -> Self {
        ContactFilter::Between(atom_set(system, first), atom_set(system, second))
    }

    pub fn accepts(&self, a1: AtomIndex, a2: AtomIndex) -> bool {
        match self {
            ContactFilter::None => true,
            ContactFilter::Either(set) => set.get(a1) || set.get(a2),
            ContactFilter::Between(s1, s2) => (s1.get(a1) && s2.get(a2)) || (s2.get(a1) && s1.get(a2)),
        }
    }
}

fn atom_set(system: &MolecularSystem, predicate: impl Fn(AtomIndex) -> bool) -> BitSet {
    let mut set = BitSet::new(system.atom_count());
    for atom in (0..system.atom_count()).filter(|&a| predicate(a)) {
        set.set(atom);
    }
    set
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDataParams {
    /// Contact types to report.
    pub types: Vec<ContactType>,
    /// Cylinder radius handed to renderers.
    pub radius: f64,
    pub filter: ContactFilter,
}

impl Default for ContactDataParams {
    fn default() -> Self {
        Self {
            types: ContactType::ALL.to_vec(),
            radius: 1.0,
            filter: ContactFilter::None,
        }
    }
}

impl ContactDataParams {
    pub fn with_types(mut self, types: &[ContactType]) -> Self {
        self.types = types.to_vec();
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_filter(mut self, filter: ContactFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Picking handle of one reported contact.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactPick {
    pub contact_index: ContactIndex,
    pub contact_type: ContactType,
    pub center1: Point3<f64>,
    pub center2: Point3<f64>,
    /// Representative atoms of both features.
    pub atom1: AtomIndex,
    pub atom2: AtomIndex,
}

impl ContactPick {
    /// Point renderers place the pick marker at.
    pub fn position(&self) -> Point3<f64> {
        midpoint(&self.center1, &self.center2)
    }

    pub fn distance(&self) -> f64 {
        (self.center2 - self.center1).norm()
    }

    /// One-line description, e.g. `ionic interaction: [LYS]12:A.NZ - [ASP]40:A.OD1 (3.02 Å)`.
    pub fn describe(&self, system: &MolecularSystem) -> String {
        format!(
            "{}: {} - {} ({:.2} \u{212B})",
            self.contact_type.label(),
            system.qualified_name(self.atom1),
            system.qualified_name(self.atom2),
            self.distance()
        )
    }
}

/// Parallel arrays describing the reported contacts, one entry per contact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactData {
    pub position1: Vec<Point3<f64>>,
    pub position2: Vec<Point3<f64>>,
    pub colors: Vec<[f32; 3]>,
    pub radii: Vec<f64>,
    pub picking: Vec<ContactPick>,
}

impl ContactData {
    pub fn len(&self) -> usize {
        self.picking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picking.is_empty()
    }
}

fn check_key(result: &ContactsResult, system: &MolecularSystem) -> Result<(), EngineError> {
    if result.system_key != system.key() {
        return Err(EngineError::StructureMismatch {
            expected: result.system_key,
            found: system.key(),
        });
    }
    Ok(())
}

/// Collects the surviving contacts of the requested types that pass the
/// filter. Endpoint positions are the feature centers.
#[instrument(skip_all, name = "contact_data_query")]
pub fn contact_data(
    result: &ContactsResult,
    system: &MolecularSystem,
    params: &ContactDataParams,
) -> Result<ContactData, EngineError> {
    check_key(result, system)?;

    let features = &result.features;
    let mut data = ContactData::default();
    for (i, contact) in result.surviving() {
        if !params.types.contains(&contact.contact_type) {
            continue;
        }
        let atom1 = features.representative(contact.index1);
        let atom2 = features.representative(contact.index2);
        if !params.filter.accepts(atom1, atom2) {
            continue;
        }
        let center1 = *features.center(contact.index1);
        let center2 = *features.center(contact.index2);
        data.position1.push(center1);
        data.position2.push(center2);
        data.colors.push(contact.contact_type.rgb());
        data.radii.push(params.radius);
        data.picking.push(ContactPick {
            contact_index: i,
            contact_type: contact.contact_type,
            center1,
            center2,
            atom1,
            atom2,
        });
    }
    debug!(reported = data.len(), "Contact data collected.");
    Ok(data)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelUnit {
    #[default]
    Bare,
    Angstrom,
    Nanometer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelData {
    pub positions: Vec<Point3<f64>>,
    pub sizes: Vec<f64>,
    pub colors: Vec<[f32; 3]>,
    pub texts: Vec<String>,
}

pub const DEFAULT_LABEL_SIZE: f64 = 2.0;

fn distance_text(distance: f64, unit: LabelUnit) -> String {
    match unit {
        LabelUnit::Angstrom => format!("{distance:.2} \u{212B}"),
        LabelUnit::Nanometer => format!("{:.2} nm", distance / 10.0),
        LabelUnit::Bare => format!("{distance:.2}"),
    }
}

/// Distance labels at the midpoint of every reported contact.
pub fn label_data(data: &ContactData, unit: LabelUnit, size: f64) -> LabelData {
    let (positions, texts) = data
        .position1
        .iter()
        .zip(&data.position2)
        .map(|(p1, p2)| (midpoint(p1, p2), distance_text((p2 - p1).norm(), unit)))
        .unzip();
    LabelData {
        positions,
        sizes: vec![size; data.len()],
        colors: data.colors.clone(),
        texts,
    }
}

/// Table rows for the surviving contacts, one per contact.
pub fn contact_records(result: &ContactsResult, system: &MolecularSystem) -> Result<Vec<ContactRecord>, EngineError> {
    check_key(result, system)?;
    let features = &result.features;
    Ok(result
        .surviving()
        .map(|(i, c)| ContactRecord {
            contact_index: i,
            contact_type: c.contact_type.label().to_string(),
            feature1: c.index1,
            feature2: c.index2,
            atom1: system.qualified_name(features.representative(c.index1)),
            atom2: system.qualified_name(features.representative(c.index2)),
            distance: (features.center(c.index2) - features.center(c.index1)).norm(),
        })
        .collect())
}

/// Writes the surviving contacts as CSV.
pub fn export_csv<W: Write>(result: &ContactsResult, system: &MolecularSystem, writer: W) -> Result<(), EngineError> {
    let records = contact_records(result, system)?;
    write_contacts_csv(writer, &records)?;
    Ok(())
}

pub fn export_csv_to_path(result: &ContactsResult, system: &MolecularSystem, path: &Path) -> Result<(), EngineError> {
    let records = contact_records(result, system)?;
    write_contacts_csv_to_path(path, &records)?;
    debug!(path = %path.display(), rows = records.len(), "Contacts exported.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::elements::Element;
    use crate::core::models::atom::Atom;
    use crate::engine::cache::StructureCache;
    use crate::engine::config::ContactParams;
    use crate::engine::features::test_support::Mol;
    use crate::engine::progress::ProgressReporter;
    use crate::workflows::contacts;
    use tempfile::tempdir;

    /// Ammonium/chloride pair plus two methane carbons 3.5 Å apart.
    fn scene() -> (Mol, ContactsResult) {
        let mut mol = Mol::new();
        let nh4 = mol.residue("NH4");
        mol.atom_with(nh4, Atom::new("N", Element::N, Point3::new(0.0, 0.0, 0.0)).with_formal_charge(1));
        let cl = mol.residue("CL");
        mol.atom(cl, "CL", Element::CL, [3.0, 0.0, 0.0]);
        let m1 = mol.residue("CH4");
        mol.atom(m1, "C", Element::C, [10.0, 0.0, 0.0]);
        let m2 = mol.residue("CH4");
        mol.atom(m2, "C", Element::C, [13.5, 0.0, 0.0]);
        let result = contacts::run(
            &mol.system,
            &ContactParams::default(),
            &mut StructureCache::new(),
            &ProgressReporter::new(),
        )
        .unwrap();
        (mol, result)
    }

    #[test]
    fn reports_all_types_by_default() {
        let (mol, result) = scene();
        let data = contact_data(&result, &mol.system, &ContactDataParams::default()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.position1.len(), 2);
        assert_eq!(data.radii, vec![1.0, 1.0]);
        assert_eq!(data.colors[0], ContactType::IonicInteraction.rgb());
        assert_eq!(data.picking[1].contact_type, ContactType::Hydrophobic);
    }

    #[test]
    fn type_selection_and_radius_are_honoured() {
        let (mol, result) = scene();
        let params = ContactDataParams::default()
            .with_types(&[ContactType::Hydrophobic])
            .with_radius(0.3);
        let data = contact_data(&result, &mol.system, &params).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.radii, vec![0.3]);
        assert!((data.picking[0].distance() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn filters_match_either_endpoint_or_strict_pairs() {
        let (mol, result) = scene();
        let system = &mol.system;
        let nitrogen = |a: AtomIndex| system.element(a) == Element::N;
        let chlorine = |a: AtomIndex| system.element(a) == Element::CL;

        let either = ContactDataParams::default().with_filter(ContactFilter::either(system, nitrogen));
        let data = contact_data(&result, system, &either).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.picking[0].contact_type, ContactType::IonicInteraction);

        // orientation of the two sets does not matter
        let pair = ContactDataParams::default().with_filter(ContactFilter::between(system, chlorine, nitrogen));
        assert_eq!(contact_data(&result, system, &pair).unwrap().len(), 1);

        let same = ContactDataParams::default().with_filter(ContactFilter::between(system, nitrogen, nitrogen));
        assert!(contact_data(&result, system, &same).unwrap().is_empty());
    }

    #[test]
    fn pick_describes_the_contact() {
        let (mol, result) = scene();
        let data = contact_data(&result, &mol.system, &ContactDataParams::default()).unwrap();
        let pick = &data.picking[0];
        assert_eq!(pick.position(), Point3::new(1.5, 0.0, 0.0));
        assert_eq!(
            pick.describe(&mol.system),
            "ionic interaction: [NH4]1:A.N - [CL]2:A.CL (3.00 \u{212B})"
        );
    }

    #[test]
    fn label_texts_follow_the_unit() {
        let (mol, result) = scene();
        let data = contact_data(&result, &mol.system, &ContactDataParams::default()).unwrap();

        let bare = label_data(&data, LabelUnit::default(), DEFAULT_LABEL_SIZE);
        assert_eq!(bare.texts, vec!["3.00", "3.50"]);
        assert_eq!(bare.sizes, vec![2.0, 2.0]);
        assert_eq!(bare.positions[1], Point3::new(11.75, 0.0, 0.0));

        let angstrom = label_data(&data, LabelUnit::Angstrom, 1.0);
        assert_eq!(angstrom.texts[0], "3.00 \u{212B}");

        let nm = label_data(&data, LabelUnit::Nanometer, 1.0);
        assert_eq!(nm.texts, vec!["0.30 nm", "0.35 nm"]);
    }

    #[test]
    fn queries_against_a_modified_structure_fail() {
        let (mut mol, result) = scene();
        mol.system.atom_mut(0).unwrap().position = Point3::new(0.5, 0.0, 0.0);
        let err = contact_data(&result, &mol.system, &ContactDataParams::default()).unwrap_err();
        assert!(matches!(err, EngineError::StructureMismatch { .. }));
    }

    #[test]
    fn csv_export_lists_surviving_contacts() {
        let (mol, result) = scene();
        let mut buffer = Vec::new();
        export_csv(&result, &mol.system, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "contact_index,type,feature1,feature2,atom1,atom2,distance");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0,ionic interaction,"));
        assert!(lines[2].contains("hydrophobic contact"));

        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        export_csv_to_path(&result, &mol.system, &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), text);
    }
}
