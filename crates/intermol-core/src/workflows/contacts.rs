use crate::core::models::ids::ContactIndex;
use crate::core::models::system::{MolecularSystem, SystemKey};
use crate::core::utils::bitset::BitSet;
use crate::engine::cache::StructureCache;
use crate::engine::config::ContactParams;
use crate::engine::contacts::{AdjacencyList, Contact, ContactSet, ContactStore, ContactType, Contacts, FrozenContacts};
use crate::engine::detectors::DetectionContext;
use crate::engine::error::EngineError;
use crate::engine::features::Features;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use tracing::{debug, info, instrument};

/// Everything a contact run produces for one state of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactsResult {
    /// Key of the structure state the contacts were computed for.
    pub system_key: SystemKey,
    pub features: Features,
    /// Every detected contact, in detection order.
    pub contacts: ContactStore,
    /// Contacts that survived refinement.
    pub contact_set: ContactSet,
    pub adjacency: AdjacencyList,
    /// Features that took part in at least one detected contact.
    pub participants: BitSet,
}

impl ContactsResult {
    fn new(system_key: SystemKey, frozen: FrozenContacts) -> Self {
        Self {
            system_key,
            features: frozen.features,
            contacts: frozen.store,
            contact_set: frozen.contact_set,
            adjacency: frozen.adjacency,
            participants: frozen.participants,
        }
    }

    /// Surviving contacts in ascending index order.
    pub fn surviving(&self) -> impl Iterator<Item = (ContactIndex, &Contact)> + '_ {
        self.contact_set
            .iter()
            .filter_map(|i| self.contacts.get(i).map(|c| (i, c)))
    }

    pub fn count_of(&self, contact_type: ContactType) -> usize {
        self.surviving().filter(|(_, c)| c.contact_type == contact_type).count()
    }
}

/// Detects and refines all non-covalent contacts of `system`.
///
/// Valence models and the atom spatial hash come from `cache`, so repeated
/// runs on an unchanged structure reuse them.
#[instrument(skip_all, name = "contacts_workflow")]
pub fn run(
    system: &MolecularSystem,
    params: &ContactParams,
    cache: &mut StructureCache,
    reporter: &ProgressReporter,
) -> Result<ContactsResult, EngineError> {
    if system.is_empty() {
        return Err(EngineError::EmptyStructure);
    }
    info!(
        atoms = system.atom_count(),
        residues = system.residues().len(),
        "Starting contact detection."
    );

    // === Phase 1: Valence model ===
    let valence = reporter.phase("Valence Model", || cache.valence_model(system, &params.valence));

    // === Phase 2: Feature extraction ===
    let features = reporter.phase("Feature Extraction", || Features::extract(system, &valence));
    info!(features = features.len(), "Features extracted.");
    let mut state = Contacts::new(features)?;

    // === Phase 3: Detection ===
    reporter.report(Progress::PhaseStart {
        name: "Contact Detection",
    });
    let found = match state.feature_hash() {
        Some(feature_hash) => {
            let ctx = DetectionContext {
                system,
                valence: &valence,
                features: state.features(),
                feature_hash,
                master_model_index: params.master_model_index,
            };
            tasks::detection::run(&ctx, params, reporter)
        }
        None => {
            debug!("Structure has no features, skipping detection.");
            Vec::new()
        }
    };
    state.extend(found);
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Freeze and refine ===
    let mut frozen = state.freeze();
    let atom_hash = cache.atom_hash(system)?;
    reporter.phase("Refinement", || {
        tasks::refinement::run(&mut frozen, system, &atom_hash, params, reporter)
    });

    let result = ContactsResult::new(system.key(), frozen);
    info!(
        detected = result.contacts.len(),
        surviving = result.contact_set.count(),
        "Workflow complete."
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::elements::Element;
    use crate::core::models::atom::Atom;
    use crate::engine::features::test_support::Mol;
    use nalgebra::Point3;
    use std::sync::Mutex;

    fn contacts_of(mol: &Mol, params: &ContactParams) -> ContactsResult {
        run(&mol.system, params, &mut StructureCache::new(), &ProgressReporter::new()).unwrap()
    }

    /// Ammonium and chloride 3 Å apart.
    fn point_charges() -> Mol {
        let mut mol = Mol::new();
        let nh4 = mol.residue("NH4");
        mol.atom_with(nh4, Atom::new("N", Element::N, Point3::new(0.0, 0.0, 0.0)).with_formal_charge(1));
        let cl = mol.residue("CL");
        mol.atom(cl, "CL", Element::CL, [3.0, 0.0, 0.0]);
        mol
    }

    /// Acetate and methylammonium: an ionic pair plus a hydrogen bond from
    /// the nitrogen to one carboxylate oxygen.
    fn salt_bridge() -> Mol {
        let mut mol = Mol::new();
        let ace = mol.residue("ACT");
        let c1 = mol.atom(ace, "C1", Element::C, [0.0, 0.0, 0.0]);
        let o1 = mol.atom(ace, "O1", Element::O, [1.25, 0.0, 0.0]);
        let o2 = mol.atom(ace, "O2", Element::O, [-0.62, 1.08, 0.0]);
        let c2 = mol.atom(ace, "C2", Element::C, [-0.76, -1.31, 0.0]);
        mol.double(c1, o1);
        mol.bond(c1, o2);
        mol.bond(c1, c2);

        let mam = mol.residue("MAM");
        let n = mol.atom_with(mam, Atom::new("N1", Element::N, Point3::new(4.05, 0.0, 0.0)).with_formal_charge(1));
        let c3 = mol.atom(mam, "C1", Element::C, [4.553, 1.381, 0.0]);
        mol.bond(n, c3);
        mol
    }

    #[test]
    fn empty_structure_is_rejected() {
        let result = run(
            &MolecularSystem::new(),
            &ContactParams::default(),
            &mut StructureCache::new(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::EmptyStructure)));
    }

    #[test]
    fn opposite_point_charges_form_one_ionic_contact() {
        let result = contacts_of(&point_charges(), &ContactParams::default());
        assert_eq!(result.count_of(ContactType::IonicInteraction), 1);
        assert_eq!(result.count_of(ContactType::HydrogenBond), 0);
        assert_eq!(result.contact_set.count(), 1);
        assert_eq!(result.participants.count_ones(), 2);
    }

    #[test]
    fn salt_bridge_wins_over_hydrogen_bond() {
        let mol = salt_bridge();
        let refined = contacts_of(&mol, &ContactParams::default());
        assert_eq!(refined.count_of(ContactType::IonicInteraction), 1);
        assert_eq!(refined.count_of(ContactType::HydrogenBond), 0);
        // still detected, only cleared from the set
        assert!(
            refined
                .contacts
                .iter()
                .any(|c| c.contact_type == ContactType::HydrogenBond)
        );

        let params = ContactParams::builder().refine_salt_bridges(false).build();
        let unrefined = contacts_of(&mol, &params);
        assert_eq!(unrefined.count_of(ContactType::IonicInteraction), 1);
        assert_eq!(unrefined.count_of(ContactType::HydrogenBond), 1);
    }

    #[test]
    fn structure_without_features_yields_no_contacts() {
        let mut mol = Mol::new();
        let res = mol.residue("ARG");
        mol.atom(res, "H1", Element::H, [0.0, 0.0, 0.0]);
        let result = contacts_of(&mol, &ContactParams::default());
        assert!(result.features.is_empty());
        assert!(result.contacts.is_empty());
        assert_eq!(result.contact_set.count(), 0);
    }

    #[test]
    fn runs_are_deterministic_and_canonical() {
        let mol = salt_bridge();
        let mut cache = StructureCache::new();
        let reporter = ProgressReporter::new();
        let params = ContactParams::default();
        let first = run(&mol.system, &params, &mut cache, &reporter).unwrap();
        let second = run(&mol.system, &params, &mut cache, &reporter).unwrap();
        let fresh = contacts_of(&mol, &params);
        assert_eq!(first, second);
        assert_eq!(first, fresh);
        assert!(first.contacts.iter().all(|c| c.index1 < c.index2));
    }

    #[test]
    fn phases_are_reported_in_order() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|e| {
            if let Progress::PhaseStart { name } = e {
                events.lock().unwrap().push(name);
            }
        }));
        run(
            &point_charges().system,
            &ContactParams::default(),
            &mut StructureCache::new(),
            &reporter,
        )
        .unwrap();
        drop(reporter);
        assert_eq!(
            events.into_inner().unwrap(),
            vec!["Valence Model", "Feature Extraction", "Contact Detection", "Refinement"]
        );
    }
}
