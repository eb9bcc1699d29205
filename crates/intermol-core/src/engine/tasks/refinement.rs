use crate::core::models::ids::{AtomIndex, ContactIndex, ResidueIndex};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::midpoint;
use crate::core::utils::spatial_hash::SpatialHash;
use crate::engine::config::ContactParams;
use crate::engine::contacts::{ContactType, FrozenContacts, invalid_refinement_contact};
use crate::engine::features::FeatureType;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::{BTreeSet, HashMap};
use std::ops::ControlFlow;
use tracing::{debug, info, instrument};

/// Hydrogens never block, neither do atoms closer than this (squared, Å²)
/// to either feature center.
const MIN_BLOCKER_CENTER_DIST_SQ: f64 = 1.0;
const LINE_OF_SIGHT_SEARCH_RADIUS: f64 = 3.0;

/// Post-detection filters. Each pass only ever removes contacts from the
/// present set, and they run in [`RefinementPass::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementPass {
    LineOfSight,
    Hydrophobic,
    SaltBridge,
    PiStacking,
    MetalCoordination,
    WeakHydrogenBond,
}

impl RefinementPass {
    pub const ORDER: [RefinementPass; 6] = [
        RefinementPass::LineOfSight,
        RefinementPass::Hydrophobic,
        RefinementPass::SaltBridge,
        RefinementPass::PiStacking,
        RefinementPass::MetalCoordination,
        RefinementPass::WeakHydrogenBond,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RefinementPass::LineOfSight => "line_of_sight",
            RefinementPass::Hydrophobic => "hydrophobic",
            RefinementPass::SaltBridge => "salt_bridge",
            RefinementPass::PiStacking => "pi_stacking",
            RefinementPass::MetalCoordination => "metal_coordination",
            RefinementPass::WeakHydrogenBond => "weak_hydrogen_bond",
        }
    }

    fn enabled(&self, params: &ContactParams) -> bool {
        match self {
            RefinementPass::SaltBridge => params.refine_salt_bridges,
            RefinementPass::WeakHydrogenBond => params.refine_weak_hydrogen_bonds,
            _ => true,
        }
    }
}

/// Applies every enabled refinement pass in order and returns the number of
/// contacts removed. Each applied pass is reported as a
/// [`Progress::PassFinish`] event.
#[instrument(skip_all, name = "contact_refinement_task")]
pub fn run(
    contacts: &mut FrozenContacts,
    system: &MolecularSystem,
    atom_hash: &SpatialHash,
    params: &ContactParams,
    reporter: &ProgressReporter,
) -> usize {
    let before = contacts.contact_set.count();
    for pass in RefinementPass::ORDER {
        if !pass.enabled(params) {
            debug!(pass = pass.name(), "Refinement pass disabled, skipping.");
            continue;
        }
        let removed = apply(pass, contacts, system, atom_hash, params);
        debug!(pass = pass.name(), removed, "Refinement pass finished.");
        reporter.report(Progress::PassFinish {
            pass: pass.name(),
            removed,
        });
    }
    let removed = before - contacts.contact_set.count();
    info!(
        before,
        after = contacts.contact_set.count(),
        removed,
        "Contact refinement complete."
    );
    removed
}

fn apply(
    pass: RefinementPass,
    contacts: &mut FrozenContacts,
    system: &MolecularSystem,
    atom_hash: &SpatialHash,
    params: &ContactParams,
) -> usize {
    match pass {
        RefinementPass::LineOfSight => refine_line_of_sight(contacts, system, atom_hash, params),
        RefinementPass::Hydrophobic => refine_hydrophobic(contacts, system),
        RefinementPass::SaltBridge => suppress_if_overlaps(
            contacts,
            |t| t == ContactType::IonicInteraction,
            |t| t.is_hydrogen_bond(),
        ),
        RefinementPass::PiStacking => suppress_if_overlaps(
            contacts,
            |t| t == ContactType::PiStacking,
            |t| matches!(t, ContactType::Hydrophobic | ContactType::CationPi),
        ),
        RefinementPass::MetalCoordination => suppress_if_overlaps(
            contacts,
            |t| t == ContactType::MetalCoordination,
            |t| t == ContactType::IonicInteraction,
        ),
        RefinementPass::WeakHydrogenBond => refine_weak_hydrogen_bonds(contacts),
    }
}

/// Removes contacts whose straight line between the feature centers is
/// obstructed by another heavy atom.
///
/// An atom blocks when the midpoint of the two centers lies inside its van
/// der Waals sphere scaled by `line_of_sight_dist_factor`. Atoms of either
/// feature, atoms that cannot pair with either representative, and atoms
/// within 1 Å of either center are ignored.
pub fn refine_line_of_sight(
    contacts: &mut FrozenContacts,
    system: &MolecularSystem,
    atom_hash: &SpatialHash,
    params: &ContactParams,
) -> usize {
    let factor = params.line_of_sight_dist_factor;
    let factor_sq = factor * factor;
    let master = params.master_model_index;
    let present: Vec<ContactIndex> = contacts.contact_set.iter().collect();

    let mut removed = 0;
    for i in present {
        let contact = *contacts.contact(i);
        let features = &contacts.features;
        let c1 = *features.center(contact.index1);
        let c2 = *features.center(contact.index2);
        let atoms1 = features.atoms(contact.index1);
        let atoms2 = features.atoms(contact.index2);
        let (r1, r2) = contacts.representatives(i);
        let mid = midpoint(&c1, &c2);

        let mut blocker = None;
        atom_hash.each_within(&mid, LINE_OF_SIGHT_SEARCH_RADIUS * factor, |w, dist_sq| {
            let element = system.element(w);
            if element.is_hydrogen()
                || element.vdw_radius().powi(2) * factor_sq <= dist_sq
                || invalid_refinement_contact(system, r1, w, master)
                || invalid_refinement_contact(system, r2, w, master)
                || atoms1.contains(&w)
                || atoms2.contains(&w)
            {
                return ControlFlow::Continue(());
            }
            let p = system.position(w);
            if (c1 - p).norm_squared() > MIN_BLOCKER_CENTER_DIST_SQ
                && (c2 - p).norm_squared() > MIN_BLOCKER_CENTER_DIST_SQ
            {
                blocker = Some(w);
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        });

        if let Some(w) = blocker {
            contacts.contact_set.clear(i);
            removed += 1;
            debug!(
                contact = i,
                blocker = %system.qualified_name(w),
                "Contact blocked by atom."
            );
        }
    }
    removed
}

/// Keeps, for every atom, only its shortest hydrophobic contact to each
/// partner residue.
///
/// Each contact is checked twice: once keyed by the first atom and the
/// residue of the second, once the other way round. A contact that was the
/// best under the first key can still lose under the second.
pub fn refine_hydrophobic(contacts: &mut FrozenContacts, system: &MolecularSystem) -> usize {
    let mut best: HashMap<(AtomIndex, ResidueIndex), (f64, ContactIndex)> = HashMap::new();
    let mut removed = 0;

    let mut keep_closest = |contacts: &mut FrozenContacts, key: (AtomIndex, ResidueIndex), dist: f64, i: ContactIndex| {
        let loser = match best.get(&key).copied() {
            Some((min_dist, _)) if dist >= min_dist => i,
            Some((_, previous)) => {
                best.insert(key, (dist, i));
                previous
            }
            None => {
                best.insert(key, (dist, i));
                return;
            }
        };
        if contacts.contact_set.clear(loser) {
            removed += 1;
        }
    };

    for i in contacts.present_of_type(ContactType::Hydrophobic) {
        let (a1, a2) = contacts.representatives(i);
        let dist = (system.position(a1) - system.position(a2)).norm();
        keep_closest(contacts, (a1, system.residue_index_of(a2)), dist, i);
        keep_closest(contacts, (a2, system.residue_index_of(a1)), dist, i);
    }
    removed
}

/// Maps every atom of every present contact matching `filter` to those
/// contacts.
fn index_by_atom(contacts: &FrozenContacts, filter: fn(ContactType) -> bool) -> HashMap<AtomIndex, Vec<ContactIndex>> {
    let mut index: HashMap<AtomIndex, Vec<ContactIndex>> = HashMap::new();
    for i in contacts.contact_set.iter() {
        let contact = contacts.contact(i);
        if !filter(contact.contact_type) {
            continue;
        }
        for f in [contact.index1, contact.index2] {
            for &a in contacts.features.atoms(f) {
                let entry = index.entry(a).or_default();
                if entry.last() != Some(&i) {
                    entry.push(i);
                }
            }
        }
    }
    index
}

/// Contacts listed under both atoms.
fn shared(index: &HashMap<AtomIndex, Vec<ContactIndex>>, (a, b): (AtomIndex, AtomIndex)) -> Vec<ContactIndex> {
    match (index.get(&a), index.get(&b)) {
        (Some(l1), Some(l2)) => l1.iter().filter(|i| l2.contains(i)).copied().collect(),
        _ => Vec::new(),
    }
}

/// Removes every present `subordinate` contact that overlaps a present
/// `priority` contact.
///
/// Two contacts overlap when both representatives of one lie among the
/// atoms of the other's features.
pub fn suppress_if_overlaps(
    contacts: &mut FrozenContacts,
    priority: fn(ContactType) -> bool,
    subordinate: fn(ContactType) -> bool,
) -> usize {
    let priority_atoms = index_by_atom(contacts, priority);
    let subordinate_atoms = index_by_atom(contacts, subordinate);

    let mut suppressed = BTreeSet::new();
    for i in contacts.contact_set.iter() {
        let contact_type = contacts.store.contact_type(i);
        let reps = contacts.representatives(i);
        if subordinate(contact_type) && !shared(&priority_atoms, reps).is_empty() {
            suppressed.insert(i);
        } else if priority(contact_type) {
            suppressed.extend(shared(&subordinate_atoms, reps));
        }
    }

    let mut removed = 0;
    for i in suppressed {
        if contacts.contact_set.clear(i) {
            removed += 1;
        }
    }
    removed
}

/// Removes weak hydrogen bonds whose acceptor also takes part in a regular
/// hydrogen bond.
///
/// The acceptor's adjacency covers every detected contact, including ones
/// already refined away.
pub fn refine_weak_hydrogen_bonds(contacts: &mut FrozenContacts) -> usize {
    let mut removed = 0;
    for i in contacts.present_of_type(ContactType::WeakHydrogenBond) {
        let contact = *contacts.contact(i);
        let acceptor = if contacts.features.feature_type(contact.index1) == FeatureType::WeakHydrogenDonor {
            contact.index2
        } else {
            contact.index1
        };
        let competing = contacts
            .adjacency
            .edges(acceptor)
            .iter()
            .any(|&e| contacts.store.contact_type(e).is_hydrogen_bond());
        if competing && contacts.contact_set.clear(i) {
            removed += 1;
        }
    }
    removed
}
