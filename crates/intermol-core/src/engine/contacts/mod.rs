//! Detected contacts and the bookkeeping refinement works on.
//!
//! Detection appends to a [`ContactStore`] inside a mutable [`Contacts`]
//! value. [`Contacts::freeze`] turns it into [`FrozenContacts`], which adds the
//! [`AdjacencyList`] and the all-set [`ContactSet`]. Refinement only ever
//! clears bits of that set.

mod adjacency;

pub use adjacency::AdjacencyList;

use super::features::Features;
use crate::core::models::ids::{AtomIndex, ContactIndex, FeatureIndex};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::bitset::BitSet;
use crate::core::utils::spatial_hash::{SpatialHash, SpatialHashError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactType {
    IonicInteraction,
    CationPi,
    PiStacking,
    HydrogenBond,
    HalogenBond,
    Hydrophobic,
    MetalCoordination,
    WeakHydrogenBond,
    WaterHydrogenBond,
    BackboneHydrogenBond,
}

impl ContactType {
    pub const ALL: [ContactType; 10] = [
        ContactType::IonicInteraction,
        ContactType::CationPi,
        ContactType::PiStacking,
        ContactType::HydrogenBond,
        ContactType::HalogenBond,
        ContactType::Hydrophobic,
        ContactType::MetalCoordination,
        ContactType::WeakHydrogenBond,
        ContactType::WaterHydrogenBond,
        ContactType::BackboneHydrogenBond,
    ];

    /// Human-readable name. All three strong hydrogen bond kinds share one.
    pub fn label(&self) -> &'static str {
        match self {
            ContactType::HydrogenBond
            | ContactType::WaterHydrogenBond
            | ContactType::BackboneHydrogenBond => "hydrogen bond",
            ContactType::Hydrophobic => "hydrophobic contact",
            ContactType::HalogenBond => "halogen bond",
            ContactType::IonicInteraction => "ionic interaction",
            ContactType::MetalCoordination => "metal coordination",
            ContactType::CationPi => "cation-pi interaction",
            ContactType::PiStacking => "pi-pi stacking",
            ContactType::WeakHydrogenBond => "weak hydrogen bond",
        }
    }

    /// Display color as `0xRRGGBB`.
    pub fn color(&self) -> u32 {
        match self {
            ContactType::HydrogenBond
            | ContactType::WaterHydrogenBond
            | ContactType::BackboneHydrogenBond => 0x2B83BA,
            ContactType::Hydrophobic => 0x808080,
            ContactType::HalogenBond => 0x40FFBF,
            ContactType::IonicInteraction => 0xF0C814,
            ContactType::MetalCoordination => 0x8C4099,
            ContactType::CationPi => 0xFF8000,
            ContactType::PiStacking => 0x8CB366,
            ContactType::WeakHydrogenBond => 0xC5DDEC,
        }
    }

    /// [`color`](Self::color) as normalized RGB components.
    pub fn rgb(&self) -> [f32; 3] {
        let hex = self.color();
        [
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
        ]
    }

    /// Strong hydrogen bond of any flavour.
    pub fn is_hydrogen_bond(&self) -> bool {
        matches!(
            self,
            ContactType::HydrogenBond | ContactType::WaterHydrogenBond | ContactType::BackboneHydrogenBond
        )
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One detected contact. `index1 < index2` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    pub index1: FeatureIndex,
    pub index2: FeatureIndex,
    pub contact_type: ContactType,
}

impl Contact {
    /// Builds a contact with its endpoints in canonical order.
    pub fn new(a: FeatureIndex, b: FeatureIndex, contact_type: ContactType) -> Self {
        let (index1, index2) = if a < b { (a, b) } else { (b, a) };
        Self {
            index1,
            index2,
            contact_type,
        }
    }
}

/// Append-only contact list addressed by [`ContactIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contact(&mut self, a: FeatureIndex, b: FeatureIndex, contact_type: ContactType) -> ContactIndex {
        self.push(Contact::new(a, b, contact_type))
    }

    pub fn push(&mut self, contact: Contact) -> ContactIndex {
        let index = self.contacts.len();
        self.contacts.push(contact);
        index
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, index: ContactIndex) -> Option<&Contact> {
        self.contacts.get(index)
    }

    pub fn contact_type(&self, index: ContactIndex) -> ContactType {
        self.contacts[index].contact_type
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }
}

/// Surviving contacts. Starts with every contact present; bits are only
/// ever cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSet {
    bits: BitSet,
}

impl ContactSet {
    pub fn all(len: usize) -> Self {
        Self {
            bits: BitSet::filled(len),
        }
    }

    pub fn contains(&self, index: ContactIndex) -> bool {
        self.bits.get(index)
    }

    /// Removes a contact and reports whether it was still present.
    pub fn clear(&mut self, index: ContactIndex) -> bool {
        self.bits.clear(index)
    }

    /// Present contact indices, ascending.
    pub fn iter(&self) -> impl Iterator<Item = ContactIndex> + '_ {
        self.bits.iter_ones()
    }

    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of contacts the set was created for.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }
}

/// True when exactly one of the two atoms lies in the master model.
pub fn is_master_contact(system: &MolecularSystem, a: AtomIndex, b: AtomIndex, master: Option<usize>) -> bool {
    master.is_some_and(|m| (system.model_index(a) == m) != (system.model_index(b) == m))
}

fn altlocs_conflict(system: &MolecularSystem, a: AtomIndex, b: AtomIndex) -> bool {
    matches!((system.altloc(a), system.altloc(b)), (Some(x), Some(y)) if x != y)
}

/// Pairs the detectors never consider: atoms in different models (unless
/// one side is the master model), atoms of the same residue, or atoms from
/// conflicting alternate locations.
pub fn invalid_atom_contact(system: &MolecularSystem, a: AtomIndex, b: AtomIndex, master: Option<usize>) -> bool {
    !is_master_contact(system, a, b, master)
        && (system.model_index(a) != system.model_index(b)
            || system.residue_index_of(a) == system.residue_index_of(b)
            || altlocs_conflict(system, a, b))
}

/// Like [`invalid_atom_contact`] but allows atoms of the same residue. Used
/// by refinement, where blockers may sit in either partner's residue.
pub fn invalid_refinement_contact(system: &MolecularSystem, a: AtomIndex, b: AtomIndex, master: Option<usize>) -> bool {
    !is_master_contact(system, a, b, master)
        && (system.model_index(a) != system.model_index(b) || altlocs_conflict(system, a, b))
}

/// Mutable detection state: the features, a spatial hash over their centers,
/// the growing contact store and the participation flags.
#[derive(Debug)]
pub struct Contacts {
    features: Features,
    feature_hash: Option<SpatialHash>,
    store: ContactStore,
    participants: BitSet,
}

impl Contacts {
    /// Indexes the feature centers. A structure without features yields a
    /// state without a hash, on which no contact can be detected.
    pub fn new(features: Features) -> Result<Self, SpatialHashError> {
        let feature_hash = if features.is_empty() {
            None
        } else {
            Some(SpatialHash::new(features.centers())?)
        };
        let participants = BitSet::new(features.len());
        Ok(Self {
            features,
            feature_hash,
            store: ContactStore::new(),
            participants,
        })
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn feature_hash(&self) -> Option<&SpatialHash> {
        self.feature_hash.as_ref()
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Appends contacts in order and flags both endpoints as participants.
    pub fn extend<I: IntoIterator<Item = Contact>>(&mut self, contacts: I) {
        for contact in contacts {
            self.participants.set(contact.index1);
            self.participants.set(contact.index2);
            self.store.push(contact);
        }
    }

    /// Ends detection: builds the adjacency list and marks every contact as
    /// present.
    pub fn freeze(self) -> FrozenContacts {
        let adjacency = AdjacencyList::new(&self.store, self.features.len());
        let contact_set = ContactSet::all(self.store.len());
        FrozenContacts {
            features: self.features,
            store: self.store,
            contact_set,
            adjacency,
            participants: self.participants,
        }
    }
}

/// Contacts after detection. Only the contact set changes from here on.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenContacts {
    pub features: Features,
    pub store: ContactStore,
    pub contact_set: ContactSet,
    pub adjacency: AdjacencyList,
    pub participants: BitSet,
}

impl FrozenContacts {
    pub fn contact(&self, index: ContactIndex) -> &Contact {
        &self.store.as_slice()[index]
    }

    /// Present contacts of the given type, ascending.
    pub fn present_of_type(&self, contact_type: ContactType) -> Vec<ContactIndex> {
        self.contact_set
            .iter()
            .filter(|&i| self.store.contact_type(i) == contact_type)
            .collect()
    }

    /// Representative atoms of both endpoints.
    pub fn representatives(&self, index: ContactIndex) -> (AtomIndex, AtomIndex) {
        let c = self.contact(index);
        (
            self.features.representative(c.index1),
            self.features.representative(c.index2),
        )
    }
}
