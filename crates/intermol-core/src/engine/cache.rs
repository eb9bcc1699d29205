use crate::core::chemistry::valence::{ValenceModel, ValenceParams};
use crate::core::models::system::{MolecularSystem, SystemKey};
use crate::core::utils::spatial_hash::{SpatialHash, SpatialHashError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Derived per-structure data that is expensive to build and shared between
/// runs on the same unchanged structure.
///
/// Entries are keyed by [`SystemKey`], so any mutation of a system makes its
/// old entries unreachable; they are evicted the next time the same system is
/// looked up.
#[derive(Debug, Default)]
pub struct StructureCache {
    valence: HashMap<(SystemKey, ValenceParams), Arc<ValenceModel>>,
    atom_hashes: HashMap<SystemKey, Arc<SpatialHash>>,
}

impl StructureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached valence model for this state of `system`, computing
    /// it on first use.
    pub fn valence_model(&mut self, system: &MolecularSystem, params: &ValenceParams) -> Arc<ValenceModel> {
        let key = system.key();
        self.evict_stale(key);
        self.valence
            .entry((key, *params))
            .or_insert_with(|| {
                debug!(atoms = system.atom_count(), "Computing valence model.");
                Arc::new(ValenceModel::compute(system, params))
            })
            .clone()
    }

    /// Returns the cached spatial hash over all atom positions, building it on
    /// first use. Fails for a system without atoms.
    pub fn atom_hash(&mut self, system: &MolecularSystem) -> Result<Arc<SpatialHash>, SpatialHashError> {
        let key = system.key();
        self.evict_stale(key);
        if let Some(hash) = self.atom_hashes.get(&key) {
            return Ok(hash.clone());
        }
        debug!(atoms = system.atom_count(), "Building atom spatial hash.");
        let hash = Arc::new(SpatialHash::new(&system.positions())?);
        self.atom_hashes.insert(key, hash.clone());
        Ok(hash)
    }

    pub fn len(&self) -> usize {
        self.valence.len() + self.atom_hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.valence.clear();
        self.atom_hashes.clear();
    }

    fn evict_stale(&mut self, current: SystemKey) {
        let stale = |k: &SystemKey| k.id == current.id && k.generation != current.generation;
        self.valence.retain(|(k, _), _| !stale(k));
        self.atom_hashes.retain(|k, _| !stale(k));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::elements::Element;
    use crate::core::models::atom::Atom;
    use crate::core::models::chain::ChainType;
    use nalgebra::Point3;

    fn single_atom_system() -> MolecularSystem {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain(0, 'A', ChainType::Ligand);
        let res = system.add_residue(chain, 1, "LIG").unwrap();
        system
            .add_atom_to_residue(res, Atom::new("C1", Element::C, Point3::origin()))
            .unwrap();
        system
    }

    #[test]
    fn repeated_lookups_share_the_same_model() {
        let system = single_atom_system();
        let mut cache = StructureCache::new();
        let params = ValenceParams::default();
        let a = cache.valence_model(&system, &params);
        let b = cache.valence_model(&system, &params);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), 1);

        let h1 = cache.atom_hash(&system).unwrap();
        let h2 = cache.atom_hash(&system).unwrap();
        assert!(Arc::ptr_eq(&h1, &h2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn mutation_invalidates_and_evicts_previous_entries() {
        let mut system = single_atom_system();
        let mut cache = StructureCache::new();
        let params = ValenceParams::default();
        let before = cache.valence_model(&system, &params);

        system.atom_mut(0).unwrap().position = Point3::new(1.0, 0.0, 0.0);
        let after = cache.valence_model(&system, &params);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_systems_do_not_collide() {
        let a = single_atom_system();
        let b = single_atom_system();
        let mut cache = StructureCache::new();
        let params = ValenceParams::default();
        let ma = cache.valence_model(&a, &params);
        let mb = cache.valence_model(&b, &params);
        assert!(!Arc::ptr_eq(&ma, &mb));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn empty_system_cannot_be_hashed() {
        let system = MolecularSystem::new();
        let mut cache = StructureCache::new();
        assert_eq!(cache.atom_hash(&system).unwrap_err(), SpatialHashError::Empty);
    }
}
