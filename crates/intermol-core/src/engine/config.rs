use crate::core::chemistry::valence::ValenceParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Thresholds and switches for contact detection and refinement.
///
/// Distances are in Ångström and angles in degrees. Every field has a default,
/// so a TOML file only needs to list the values it changes. Values are used as
/// given: a negative distance simply means that no contact of that family can
/// pass its gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactParams {
    pub max_hydrophobic_dist: f64,
    pub max_hbond_dist: f64,
    pub max_hbond_sulfur_dist: f64,
    pub max_hbond_acc_angle: f64,
    pub max_hbond_don_angle: f64,
    pub max_hbond_acc_plane_angle: f64,
    pub max_hbond_don_plane_angle: f64,
    pub max_pi_stacking_dist: f64,
    pub max_pi_stacking_offset: f64,
    pub max_pi_stacking_angle: f64,
    pub max_cation_pi_dist: f64,
    pub max_cation_pi_offset: f64,
    pub max_ionic_dist: f64,
    pub max_halogen_bond_dist: f64,
    pub max_halogen_bond_angle: f64,
    pub max_metal_dist: f64,
    pub refine_salt_bridges: bool,
    /// Clears weak hydrogen bonds to acceptors that already take part in a
    /// regular hydrogen bond.
    pub refine_weak_hydrogen_bonds: bool,
    /// Model whose atoms may contact atoms of any other model. `None` restricts
    /// every contact to a single model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_model_index: Option<usize>,
    pub line_of_sight_dist_factor: f64,
    pub valence: ValenceParams,
}

impl Default for ContactParams {
    fn default() -> Self {
        Self {
            max_hydrophobic_dist: 4.0,
            max_hbond_dist: 3.5,
            max_hbond_sulfur_dist: 4.1,
            max_hbond_acc_angle: 45.0,
            max_hbond_don_angle: 45.0,
            max_hbond_acc_plane_angle: 90.0,
            max_hbond_don_plane_angle: 30.0,
            max_pi_stacking_dist: 5.5,
            max_pi_stacking_offset: 2.0,
            max_pi_stacking_angle: 30.0,
            max_cation_pi_dist: 6.0,
            max_cation_pi_offset: 2.0,
            max_ionic_dist: 5.0,
            max_halogen_bond_dist: 4.0,
            max_halogen_bond_angle: 30.0,
            max_metal_dist: 3.0,
            refine_salt_bridges: true,
            refine_weak_hydrogen_bonds: false,
            master_model_index: None,
            line_of_sight_dist_factor: 1.0,
            valence: ValenceParams::default(),
        }
    }
}

impl ContactParams {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<inline>".to_string(),
            source: e,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn builder() -> ContactParamsBuilder {
        ContactParamsBuilder::new()
    }
}

/// Chainable construction of [`ContactParams`], starting from the defaults.
#[derive(Default)]
pub struct ContactParamsBuilder {
    params: ContactParams,
}

impl ContactParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_hydrophobic_dist(mut self, dist: f64) -> Self {
        self.params.max_hydrophobic_dist = dist;
        self
    }
    pub fn max_hbond_dist(mut self, dist: f64) -> Self {
        self.params.max_hbond_dist = dist;
        self
    }
    pub fn max_hbond_sulfur_dist(mut self, dist: f64) -> Self {
        self.params.max_hbond_sulfur_dist = dist;
        self
    }
    pub fn max_hbond_acc_angle(mut self, degrees: f64) -> Self {
        self.params.max_hbond_acc_angle = degrees;
        self
    }
    pub fn max_hbond_don_angle(mut self, degrees: f64) -> Self {
        self.params.max_hbond_don_angle = degrees;
        self
    }
    pub fn max_hbond_acc_plane_angle(mut self, degrees: f64) -> Self {
        self.params.max_hbond_acc_plane_angle = degrees;
        self
    }
    pub fn max_hbond_don_plane_angle(mut self, degrees: f64) -> Self {
        self.params.max_hbond_don_plane_angle = degrees;
        self
    }
    pub fn max_pi_stacking_dist(mut self, dist: f64) -> Self {
        self.params.max_pi_stacking_dist = dist;
        self
    }
    pub fn max_pi_stacking_offset(mut self, dist: f64) -> Self {
        self.params.max_pi_stacking_offset = dist;
        self
    }
    pub fn max_pi_stacking_angle(mut self, degrees: f64) -> Self {
        self.params.max_pi_stacking_angle = degrees;
        self
    }
    pub fn max_cation_pi_dist(mut self, dist: f64) -> Self {
        self.params.max_cation_pi_dist = dist;
        self
    }
    pub fn max_cation_pi_offset(mut self, dist: f64) -> Self {
        self.params.max_cation_pi_offset = dist;
        self
    }
    pub fn max_ionic_dist(mut self, dist: f64) -> Self {
        self.params.max_ionic_dist = dist;
        self
    }
    pub fn max_halogen_bond_dist(mut self, dist: f64) -> Self {
        self.params.max_halogen_bond_dist = dist;
        self
    }
    pub fn max_halogen_bond_angle(mut self, degrees: f64) -> Self {
        self.params.max_halogen_bond_angle = degrees;
        self
    }
    pub fn max_metal_dist(mut self, dist: f64) -> Self {
        self.params.max_metal_dist = dist;
        self
    }
    pub fn refine_salt_bridges(mut self, enabled: bool) -> Self {
        self.params.refine_salt_bridges = enabled;
        self
    }
    pub fn refine_weak_hydrogen_bonds(mut self, enabled: bool) -> Self {
        self.params.refine_weak_hydrogen_bonds = enabled;
        self
    }
    pub fn master_model_index(mut self, index: Option<usize>) -> Self {
        self.params.master_model_index = index;
        self
    }
    pub fn line_of_sight_dist_factor(mut self, factor: f64) -> Self {
        self.params.line_of_sight_dist_factor = factor;
        self
    }
    pub fn valence(mut self, valence: ValenceParams) -> Self {
        self.params.valence = valence;
        self
    }

    pub fn build(self) -> ContactParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::valence::AssignPolicy;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_documented_values() {
        let p = ContactParams::default();
        assert_eq!(p.max_hydrophobic_dist, 4.0);
        assert_eq!(p.max_hbond_dist, 3.5);
        assert_eq!(p.max_hbond_sulfur_dist, 4.1);
        assert_eq!(p.max_hbond_acc_angle, 45.0);
        assert_eq!(p.max_hbond_don_angle, 45.0);
        assert_eq!(p.max_hbond_acc_plane_angle, 90.0);
        assert_eq!(p.max_hbond_don_plane_angle, 30.0);
        assert_eq!(p.max_pi_stacking_dist, 5.5);
        assert_eq!(p.max_pi_stacking_offset, 2.0);
        assert_eq!(p.max_pi_stacking_angle, 30.0);
        assert_eq!(p.max_cation_pi_dist, 6.0);
        assert_eq!(p.max_cation_pi_offset, 2.0);
        assert_eq!(p.max_ionic_dist, 5.0);
        assert_eq!(p.max_halogen_bond_dist, 4.0);
        assert_eq!(p.max_halogen_bond_angle, 30.0);
        assert_eq!(p.max_metal_dist, 3.0);
        assert!(p.refine_salt_bridges);
        assert!(!p.refine_weak_hydrogen_bonds);
        assert_eq!(p.master_model_index, None);
        assert_eq!(p.line_of_sight_dist_factor, 1.0);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let p = ContactParams::from_toml_str(
            r#"
            max_hbond_dist = 3.2
            refine_salt_bridges = false
            master_model_index = 0

            [valence]
            assign_h = "never"
            "#,
        )
        .unwrap();
        assert_eq!(p.max_hbond_dist, 3.2);
        assert!(!p.refine_salt_bridges);
        assert_eq!(p.master_model_index, Some(0));
        assert_eq!(p.valence.assign_h, AssignPolicy::Never);
        assert_eq!(p.valence.assign_charge, AssignPolicy::Auto);
        assert_eq!(p.max_metal_dist, 3.0);
    }

    #[test]
    fn serialized_params_parse_back_unchanged() {
        let p = ContactParams::builder()
            .max_ionic_dist(4.5)
            .line_of_sight_dist_factor(0.8)
            .build();
        let text = toml::to_string(&p).unwrap();
        assert_eq!(ContactParams::from_toml_str(&text).unwrap(), p);
    }

    #[test]
    fn load_reads_file_and_maps_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.toml");
        fs::write(&path, "max_metal_dist = 2.5\n").unwrap();
        assert_eq!(ContactParams::load(&path).unwrap().max_metal_dist, 2.5);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(ContactParams::load(&missing), Err(ConfigError::Io { .. })));

        fs::write(&path, "this is not toml").unwrap();
        assert!(matches!(ContactParams::load(&path), Err(ConfigError::Toml { .. })));

        fs::write(&path, "max_metal_dist = \"far\"").unwrap();
        assert!(matches!(ContactParams::load(&path), Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn builder_overrides_only_named_fields() {
        let p = ContactParamsBuilder::new()
            .max_hydrophobic_dist(3.0)
            .refine_weak_hydrogen_bonds(true)
            .master_model_index(Some(1))
            .build();
        assert_eq!(p.max_hydrophobic_dist, 3.0);
        assert!(p.refine_weak_hydrogen_bonds);
        assert_eq!(p.master_model_index, Some(1));
        assert_eq!(p.max_hbond_dist, 3.5);
    }
}
