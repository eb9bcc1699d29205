use super::{ContactDetector, DetectionContext};
use crate::core::models::ids::FeatureIndex;
use crate::engine::config::ContactParams;
use crate::engine::contacts::{Contact, ContactType};
use crate::engine::features::FeatureType;

/// Metal coordination between a metal and a suitable binding partner.
#[derive(Debug, Clone)]
pub struct MetalCoordinationDetector {
    max_metal_dist: f64,
}

impl MetalCoordinationDetector {
    pub fn new(params: &ContactParams) -> Self {
        Self {
            max_metal_dist: params.max_metal_dist,
        }
    }
}

/// `metal` is the feature type on the metal side of the pair.
fn is_metal_complex(metal: FeatureType, partner: FeatureType) -> bool {
    match metal {
        FeatureType::TransitionMetal => matches!(
            partner,
            FeatureType::DativeBondPartner | FeatureType::TransitionMetal
        ),
        FeatureType::IonicTypeMetal => partner == FeatureType::IonicTypePartner,
        _ => false,
    }
}

impl ContactDetector for MetalCoordinationDetector {
    fn name(&self) -> &'static str {
        "metal_coordination"
    }

    fn radius(&self) -> f64 {
        self.max_metal_dist
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>, i: FeatureIndex, j: FeatureIndex, _dist_sq: f64) -> Option<Contact> {
        let features = ctx.features;
        let m1 = ctx.system.is_metal(features.representative(i));
        let m2 = ctx.system.is_metal(features.representative(j));
        if !m1 && !m2 {
            return None;
        }
        let (ti, tj) = if m1 {
            (features.feature_type(i), features.feature_type(j))
        } else {
            (features.feature_type(j), features.feature_type(i))
        };
        is_metal_complex(ti, tj).then(|| Contact::new(i, j, ContactType::MetalCoordination))
    }
}
