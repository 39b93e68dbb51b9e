use crate::angle::angular_distance;
use crate::aspects::types::{Aspect, AspectKind, AspectSet, AspectSettings};
use crate::bodies::BodyPosition;

/// Aspect angles in evaluation order (most common first).
pub const EVALUATION_ORDER: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Opposition,
    AspectKind::Trine,
    AspectKind::Square,
    AspectKind::Sextile,
];

/// Aspect detector
#[derive(Debug, Clone, Default)]
pub struct AspectDetector {
    settings: AspectSettings,
}

impl AspectDetector {
    pub fn with_orb(orb: f64) -> Self {
        Self {
            settings: AspectSettings { orb },
        }
    }

    /// Find aspects between every pair of bodies, ranked by orb.
    ///
    /// Pairs are visited as (i, j) with i < j, so body A always precedes
    /// body B in the input. The sort is stable: equal orbs keep that
    /// discovery order.
    pub fn detect(&self, bodies: &[BodyPosition]) -> AspectSet {
        let mut aspects = Vec::new();
        let mut pairs_examined = 0;

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                pairs_examined += 1;
                if let Some((kind, orb)) = self.match_separation(a.longitude, b.longitude) {
                    aspects.push(Aspect {
                        body_a: a.name,
                        body_b: b.name,
                        kind,
                        orb,
                        exact_angle: kind.angle(),
                    });
                }
            }
        }

        aspects.sort_by(|x, y| x.orb.total_cmp(&y.orb));

        AspectSet {
            aspects,
            pairs_examined,
        }
    }

    /// First aspect in [`EVALUATION_ORDER`] whose window contains the
    /// separation between two longitudes. Later kinds are not tried once one
    /// matches, even if windows overlap.
    pub fn match_separation(&self, lon_a: f64, lon_b: f64) -> Option<(AspectKind, f64)> {
        let distance = angular_distance(lon_a, lon_b);
        EVALUATION_ORDER.iter().find_map(|&kind| {
            let orb = (distance - kind.angle()).abs();
            (orb <= self.settings.orb).then_some((kind, orb))
        })
    }
}
