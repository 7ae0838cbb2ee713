use crate::{Equipment, LimbMovement, Mass, PegCount, PegModifier};

/// The load-bearing winner among an exercise's candidate equipment, with the
/// structural multipliers its implementation pattern implies.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBase {
    pub equipment: Option<Equipment>,
    pub base: Mass,
    pub base_count: u32,
    pub implements_used: u32,
    pub peg_multiplier: PegModifier,
}

impl ResolvedBase {
    /// Sentinel for exercises without any qualifying equipment: no fixed
    /// load, one implement. Downstream treats this as pure bodyweight.
    #[must_use]
    pub fn none() -> Self {
        Self {
            equipment: None,
            base: Mass::ZERO,
            base_count: 0,
            implements_used: 1,
            peg_multiplier: PegModifier::None,
        }
    }
}

/// Picks the candidate implying the largest effective base weight
/// (`base × base_weight_multiplier`).
///
/// Candidates without a base weight or implementation pattern are skipped.
/// Ties resolve to the first-encountered candidate; callers must supply a
/// stable-ordered list.
#[must_use]
pub fn resolve_equipment(
    candidates: &[Equipment],
    movement: LimbMovement,
    implement_override: Option<u32>,
) -> ResolvedBase {
    let mut best = ResolvedBase::none();
    let mut best_total = 0.0;

    for candidate in candidates {
        let Some(base) = candidate.base_weight else {
            continue;
        };
        let Some(implementation) = candidate.implementation else {
            continue;
        };
        let count = implementation.movement_count_with_implements(movement, implement_override);
        let total = base.in_kg() * f64::from(count.base_weight_multiplier);

        if total > best_total {
            best_total = total;
            best = ResolvedBase {
                equipment: Some(candidate.clone()),
                base,
                base_count: count.base_weight_multiplier,
                implements_used: count.implements_used,
                peg_multiplier: count.peg_multiplier,
            };
        }
    }

    best
}

/// Combines peg counts across the entire candidate set.
///
/// Composite setups need this: a landmine attachment marked `Uses` consumes
/// one peg of the hosting bar, so a landmine plus a two-peg barbell loads
/// plates on a single peg. The host is the candidate with the largest
/// strictly-positive peg count; without a host nothing can be loaded,
/// whatever else is present.
#[must_use]
pub fn resolve_pegs(candidates: &[Equipment], peg_multiplier: PegModifier) -> PegCount {
    let counts = candidates
        .iter()
        .map(|c| c.peg_count.map_or(0, PegCount::count))
        .collect::<Vec<_>>();
    let uses_peg = counts.contains(&PegCount::Uses.count());
    let host = counts.iter().copied().filter(|c| *c > 0).max();

    let combined = match host {
        Some(host) => host - i32::from(uses_peg),
        None => 0,
    };

    // Rounded, not truncated: halving must not drop a machine's only peg.
    #[allow(clippy::cast_possible_truncation)]
    let scaled = (f64::from(combined) * peg_multiplier.factor()).round() as i32;
    PegCount::from_count(scaled)
}
