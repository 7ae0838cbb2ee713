use crate::{
    Equipment, LimbMovement, Mass, PegCount, Plates, ResolvedBase, resolve_equipment, resolve_pegs,
};

/// Absorbs floating-point drift during the greedy fill.
const GREEDY_TOLERANCE: f64 = 1e-9;
/// A plan is exact when achieved and requested totals agree within this.
const EXACT_TOLERANCE: f64 = 1e-6;

/// Intermediate per-computation targets, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateSpec {
    pub display_total: Mass,
    pub per_side_target: Mass,
    pub replicates: u32,
}

/// The physical loading plan for one target weight. Computed fresh on every
/// weight or equipment change, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub display_total: Mass,
    pub base: Mass,
    pub per_side_target: Mass,
    pub per_side_achieved: Mass,
    pub left_side: Vec<Mass>,
    pub right_side: Vec<Mass>,
    pub exact: bool,
    pub achieved_total: Mass,
    pub replicates: u32,
    pub base_count: u32,
}

impl Plan {
    #[must_use]
    pub fn delta(&self) -> Mass {
        self.display_total - self.achieved_total
    }
}

/// Everything a consumer needs to render one exercise's loading: the winning
/// equipment and the plate plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Loadout {
    pub resolved: ResolvedBase,
    pub plan: Plan,
}

/// Derives the per-side target from the requested total.
///
/// With more than one implement in play the requested mass is per implement,
/// so the displayed total is `target × implements_used`. The structural base
/// weight is subtracted before dividing the remainder across pegs and
/// replicates.
#[must_use]
pub fn plate_spec(
    target: Mass,
    base: Mass,
    base_count: u32,
    implements_used: u32,
    peg_count: PegCount,
) -> PlateSpec {
    let replicates = implements_used.max(1);
    let total_target_kg = if implements_used > 1 {
        target.in_kg() * f64::from(implements_used)
    } else {
        target.in_kg()
    };

    let total_plates_needed_kg =
        (total_target_kg - base.in_kg() * f64::from(base_count)).max(0.0);

    let per_side_target_kg = match peg_count {
        PegCount::Both => total_plates_needed_kg / f64::from(2 * replicates),
        PegCount::Single => total_plates_needed_kg / f64::from(replicates),
        PegCount::Uses | PegCount::None => 0.0,
    };

    PlateSpec {
        display_total: Mass::from_kg(total_target_kg),
        per_side_target: Mass::from_kg(per_side_target_kg),
        replicates,
    }
}

/// Greedily fills one side from the available denominations, largest first,
/// and mirrors it onto the other side (the left side reversed, outermost
/// plate first).
///
/// The achieved total is recombined through the same peg branches that
/// produced the per-side target. The requested total is kept as-is, so a
/// target below the structural minimum shows up as a nonzero delta rather
/// than a silently "exact" plan.
#[must_use]
pub fn plate_plan(
    spec: &PlateSpec,
    base: Mass,
    base_count: u32,
    denominations: &[Mass],
    peg_count: PegCount,
) -> Plan {
    let side_target_kg = spec.per_side_target.in_kg();

    let mut remaining = side_target_kg;
    let mut side_plates: Vec<Mass> = Vec::new();
    for denomination in Plates::sorted(denominations, false) {
        let kg = denomination.in_kg();
        if kg <= 0.0 {
            continue;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = ((remaining + GREEDY_TOLERANCE) / kg).floor() as u32;
        if n > 0 {
            side_plates.extend(std::iter::repeat_n(denomination, n as usize));
            remaining -= f64::from(n) * kg;
        }
    }

    let per_side_achieved_kg = side_plates.iter().map(|p| p.in_kg()).sum::<f64>();
    let base_total_kg = base.in_kg() * f64::from(base_count);

    let achieved_total_kg = match peg_count {
        PegCount::Both => 2.0 * f64::from(spec.replicates) * per_side_achieved_kg + base_total_kg,
        PegCount::Single => f64::from(spec.replicates) * per_side_achieved_kg + base_total_kg,
        PegCount::Uses | PegCount::None => base_total_kg,
    };

    let exact = (achieved_total_kg - spec.display_total.in_kg()).abs() <= EXACT_TOLERANCE;

    Plan {
        display_total: spec.display_total,
        base,
        per_side_target: spec.per_side_target,
        per_side_achieved: Mass::from_kg(per_side_achieved_kg),
        left_side: side_plates.iter().rev().copied().collect(),
        right_side: side_plates,
        exact,
        achieved_total: Mass::from_kg(achieved_total_kg),
        replicates: spec.replicates,
        base_count,
    }
}

/// End-to-end composition: resolve the load-bearing equipment, combine the
/// candidate set's pegs, derive the targets and fill the plates.
#[must_use]
pub fn loadout(
    candidates: &[Equipment],
    movement: LimbMovement,
    implement_override: Option<u32>,
    target: Mass,
    denominations: &[Mass],
) -> Loadout {
    let resolved = resolve_equipment(candidates, movement, implement_override);
    let peg_count = resolve_pegs(candidates, resolved.peg_multiplier);
    let spec = plate_spec(
        target,
        resolved.base,
        resolved.base_count,
        resolved.implements_used,
        peg_count,
    );
    let plan = plate_plan(
        &spec,
        resolved.base,
        resolved.base_count,
        denominations,
        peg_count,
    );
    Loadout { resolved, plan }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{EquipmentCategory, EquipmentID, Implementation};

    fn kg(values: &[f64]) -> Vec<Mass> {
        values.iter().copied().map(Mass::from_kg).collect()
    }

    fn equipment(
        id: u128,
        name: &str,
        implementation: Implementation,
        base_kg: f64,
        peg_count: PegCount,
    ) -> Equipment {
        Equipment {
            id: EquipmentID::from(id),
            name: name.to_string(),
            category: EquipmentCategory::BarsPlates,
            implementation: Some(implementation),
            base_weight: Some(Mass::from_kg(base_kg)),
            peg_count: Some(peg_count),
        }
    }

    #[test]
    fn test_exact_barbell_plan() {
        let barbell = equipment(1, "Barbell", Implementation::Unified, 20.0, PegCount::Both);
        let result = loadout(
            &[barbell],
            LimbMovement::BilateralDependent,
            None,
            Mass::from_kg(100.0),
            &kg(&[20.0, 15.0, 10.0, 5.0, 2.5, 1.25]),
        );

        assert_eq!(result.resolved.base_count, 1);
        assert_eq!(result.plan.replicates, 1);
        assert_approx_eq!(result.plan.per_side_target.in_kg(), 40.0, 1e-9);
        assert_eq!(result.plan.right_side, kg(&[20.0, 15.0, 5.0]));
        assert_eq!(result.plan.left_side, kg(&[5.0, 15.0, 20.0]));
        assert_approx_eq!(result.plan.achieved_total.in_kg(), 100.0, 1e-9);
        assert!(result.plan.exact);
        assert_approx_eq!(result.plan.delta().in_kg(), 0.0, 1e-9);
    }

    #[test]
    fn test_single_peg_divided_plan() {
        let t_bar = equipment(2, "T-Bar Row", Implementation::Divided, 10.0, PegCount::Single);
        let result = loadout(
            &[t_bar],
            LimbMovement::Unilateral,
            None,
            Mass::from_kg(34.0),
            &kg(&[10.0, 5.0, 2.5, 1.25]),
        );

        assert_eq!(result.plan.replicates, 1);
        assert_approx_eq!(result.plan.per_side_target.in_kg(), 24.0, 1e-9);
        assert_eq!(result.plan.right_side, kg(&[10.0, 10.0, 2.5, 1.25]));
        assert_approx_eq!(result.plan.per_side_achieved.in_kg(), 23.75, 1e-9);
        assert_approx_eq!(result.plan.achieved_total.in_kg(), 33.75, 1e-9);
        assert!(!result.plan.exact);
        assert_approx_eq!(result.plan.delta().in_kg(), 0.25, 1e-9);
    }

    #[test]
    fn test_individual_implements_plan() {
        let dumbbell = equipment(
            3,
            "Dumbbell",
            Implementation::Individual,
            12.0,
            PegCount::Both,
        );
        let result = loadout(
            &[dumbbell],
            LimbMovement::BilateralIndependent,
            None,
            Mass::from_kg(30.0),
            &kg(&[5.0, 2.5, 1.25]),
        );

        assert_eq!(result.resolved.implements_used, 2);
        assert_eq!(result.resolved.base_count, 2);
        assert_eq!(result.plan.replicates, 2);
        // 30 kg per dumbbell: 60 total, 36 in plates, 9 per side.
        assert_approx_eq!(result.plan.display_total.in_kg(), 60.0, 1e-9);
        assert_approx_eq!(result.plan.per_side_target.in_kg(), 9.0, 1e-9);
        assert_eq!(result.plan.right_side, kg(&[5.0, 2.5, 1.25]));
        assert_approx_eq!(result.plan.achieved_total.in_kg(), 59.0, 1e-9);
        assert!(!result.plan.exact);
    }

    #[test]
    fn test_no_denominations_plan() {
        let barbell = equipment(4, "Barbell", Implementation::Unified, 20.0, PegCount::Both);
        let result = loadout(
            &[barbell],
            LimbMovement::BilateralDependent,
            None,
            Mass::from_kg(50.0),
            &[],
        );

        assert_approx_eq!(result.plan.per_side_target.in_kg(), 15.0, 1e-9);
        assert!(result.plan.left_side.is_empty());
        assert!(result.plan.right_side.is_empty());
        assert_approx_eq!(result.plan.achieved_total.in_kg(), 20.0, 1e-9);
        assert_approx_eq!(result.plan.delta().in_kg(), 30.0, 1e-9);
        assert!(!result.plan.exact);
    }

    #[test]
    fn test_target_below_base_plan() {
        let barbell = equipment(5, "Barbell", Implementation::Unified, 20.0, PegCount::Both);
        let result = loadout(
            &[barbell],
            LimbMovement::BilateralDependent,
            None,
            Mass::from_kg(10.0),
            &kg(&[20.0, 10.0, 5.0]),
        );

        // Can't go lighter than the empty bar.
        assert!(result.plan.right_side.is_empty());
        assert_approx_eq!(result.plan.achieved_total.in_kg(), 20.0, 1e-9);
        assert_approx_eq!(result.plan.delta().abs().in_kg(), 10.0, 1e-9);
        assert!(!result.plan.exact);
    }

    #[test]
    fn test_no_equipment_sentinel_plan() {
        let result = loadout(
            &[],
            LimbMovement::BilateralDependent,
            None,
            Mass::from_kg(50.0),
            &kg(&[20.0, 10.0]),
        );

        assert_eq!(result.resolved.equipment, None);
        // No pegs anywhere: all load is structural, and there is none.
        assert_approx_eq!(result.plan.achieved_total.in_kg(), 0.0, 1e-9);
        assert!(result.plan.right_side.is_empty());
        assert!(!result.plan.exact);
    }

    #[rstest]
    #[case(100.0, &[25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25])]
    #[case(77.5, &[25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25])]
    #[case(103.0, &[25.0, 10.0])]
    #[case(61.7, &[20.0, 5.0, 0.5])]
    fn test_greedy_never_overshoots(#[case] target: f64, #[case] denominations: &[f64]) {
        let barbell = equipment(6, "Barbell", Implementation::Unified, 20.0, PegCount::Both);
        let result = loadout(
            &[barbell],
            LimbMovement::BilateralDependent,
            None,
            Mass::from_kg(target),
            &kg(denominations),
        );
        assert!(result.plan.achieved_total.in_kg() <= result.plan.display_total.in_kg() + 1e-9);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(40.0, 2)]
    #[case(41.25, 3)]
    fn test_exact_fill(#[case] per_side: f64, #[case] plate_count: usize) {
        let spec = PlateSpec {
            display_total: Mass::from_kg(2.0 * per_side + 20.0),
            per_side_target: Mass::from_kg(per_side),
            replicates: 1,
        };
        let plan = plate_plan(
            &spec,
            Mass::from_kg(20.0),
            1,
            &kg(&[20.0, 15.0, 10.0, 5.0, 2.5, 1.25]),
            PegCount::Both,
        );
        assert_eq!(plan.right_side.len(), plate_count);
        assert!(plan.exact);
        assert_approx_eq!(plan.delta().in_kg(), 0.0, 1e-9);
    }

    #[test]
    fn test_plate_spec_no_peg_branch() {
        let spec = plate_spec(
            Mass::from_kg(80.0),
            Mass::from_kg(60.0),
            1,
            1,
            PegCount::None,
        );
        assert_approx_eq!(spec.per_side_target.in_kg(), 0.0, 1e-9);

        let plan = plate_plan(&spec, Mass::from_kg(60.0), 1, &kg(&[20.0]), PegCount::None);
        assert!(plan.right_side.is_empty());
        assert_approx_eq!(plan.achieved_total.in_kg(), 60.0, 1e-9);
        assert_approx_eq!(plan.delta().in_kg(), 20.0, 1e-9);
        assert!(!plan.exact);
    }

    #[test]
    fn test_landmine_uses_host_peg() {
        let barbell = equipment(7, "Barbell", Implementation::Unified, 20.0, PegCount::Both);
        let landmine = Equipment {
            id: EquipmentID::from(8u128),
            name: "Landmine".to_string(),
            category: EquipmentCategory::Other,
            implementation: None,
            base_weight: None,
            peg_count: Some(PegCount::Uses),
        };
        let result = loadout(
            &[landmine, barbell],
            LimbMovement::BilateralDependent,
            None,
            Mass::from_kg(60.0),
            &kg(&[20.0, 10.0, 5.0]),
        );

        // One peg is occupied by the insert: a single 40 kg stack remains.
        assert_approx_eq!(result.plan.per_side_target.in_kg(), 40.0, 1e-9);
        assert_eq!(result.plan.right_side, kg(&[20.0, 20.0]));
        assert_approx_eq!(result.plan.achieved_total.in_kg(), 60.0, 1e-9);
        assert!(result.plan.exact);
    }
}
