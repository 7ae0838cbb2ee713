use std::fmt::{self, Display};

use derive_more::Deref;
use uuid::Uuid;

use crate::{
    Exercise, LimbMovement, Mass, MassError, ReadError, UnitSystem, UpdateError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait EquipmentRepository {
    async fn read_equipment(&self) -> Result<Vec<Equipment>, ReadError>;
    async fn update_base_weight(
        &self,
        id: EquipmentID,
        base_weight: Mass,
    ) -> Result<Equipment, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait EquipmentService {
    async fn get_equipment(&self) -> Result<Vec<Equipment>, ReadError>;
    async fn get_equipment_for_exercise(
        &self,
        exercise: &Exercise,
    ) -> Result<Vec<Equipment>, ReadError>;
    async fn update_base_weight(
        &self,
        id: EquipmentID,
        base_weight: Mass,
    ) -> Result<Equipment, UpdateError>;

    fn validate_base_weight(
        &self,
        input: &str,
        system: UnitSystem,
    ) -> Result<Mass, ValidationError> {
        Mass::parse(input, system).map_err(|err| match err {
            MassError::OutOfRange => {
                ValidationError::Other("Base weight must be a non-negative number".into())
            }
            MassError::ParseError => {
                ValidationError::Other("Base weight must be a decimal number".into())
            }
        })
    }
}

/// One loadable apparatus (barbell, machine arm, dumbbell, landmine).
///
/// A missing `base_weight` means the piece contributes no fixed load (e.g. a
/// resistance band). A missing `peg_count` contributes no loading pegs.
#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: EquipmentID,
    pub name: String,
    pub category: EquipmentCategory,
    pub implementation: Option<Implementation>,
    pub base_weight: Option<Mass>,
    pub peg_count: Option<PegCount>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EquipmentID(Uuid);

impl EquipmentID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for EquipmentID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for EquipmentID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentCategory {
    SmallWeights,
    BarsPlates,
    BenchesRacks,
    CableMachines,
    PlatedMachines,
    WeightMachines,
    ResistanceBands,
    HouseholdItems,
    CardioMachines,
    Other,
}

impl Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EquipmentCategory::SmallWeights => "Small Weights",
                EquipmentCategory::BarsPlates => "Bars & Plates",
                EquipmentCategory::BenchesRacks => "Benches & Racks",
                EquipmentCategory::CableMachines => "Cable Machines",
                EquipmentCategory::PlatedMachines => "Plated Machines",
                EquipmentCategory::WeightMachines => "Weight Machines",
                EquipmentCategory::ResistanceBands => "Resistance Bands",
                EquipmentCategory::HouseholdItems => "Household Items",
                EquipmentCategory::CardioMachines => "Cardio Machines",
                EquipmentCategory::Other => "Other",
            }
        )
    }
}

/// How an equipment piece distributes load across limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Implementation {
    /// One implement, shared load (barbell, pin-loaded machines).
    Unified,
    /// One implement, load divided per limb (lever machines).
    Divided,
    /// Separate implement per limb (dumbbells, kettlebells).
    Individual,
}

impl Implementation {
    /// Structural multipliers implied by this implementation pattern for a
    /// given limb movement.
    #[must_use]
    pub fn movement_count(self, movement: LimbMovement) -> MovementCount {
        match (self, movement) {
            (Implementation::Unified, _)
            | (Implementation::Divided, LimbMovement::BilateralDependent)
            | (
                Implementation::Individual,
                LimbMovement::BilateralDependent | LimbMovement::Unilateral,
            ) => MovementCount {
                implements_used: 1,
                base_weight_multiplier: 1,
                peg_multiplier: PegModifier::None,
            },
            (Implementation::Divided, LimbMovement::Unilateral) => MovementCount {
                implements_used: 1,
                base_weight_multiplier: 1,
                peg_multiplier: PegModifier::Half,
            },
            (Implementation::Divided, LimbMovement::BilateralIndependent) => MovementCount {
                implements_used: 1,
                base_weight_multiplier: 2,
                peg_multiplier: PegModifier::None,
            },
            (Implementation::Individual, LimbMovement::BilateralIndependent) => MovementCount {
                implements_used: 2,
                base_weight_multiplier: 2,
                peg_multiplier: PegModifier::None,
            },
        }
    }

    /// Like [`movement_count`](Self::movement_count), with an explicit
    /// implement-count override for `Individual` equipment (e.g. a carry
    /// using three dumbbells). The peg multiplier is unaffected.
    #[must_use]
    pub fn movement_count_with_implements(
        self,
        movement: LimbMovement,
        implements: Option<u32>,
    ) -> MovementCount {
        let count = self.movement_count(movement);
        match (self, implements) {
            (Implementation::Individual, Some(n)) if n > 0 => MovementCount {
                implements_used: n,
                base_weight_multiplier: n,
                peg_multiplier: count.peg_multiplier,
            },
            _ => count,
        }
    }
}

impl Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Implementation::Unified => "Unified",
                Implementation::Divided => "Divided",
                Implementation::Individual => "Individual",
            }
        )
    }
}

/// Derived per computation, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementCount {
    pub implements_used: u32,
    pub base_weight_multiplier: u32,
    pub peg_multiplier: PegModifier,
}

/// Fraction of an equipment piece's pegs loaded per side.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PegModifier {
    #[default]
    None,
    Half,
}

impl PegModifier {
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            PegModifier::None => 1.0,
            PegModifier::Half => 0.5,
        }
    }
}

/// Loading-peg configuration of an equipment piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PegCount {
    /// The piece occupies a peg on a host rather than having its own
    /// (landmine/t-bar base).
    Uses,
    /// No plates are loaded (pin-stack and non-plated equipment).
    None,
    /// Plates load on a single peg.
    Single,
    /// Plates load on two mirrored pegs.
    Both,
}

impl PegCount {
    #[must_use]
    pub fn count(self) -> i32 {
        match self {
            PegCount::Uses => -1,
            PegCount::None => 0,
            PegCount::Single => 1,
            PegCount::Both => 2,
        }
    }

    #[must_use]
    pub fn from_count(count: i32) -> Self {
        match count {
            -1 => PegCount::Uses,
            0 => PegCount::None,
            1 => PegCount::Single,
            _ => PegCount::Both,
        }
    }
}

impl Display for PegCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PegCount::Uses => "Uses peg",
                PegCount::None => "No plates",
                PegCount::Single => "One side",
                PegCount::Both => "Both sides",
            }
        )
    }
}
