use derive_more::Deref;
use uuid::Uuid;

use crate::{Equipment, EquipmentID, PegCount};

/// The exercise-facing contract: collaborators supply the limb-movement
/// classification, an optional implement-count override and the candidate
/// equipment for the exercise. Selection of exercise and load happens
/// upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub limb_movement: Option<LimbMovement>,
    pub implement_count: Option<u32>,
    pub equipment: Vec<EquipmentID>,
}

impl Exercise {
    /// An unclassified exercise is treated as bilateral dependent.
    #[must_use]
    pub fn movement(&self) -> LimbMovement {
        self.limb_movement.unwrap_or(LimbMovement::BilateralDependent)
    }

    /// Whether any of the exercise's candidate equipment loads plates.
    #[must_use]
    pub fn uses_plates(&self, equipment: &[Equipment]) -> bool {
        equipment
            .iter()
            .any(|e| e.peg_count.unwrap_or(PegCount::None).count() > 0)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// How the limbs move relative to each other during an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimbMovement {
    /// Both limbs work together on one load (bench press, squat).
    BilateralDependent,
    /// Both limbs work separately but simultaneously (dumbbell press).
    BilateralIndependent,
    /// One limb works at a time (glute kickback).
    Unilateral,
}
