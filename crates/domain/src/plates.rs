use crate::{Mass, ReadError, UnitSystem, UpdateError};

#[allow(async_fn_in_trait)]
pub trait PlatesRepository {
    async fn read_plates(&self) -> Result<Plates, ReadError>;
    async fn replace_plates(&self, plates: Plates) -> Result<Plates, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait PlatesService {
    async fn get_plates(&self) -> Result<Plates, ReadError>;
    async fn replace_plates(&self, plates: Plates) -> Result<Plates, UpdateError>;
}

/// The plate denominations an athlete owns, one set per unit system.
///
/// Duplicate denominations are harmless; the greedy fill treats the set as
/// unlimited supply per denomination anyway.
#[derive(Debug, Clone, PartialEq)]
pub struct Plates {
    lb: Vec<Mass>,
    kg: Vec<Mass>,
}

impl Plates {
    pub fn new(lb: Vec<Mass>, kg: Vec<Mass>) -> Result<Self, PlatesError> {
        validate(&lb)?;
        validate(&kg)?;
        Ok(Self { lb, kg })
    }

    /// The extended catalogue offered when editing the owned set.
    #[must_use]
    pub fn full_set(system: UnitSystem) -> Vec<Mass> {
        match system {
            UnitSystem::Imperial => [2.5, 5.0, 10.0, 25.0, 35.0, 45.0, 100.0]
                .into_iter()
                .map(Mass::from_lb)
                .collect(),
            UnitSystem::Metric => [1.25, 2.5, 5.0, 10.0, 15.0, 20.0, 25.0]
                .into_iter()
                .map(Mass::from_kg)
                .collect(),
        }
    }

    #[must_use]
    pub fn resolved(&self, system: UnitSystem) -> &[Mass] {
        match system {
            UnitSystem::Metric => &self.kg,
            UnitSystem::Imperial => &self.lb,
        }
    }

    pub fn set_resolved(
        &mut self,
        system: UnitSystem,
        plates: Vec<Mass>,
    ) -> Result<(), PlatesError> {
        validate(&plates)?;
        match system {
            UnitSystem::Metric => self.kg = plates,
            UnitSystem::Imperial => self.lb = plates,
        }
        Ok(())
    }

    #[must_use]
    pub fn sorted(plates: &[Mass], ascending: bool) -> Vec<Mass> {
        let mut sorted = plates.to_vec();
        sorted.sort_by(|a, b| {
            if ascending {
                a.in_kg().total_cmp(&b.in_kg())
            } else {
                b.in_kg().total_cmp(&a.in_kg())
            }
        });
        sorted
    }
}

impl Default for Plates {
    fn default() -> Self {
        Self {
            lb: [2.5, 5.0, 10.0, 25.0, 45.0]
                .into_iter()
                .map(Mass::from_lb)
                .collect(),
            kg: [1.25, 2.5, 5.0, 10.0, 15.0, 20.0, 25.0]
                .into_iter()
                .map(Mass::from_kg)
                .collect(),
        }
    }
}

fn validate(plates: &[Mass]) -> Result<(), PlatesError> {
    match plates
        .iter()
        .find(|p| !p.in_kg().is_finite() || p.in_kg() <= 0.0)
    {
        Some(plate) => Err(PlatesError::NonPositive(plate.in_kg())),
        None => Ok(()),
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PlatesError {
    #[error("Plate denominations must be positive ({0} kg)")]
    NonPositive(f64),
}
