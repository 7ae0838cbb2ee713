use log::{debug, error};

use crate::{
    Equipment, EquipmentID, EquipmentRepository, EquipmentService, Exercise, Loadout, Mass,
    Plates, PlatesRepository, PlatesService, ReadError, UnitSystem, UpdateError, loadout,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R>
where
    R: EquipmentRepository + PlatesRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: EquipmentRepository> EquipmentService for Service<R> {
    async fn get_equipment(&self) -> Result<Vec<Equipment>, ReadError> {
        log_on_error!(
            self.repository.read_equipment(),
            ReadError,
            "get",
            "equipment"
        )
    }

    async fn get_equipment_for_exercise(
        &self,
        exercise: &Exercise,
    ) -> Result<Vec<Equipment>, ReadError> {
        let equipment = self.get_equipment().await?;
        Ok(equipment
            .into_iter()
            .filter(|e| exercise.equipment.contains(&e.id))
            .collect())
    }

    async fn update_base_weight(
        &self,
        id: EquipmentID,
        base_weight: Mass,
    ) -> Result<Equipment, UpdateError> {
        log_on_error!(
            self.repository.update_base_weight(id, base_weight),
            UpdateError,
            "update",
            "base weight"
        )
    }
}

impl<R: PlatesRepository> PlatesService for Service<R> {
    async fn get_plates(&self) -> Result<Plates, ReadError> {
        log_on_error!(self.repository.read_plates(), ReadError, "get", "plates")
    }

    async fn replace_plates(&self, plates: Plates) -> Result<Plates, UpdateError> {
        log_on_error!(
            self.repository.replace_plates(plates),
            UpdateError,
            "replace",
            "plates"
        )
    }
}

#[allow(async_fn_in_trait)]
pub trait LoadoutService {
    async fn loadout_for_exercise(
        &self,
        exercise: &Exercise,
        target: Mass,
        system: UnitSystem,
    ) -> Result<Loadout, ReadError>;
}

impl<R> LoadoutService for Service<R>
where
    R: EquipmentRepository + PlatesRepository,
{
    async fn loadout_for_exercise(
        &self,
        exercise: &Exercise,
        target: Mass,
        system: UnitSystem,
    ) -> Result<Loadout, ReadError> {
        let candidates = self.get_equipment_for_exercise(exercise).await?;
        let plates = self.get_plates().await?;
        Ok(loadout(
            &candidates,
            exercise.movement(),
            exercise.implement_count,
            target,
            plates.resolved(system),
        ))
    }
}
