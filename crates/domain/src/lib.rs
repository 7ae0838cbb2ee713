#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod equipment;
pub mod error;
pub mod exercise;
pub mod plan;
pub mod plates;
pub mod resolver;
pub mod service;
pub mod unit;

pub use equipment::{
    Equipment, EquipmentCategory, EquipmentID, EquipmentRepository, EquipmentService,
    Implementation, MovementCount, PegCount, PegModifier,
};
pub use error::{ReadError, StorageError, UpdateError, ValidationError};
pub use exercise::{Exercise, ExerciseID, LimbMovement};
pub use plan::{Loadout, Plan, PlateSpec, loadout, plate_plan, plate_spec};
pub use plates::{Plates, PlatesError, PlatesRepository, PlatesService};
pub use resolver::{ResolvedBase, resolve_equipment, resolve_pegs};
pub use service::{LoadoutService, Service};
pub use unit::{Distance, Mass, MassError, Speed, TimeSpan, UnitSystem};
