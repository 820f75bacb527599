//! Domain layer: equipment records, eager-loading options, and the
//! validator that gates mutations.

pub mod equipment;
pub mod include;
pub mod validator;

pub use equipment::{Checklist, EQUIPMENT_ID_LEN, Equipment, EquipmentType, Question};
pub use include::Include;
