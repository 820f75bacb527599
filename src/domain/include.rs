//! Eager-loading options for equipment read paths.

/// Which relations a read should attach to each [`super::Equipment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Include {
    /// Bare equipment rows.
    #[default]
    None,
    /// Attach the equipment type, without its questions.
    EquipmentType,
    /// Attach the equipment type together with its questions.
    EquipmentTypeWithQuestions,
}

impl Include {
    /// Returns `true` if the equipment type must be loaded.
    #[must_use]
    pub const fn loads_type(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` if the type's questions must be loaded.
    #[must_use]
    pub const fn loads_questions(self) -> bool {
        matches!(self, Self::EquipmentTypeWithQuestions)
    }
}
