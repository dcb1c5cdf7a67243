use thiserror::Error;

use crate::catalog::Category;

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("{category} is an add-on category and cannot occupy a base slot")]
    NotBaseCategory { category: Category },

    #[error("{category} is a base category and cannot be added as an add-on")]
    NotAddonCategory { category: Category },

    #[error("{slot} slot holds part '{id}' of category {category}")]
    SlotMismatch {
        slot: Category,
        id: String,
        category: Category,
    },

    #[error("No add-on with id '{0}' in the selection")]
    UnknownAddon(String),

    #[error("Duplicate part id '{0}' in catalog")]
    DuplicatePart(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown filter field '{0}'")]
    UnknownFilterField(String),
}
