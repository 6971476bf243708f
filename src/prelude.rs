pub use crate::domain::{
    contact::{self, Contact},
    registry::{ContactRegistry, DEFAULT_CAPACITY},
    search,
    shared::SharedRegistry,
};
pub use crate::errors::{RegistryError, ValidationError};
pub use crate::validation;
