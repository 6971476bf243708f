pub mod contact;
pub mod registry;
pub mod search;
pub mod shared;

pub use crate::errors::{RegistryError, ValidationError};
pub use crate::validation;
pub use contact::Contact;
pub use registry::ContactRegistry;
pub use shared::SharedRegistry;
