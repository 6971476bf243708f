use super::*;

pub use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One contact record. The id is fixed at construction; every other field is
/// mutable through a validating setter. A `Contact` is never observable with
/// an invalid or empty field: construction validates everything before the
/// value exists, and a failed setter leaves the record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContactDraft")]
pub struct Contact {
    id: String,
    first_name: String,
    last_name: String,
    phone: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let first_name = first_name.into();
        let last_name = last_name.into();
        let phone = phone.into();
        let address = address.into();

        validation::validate_id(&id)?;
        validation::validate_name(&first_name, "First name")?;
        validation::validate_name(&last_name, "Last name")?;
        validation::validate_phone(&phone)?;
        validation::validate_address(&address)?;

        let now = Utc::now();
        Ok(Contact {
            id,
            first_name,
            last_name,
            phone,
            address,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> Result<(), ValidationError> {
        let first_name = first_name.into();
        validation::validate_name(&first_name, "First name")?;
        self.first_name = first_name;
        self.touch();
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> Result<(), ValidationError> {
        let last_name = last_name.into();
        validation::validate_name(&last_name, "Last name")?;
        self.last_name = last_name;
        self.touch();
        Ok(())
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<(), ValidationError> {
        let phone = phone.into();
        validation::validate_phone(&phone)?;
        self.phone = phone;
        self.touch();
        Ok(())
    }

    pub fn set_address(&mut self, address: impl Into<String>) -> Result<(), ValidationError> {
        let address = address.into();
        validation::validate_address(&address)?;
        self.address = address;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Raw shape accepted from serialized input. Deserialization goes through
/// `TryFrom` so serde can never hand out a `Contact` that bypassed field
/// validation. Timestamps default for records serialized before they existed.
#[derive(Deserialize)]
struct ContactDraft {
    id: String,
    first_name: String,
    last_name: String,
    phone: String,
    address: String,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContactDraft> for Contact {
    type Error = ValidationError;

    fn try_from(draft: ContactDraft) -> Result<Self, Self::Error> {
        validation::validate_id(&draft.id)?;
        validation::validate_name(&draft.first_name, "First name")?;
        validation::validate_name(&draft.last_name, "Last name")?;
        validation::validate_phone(&draft.phone)?;
        validation::validate_address(&draft.address)?;

        Ok(Contact {
            id: draft.id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone: draft.phone,
            address: draft.address,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }
}
