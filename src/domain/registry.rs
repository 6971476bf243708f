use super::*;

use dotenv::dotenv;
use std::collections::HashMap;
use std::env;
use tracing::{debug, error, warn};

pub const DEFAULT_CAPACITY: usize = 10_000;

/// Service-level cap on lookup keys. Independent of the record's own
/// ten-character id rule; both apply on add.
const KEY_MAX_LEN: usize = 100;

/// Owns the id-to-contact mapping. Mutating operations take `&mut self`, so a
/// single owner gets exclusive access from the borrow checker alone; wrap in a
/// [`SharedRegistry`](crate::domain::shared::SharedRegistry) to share across
/// threads. The map itself is never handed out; reads return borrows or
/// snapshots.
#[derive(Debug)]
pub struct ContactRegistry {
    contacts: HashMap<String, Contact>,
    capacity: usize,
}

impl Default for ContactRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactRegistry {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ContactRegistry {
            contacts: HashMap::new(),
            capacity,
        }
    }

    /// Capacity from the `REGISTRY_CAPACITY` env var (a `.env` file is
    /// honored). Missing, unparseable, or zero values fall back to the
    /// default.
    pub fn from_env() -> Self {
        dotenv().ok();

        let capacity = env::var("REGISTRY_CAPACITY")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|&capacity| capacity > 0)
            .unwrap_or(DEFAULT_CAPACITY);

        Self::with_capacity(capacity)
    }

    /// Inserts a contact keyed by its id. The id must also satisfy the
    /// service-level key rule, the id must be free, and the registry must be
    /// under capacity.
    pub fn add_contact(&mut self, contact: Contact) -> Result<(), RegistryError> {
        validate_key(contact.id())?;

        if self.contacts.contains_key(contact.id()) {
            return Err(RegistryError::DuplicateId(contact.id().to_string()));
        }
        if self.contacts.len() >= self.capacity {
            return Err(RegistryError::CapacityExceeded(self.capacity));
        }

        debug!(id = contact.id(), "contact added");
        self.contacts.insert(contact.id().to_string(), contact);
        Ok(())
    }

    pub fn delete_contact(&mut self, id: &str) -> Result<(), RegistryError> {
        validate_key(id)?;

        match self.contacts.remove(id) {
            Some(_) => {
                debug!(id, "contact deleted");
                Ok(())
            }
            None => Err(RegistryError::NotFound(id.to_string())),
        }
    }

    pub fn update_first_name(&mut self, id: &str, first_name: &str) -> Result<(), RegistryError> {
        self.update_field(id, "First name", first_name, |contact, value| {
            contact.set_first_name(value)
        })
    }

    pub fn update_last_name(&mut self, id: &str, last_name: &str) -> Result<(), RegistryError> {
        self.update_field(id, "Last name", last_name, |contact, value| {
            contact.set_last_name(value)
        })
    }

    pub fn update_phone(&mut self, id: &str, phone: &str) -> Result<(), RegistryError> {
        self.update_field(id, "Phone number", phone, |contact, value| {
            contact.set_phone(value)
        })
    }

    pub fn update_address(&mut self, id: &str, address: &str) -> Result<(), RegistryError> {
        self.update_field(id, "Address", address, |contact, value| {
            contact.set_address(value)
        })
    }

    /// Updates every present field as a unit, in the fixed order first name,
    /// last name, phone, address. `None` skips a field. If any step fails,
    /// all already-applied steps are rolled back from a snapshot and the
    /// original cause is returned wrapped in `AtomicUpdate`; a rollback
    /// failure escalates to `Internal` instead.
    pub fn update_contact(
        &mut self,
        id: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<(), RegistryError> {
        validate_key(id)?;

        let contact = self
            .contacts
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        let snapshot = contact.clone();

        if let Err(cause) = apply_update(contact, first_name, last_name, phone, address) {
            warn!(id, %cause, "atomic update failed, rolling back");

            if let Err(rollback_err) = restore_fields(contact, &snapshot) {
                error!(id, %rollback_err, "rollback failed, contact may be partially updated");
                return Err(RegistryError::Internal(format!(
                    "rollback failed after update error ({}): {}",
                    cause, rollback_err
                )));
            }
            return Err(RegistryError::AtomicUpdate(Box::new(cause)));
        }

        debug!(id, "contact updated");
        Ok(())
    }

    /// The only read that suppresses the not-found case: blank and absent ids
    /// both come back as `None`.
    pub fn get_contact(&self, id: &str) -> Option<&Contact> {
        if id.trim().is_empty() {
            return None;
        }
        self.contacts.get(id)
    }

    pub fn get_contact_or_fail(&self, id: &str) -> Result<&Contact, RegistryError> {
        validate_key(id)?;
        self.contacts
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn contains_contact(&self, id: &str) -> bool {
        !id.trim().is_empty() && self.contacts.contains_key(id)
    }

    pub fn contact_list(&self) -> Vec<&Contact> {
        self.contacts.values().collect()
    }

    pub fn contact_ids(&self) -> Vec<&str> {
        self.contacts.keys().map(String::as_str).collect()
    }

    /// Top fuzzy matches on contact names, best first.
    pub fn search_by_name(&self, query: &str) -> Result<Vec<&Contact>, RegistryError> {
        search::fuzzy_match_names(&self.contact_list(), query)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.contacts.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.contacts.len())
    }

    pub fn clear(&mut self) {
        debug!(count = self.contacts.len(), "registry cleared");
        self.contacts.clear();
    }

    fn update_field<F>(
        &mut self,
        id: &str,
        field: &'static str,
        value: &str,
        set: F,
    ) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut Contact, &str) -> Result<(), ValidationError>,
    {
        validate_key(id)?;
        validate_field_value(value, field)?;

        let contact = self
            .contacts
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        // The setter either fully succeeds or has no effect, so a validation
        // failure needs no restore here.
        set(contact, value)
            .map_err(|err| RegistryError::InvalidArgument(format!("failed to update: {}", err)))?;

        debug!(id, field, "contact field updated");
        Ok(())
    }
}

/// Service-level key rule: non-blank, no surrounding whitespace, at most 100
/// characters. Stricter about whitespace than the record's own id rule.
fn validate_key(id: &str) -> Result<(), RegistryError> {
    if id.is_empty() {
        return Err(RegistryError::InvalidArgument(
            "Contact ID cannot be empty".to_string(),
        ));
    }
    if id.trim().is_empty() {
        return Err(RegistryError::InvalidArgument(
            "Contact ID cannot be whitespace only".to_string(),
        ));
    }
    if id != id.trim() {
        return Err(RegistryError::InvalidArgument(
            "Contact ID cannot have leading or trailing whitespace".to_string(),
        ));
    }
    if id.chars().count() > KEY_MAX_LEN {
        return Err(RegistryError::InvalidArgument(format!(
            "Contact ID is too long (max {} characters)",
            KEY_MAX_LEN
        )));
    }
    Ok(())
}

/// Update pre-check, independent of the record's own length rules: a value
/// that trims to empty is rejected before the stored contact is touched.
fn validate_field_value(value: &str, field: &'static str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidArgument(format!(
            "{} cannot be empty or whitespace only",
            field
        )));
    }
    Ok(())
}

fn apply_update(
    contact: &mut Contact,
    first_name: Option<&str>,
    last_name: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
) -> Result<(), RegistryError> {
    if let Some(value) = first_name {
        validate_field_value(value, "First name")?;
        contact.set_first_name(value)?;
    }
    if let Some(value) = last_name {
        validate_field_value(value, "Last name")?;
        contact.set_last_name(value)?;
    }
    if let Some(value) = phone {
        validate_field_value(value, "Phone number")?;
        contact.set_phone(value)?;
    }
    if let Some(value) = address {
        validate_field_value(value, "Address")?;
        contact.set_address(value)?;
    }
    Ok(())
}

/// Restores all four fields from the snapshot through the ordinary setters.
/// Snapshot values were valid when captured, so a failure here means the
/// rollback contract itself broke.
fn restore_fields(contact: &mut Contact, snapshot: &Contact) -> Result<(), ValidationError> {
    contact.set_first_name(snapshot.first_name())?;
    contact.set_last_name(snapshot.last_name())?;
    contact.set_phone(snapshot.phone())?;
    contact.set_address(snapshot.address())?;
    Ok(())
}
