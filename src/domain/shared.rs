use super::*;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Clonable handle sharing one [`ContactRegistry`] across threads. Every
/// operation locks the same mutex, so at most one operation body runs at a
/// time and multi-field updates are never observed half-applied. Reads hand
/// out owned clones, so a contact is never exposed for mutation outside the
/// exclusive section and mutating a returned collection cannot touch the
/// registry.
///
/// Lock poisoning: operations that return `Result` surface it as
/// `RegistryError::Internal`; the suppressing reads and derived queries read
/// through it, since the core never unwinds mid-mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<ContactRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::from_registry(ContactRegistry::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_registry(ContactRegistry::with_capacity(capacity))
    }

    pub fn from_env() -> Self {
        Self::from_registry(ContactRegistry::from_env())
    }

    pub fn from_registry(registry: ContactRegistry) -> Self {
        SharedRegistry {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn add_contact(&self, contact: Contact) -> Result<(), RegistryError> {
        self.guard()?.add_contact(contact)
    }

    pub fn delete_contact(&self, id: &str) -> Result<(), RegistryError> {
        self.guard()?.delete_contact(id)
    }

    pub fn update_first_name(&self, id: &str, first_name: &str) -> Result<(), RegistryError> {
        self.guard()?.update_first_name(id, first_name)
    }

    pub fn update_last_name(&self, id: &str, last_name: &str) -> Result<(), RegistryError> {
        self.guard()?.update_last_name(id, last_name)
    }

    pub fn update_phone(&self, id: &str, phone: &str) -> Result<(), RegistryError> {
        self.guard()?.update_phone(id, phone)
    }

    pub fn update_address(&self, id: &str, address: &str) -> Result<(), RegistryError> {
        self.guard()?.update_address(id, address)
    }

    pub fn update_contact(
        &self,
        id: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<(), RegistryError> {
        self.guard()?
            .update_contact(id, first_name, last_name, phone, address)
    }

    pub fn get_contact(&self, id: &str) -> Option<Contact> {
        self.read().get_contact(id).cloned()
    }

    pub fn get_contact_or_fail(&self, id: &str) -> Result<Contact, RegistryError> {
        Ok(self.guard()?.get_contact_or_fail(id)?.clone())
    }

    pub fn contains_contact(&self, id: &str) -> bool {
        self.read().contains_contact(id)
    }

    /// Snapshot of all contacts at the moment of the call.
    pub fn contact_list(&self) -> Result<Vec<Contact>, RegistryError> {
        Ok(self.guard()?.contact_list().into_iter().cloned().collect())
    }

    pub fn contact_ids(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self
            .guard()?
            .contact_ids()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    pub fn search_by_name(&self, query: &str) -> Result<Vec<Contact>, RegistryError> {
        Ok(self
            .guard()?
            .search_by_name(query)?
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.read().is_full()
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.read().remaining_capacity()
    }

    pub fn clear(&self) -> Result<(), RegistryError> {
        self.guard()?.clear();
        Ok(())
    }

    fn guard(&self) -> Result<MutexGuard<'_, ContactRegistry>, RegistryError> {
        Ok(self.inner.lock()?)
    }

    fn read(&self) -> MutexGuard<'_, ContactRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str) -> Contact {
        Contact::new(id, "John", "Doe", "1234567890", "123 Main St").unwrap()
    }

    #[test]
    fn clones_share_one_registry() -> Result<(), RegistryError> {
        let registry = SharedRegistry::new();
        let handle = registry.clone();

        registry.add_contact(contact("12345"))?;

        assert!(handle.contains_contact("12345"));
        assert_eq!(handle.len(), 1);
        Ok(())
    }

    #[test]
    fn reads_return_snapshots_not_live_views() -> Result<(), RegistryError> {
        let registry = SharedRegistry::new();
        registry.add_contact(contact("1"))?;
        registry.add_contact(contact("2"))?;

        let mut list = registry.contact_list()?;
        list.clear();

        // Clearing the returned snapshot must not touch the registry.
        assert_eq!(registry.len(), 2);

        let mut found = registry.get_contact("1").unwrap();
        found.set_first_name("Jane").unwrap();

        // Mutating a returned clone must not touch the stored record either.
        assert_eq!(registry.get_contact("1").unwrap().first_name(), "John");
        Ok(())
    }
}
