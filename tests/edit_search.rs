use contact_registry::prelude::*;

fn john() -> Contact {
    Contact::new("12345", "John", "Doe", "1234567890", "123 Main St").unwrap()
}

#[test]
fn single_field_updates_apply() -> Result<(), RegistryError> {
    let registry = SharedRegistry::new();
    registry.add_contact(john())?;

    registry.update_first_name("12345", "Jane")?;
    registry.update_last_name("12345", "Roe")?;
    registry.update_phone("12345", "0987654321")?;
    registry.update_address("12345", "456 Oak Ave")?;

    let found = registry.get_contact("12345").unwrap();
    assert_eq!(found.first_name(), "Jane");
    assert_eq!(found.last_name(), "Roe");
    assert_eq!(found.phone(), "0987654321");
    assert_eq!(found.address(), "456 Oak Ave");
    Ok(())
}

#[test]
fn invalid_value_leaves_the_field_unchanged() -> Result<(), RegistryError> {
    let registry = SharedRegistry::new();
    registry.add_contact(john())?;

    let err = registry.update_phone("12345", "123").unwrap_err();
    assert!(matches!(err, RegistryError::InvalidArgument(_)));
    assert_eq!(registry.get_contact("12345").unwrap().phone(), "1234567890");

    let err = registry
        .update_first_name("12345", "Christopher")
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidArgument(_)));
    assert_eq!(registry.get_contact("12345").unwrap().first_name(), "John");
    Ok(())
}

#[test]
fn whitespace_values_fail_the_pre_check() -> Result<(), RegistryError> {
    let registry = SharedRegistry::new();
    registry.add_contact(john())?;

    for value in ["", "   "] {
        let err = registry.update_address("12345", value).unwrap_err();
        assert!(
            matches!(err, RegistryError::InvalidArgument(_)),
            "{value:?}"
        );
    }
    assert_eq!(
        registry.get_contact("12345").unwrap().address(),
        "123 Main St"
    );
    Ok(())
}

#[test]
fn updating_absent_contact_is_not_found() {
    let registry = SharedRegistry::new();

    let err = registry.update_first_name("12345", "Jane").unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));

    let err = registry
        .update_contact("12345", Some("Jane"), None, None, None)
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[test]
fn atomic_update_is_all_or_nothing() -> Result<(), RegistryError> {
    let registry = SharedRegistry::new();
    registry.add_contact(john())?;

    // First name is valid and applied first; the phone step then fails, so
    // everything must come back to the pre-call values.
    let err = registry
        .update_contact(
            "12345",
            Some("Jane"),
            None,
            Some("invalid"),
            Some("456 Oak Ave"),
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::AtomicUpdate(_)));

    let found = registry.get_contact("12345").unwrap();
    assert_eq!(found.first_name(), "John");
    assert_eq!(found.last_name(), "Doe");
    assert_eq!(found.phone(), "1234567890");
    assert_eq!(found.address(), "123 Main St");
    Ok(())
}

#[test]
fn atomic_update_skips_absent_fields() -> Result<(), RegistryError> {
    let registry = SharedRegistry::new();
    registry.add_contact(john())?;

    registry.update_contact("12345", None, Some("Roe"), None, Some("456 Oak Ave"))?;

    let found = registry.get_contact("12345").unwrap();
    assert_eq!(found.first_name(), "John");
    assert_eq!(found.last_name(), "Roe");
    assert_eq!(found.phone(), "1234567890");
    assert_eq!(found.address(), "456 Oak Ave");
    Ok(())
}

#[test]
fn atomic_update_with_no_fields_is_a_no_op() -> Result<(), RegistryError> {
    let registry = SharedRegistry::new();
    registry.add_contact(john())?;

    registry.update_contact("12345", None, None, None, None)?;

    assert_eq!(registry.get_contact("12345").unwrap().first_name(), "John");
    Ok(())
}

#[test]
fn search_finds_contacts_by_name() -> Result<(), RegistryError> {
    let registry = SharedRegistry::new();
    registry.add_contact(Contact::new("1", "Alice", "Smith", "1234567890", "1 A St").unwrap())?;
    registry.add_contact(Contact::new("2", "Bob", "Jones", "1234567890", "2 B St").unwrap())?;

    let found = registry.search_by_name("Alice")?;
    assert_eq!(found[0].id(), "1");

    let found = registry.search_by_name("alice smith")?;
    assert_eq!(found[0].id(), "1");

    assert!(registry.search_by_name("zzzzz")?.is_empty());
    Ok(())
}

#[test]
fn search_rejects_blank_and_oversized_queries() {
    let registry = SharedRegistry::new();

    assert!(matches!(
        registry.search_by_name("   ").unwrap_err(),
        RegistryError::InvalidArgument(_)
    ));
    assert!(matches!(
        registry.search_by_name(&"a".repeat(40)).unwrap_err(),
        RegistryError::InvalidArgument(_)
    ));
}
