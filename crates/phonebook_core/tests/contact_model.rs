use phonebook_core::{Contact, ContactValidationError, DialogMode, NewContact};

#[test]
fn validation_rejects_blank_names_only() {
    assert_eq!(
        NewContact::new("", "111").validate(),
        Err(ContactValidationError::BlankName)
    );
    assert_eq!(
        Contact::new(1, " \t", "").validate(),
        Err(ContactValidationError::BlankName)
    );
    assert_eq!(NewContact::new("Anna", "").validate(), Ok(()));
}

#[test]
fn contact_serialization_uses_expected_wire_fields() {
    let contact = Contact::new(7, "Anna", "111");

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Anna");
    assert_eq!(json["phone"], "111");

    let decoded: Contact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, contact);
}

#[test]
fn missing_phone_defaults_to_empty() {
    let decoded: NewContact = serde_json::from_str(r#"{"name":"Ben"}"#).unwrap();
    assert_eq!(decoded, NewContact::new("Ben", ""));
}

#[test]
fn dialog_mode_is_tagged_by_mode() {
    let none = serde_json::to_value(DialogMode::None).unwrap();
    assert_eq!(none, serde_json::json!({ "mode": "none" }));

    let edit = DialogMode::Edit(Contact::new(3, "Dan", "222"));
    let json = serde_json::to_value(&edit).unwrap();
    assert_eq!(json["mode"], "edit");
    assert_eq!(json["contact"]["id"], 3);
    assert_eq!(edit.label(), "edit");

    let decoded: DialogMode = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, edit);
}
