use phonebook_core::db::open_db_in_memory;
use phonebook_core::{
    Contact, ContactRepository, ContactService, ContactValidationError, NewContact, RepoError,
    SqliteContactRepository,
};
use std::collections::HashSet;

#[test]
fn add_assigns_fresh_unique_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let first = repo.add(&NewContact::new("Anna", "111")).unwrap();
    let second = repo.add(&NewContact::new("Ben", "")).unwrap();
    assert_ne!(first, second);

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.contains(&Contact::new(first, "Anna", "111")));
    assert!(all.contains(&Contact::new(second, "Ben", "")));
}

#[test]
fn add_rejects_blank_name_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    for name in ["", "   ", "\t\n"] {
        let err = repo.add(&NewContact::new(name, "000")).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ContactValidationError::BlankName)
        ));
    }
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn update_replaces_name_and_phone() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let id = repo.add(&NewContact::new("Anna", "111")).unwrap();
    let other = repo.add(&NewContact::new("Ben", "222")).unwrap();
    repo.update(&Contact::new(id, "Anna Maria", "999")).unwrap();

    let all = as_set(repo.list_all().unwrap());
    assert_eq!(
        all,
        as_set(vec![
            Contact::new(id, "Anna Maria", "999"),
            Contact::new(other, "Ben", "222"),
        ])
    );
}

#[test]
fn update_missing_id_is_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    repo.add(&NewContact::new("Anna", "111")).unwrap();
    let before = as_set(repo.list_all().unwrap());

    repo.update(&Contact::new(4242, "Ghost", "000")).unwrap();
    assert_eq!(as_set(repo.list_all().unwrap()), before);
}

#[test]
fn update_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let id = repo.add(&NewContact::new("Anna", "111")).unwrap();
    let err = repo.update(&Contact::new(id, " ", "111")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(
        repo.list_all().unwrap(),
        vec![Contact::new(id, "Anna", "111")]
    );
}

#[test]
fn delete_is_idempotent_and_ignores_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let anna = repo.add(&NewContact::new("Anna", "111")).unwrap();
    let ben = repo.add(&NewContact::new("Ben", "222")).unwrap();

    repo.delete(anna).unwrap();
    repo.delete(anna).unwrap();
    repo.delete(9999).unwrap();

    assert_eq!(repo.list_all().unwrap(), vec![Contact::new(ben, "Ben", "222")]);
}

#[test]
fn deleted_ids_are_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let first = repo.add(&NewContact::new("Anna", "111")).unwrap();
    repo.delete(first).unwrap();
    let second = repo.add(&NewContact::new("Anna", "111")).unwrap();
    assert!(second > first);
}

#[test]
fn substring_search_returns_matching_subset() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    for name in ["Anna", "Ben", "Dan"] {
        repo.add(&NewContact::new(name, "")).unwrap();
    }

    let names = names_of(repo.find_by_name_substring("an").unwrap());
    assert_eq!(names, HashSet::from(["Anna".to_string(), "Dan".to_string()]));

    let all = repo.list_all().unwrap();
    let expected = all
        .iter()
        .filter(|contact| contact.name.contains("en"))
        .map(|contact| contact.name.clone())
        .collect::<HashSet<_>>();
    assert_eq!(names_of(repo.find_by_name_substring("en").unwrap()), expected);
}

#[test]
fn substring_search_treats_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    repo.add(&NewContact::new("100% Plumbing", "")).unwrap();
    repo.add(&NewContact::new("1000 Widgets", "")).unwrap();
    repo.add(&NewContact::new("snake_case", "")).unwrap();
    repo.add(&NewContact::new("snakeXcase", "")).unwrap();

    assert_eq!(
        names_of(repo.find_by_name_substring("0%").unwrap()),
        HashSet::from(["100% Plumbing".to_string()])
    );
    assert_eq!(
        names_of(repo.find_by_name_substring("e_c").unwrap()),
        HashSet::from(["snake_case".to_string()])
    );
}

#[test]
fn substring_search_rejects_blank_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    for text in ["", "  "] {
        let err = repo.find_by_name_substring(text).unwrap_err();
        assert!(matches!(err, RepoError::InvalidQuery(_)));
    }
}

#[test]
fn exact_name_lookup_returns_single_first_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    repo.add(&NewContact::new("Anna", "111")).unwrap();
    repo.add(&NewContact::new("Anna", "222")).unwrap();
    repo.add(&NewContact::new("Annabel", "333")).unwrap();

    let found = repo.find_first_by_exact_name("Anna").unwrap().unwrap();
    assert_eq!(found.name, "Anna");
    assert!(found.phone == "111" || found.phone == "222");

    assert!(repo.find_first_by_exact_name("Ann").unwrap().is_none());
}

#[test]
fn null_phone_reads_as_empty_and_null_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("INSERT INTO contacts (name, phone) VALUES ('Anna', NULL);")
        .unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].phone, "");

    conn.execute_batch("INSERT INTO contacts (name, phone) VALUES (NULL, '000');")
        .unwrap();
    let err = repo.list_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn engine_errors_surface_as_db_failures() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE contacts;").unwrap();
    let repo = SqliteContactRepository::new(&conn);

    assert!(matches!(repo.list_all().unwrap_err(), RepoError::Db(_)));
    assert!(matches!(
        repo.add(&NewContact::new("Anna", "111")).unwrap_err(),
        RepoError::Db(_)
    ));
}

#[test]
fn service_routes_blank_filter_to_list_all() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::new(&conn));

    service.add(&NewContact::new("Anna", "111")).unwrap();
    service.add(&NewContact::new("Ben", "222")).unwrap();

    assert_eq!(service.visible_contacts("").unwrap().len(), 2);
    assert_eq!(service.visible_contacts("   ").unwrap().len(), 2);
    assert_eq!(
        names_of(service.visible_contacts("Be").unwrap()),
        HashSet::from(["Ben".to_string()])
    );
}

fn as_set(contacts: Vec<Contact>) -> HashSet<Contact> {
    contacts.into_iter().collect()
}

fn names_of(contacts: Vec<Contact>) -> HashSet<String> {
    contacts.into_iter().map(|contact| contact.name).collect()
}
