use bson::oid::ObjectId;
use toystore::user::NewUser;
use toystore::{Backend, Config};

fn backend(db_name: &str) -> Backend {
    Backend::new(&Config::new(db_name, "test-secret")).unwrap()
}

fn credentials(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "secret1".to_string(),
        fullname: format!("{username} fullname"),
        img_url: None,
    }
}

#[test]
fn add_returns_a_view_without_password() {
    let b = backend("user_add_db");
    let view = b.users.add(&credentials("muki")).unwrap();
    assert_eq!(view.username, "muki");
    assert!(!view.is_admin);
    assert!(view.created_at > 0);

    let serialized = serde_json::to_value(&view).unwrap();
    assert!(serialized.get("password").is_none());
    assert!(serialized.get("_id").is_some());
}

#[test]
fn add_rejects_missing_or_taken_credentials() {
    let b = backend("user_validate_db");
    let blank = NewUser { password: String::new(), ..credentials("muki") };
    assert!(matches!(b.users.add(&blank), Err(toystore::AppError::Validation(_))));

    b.users.add(&credentials("muki")).unwrap();
    let err = b.users.add(&credentials("muki")).unwrap_err();
    assert!(err.to_string().contains("username is taken"));
}

#[test]
fn query_lists_every_account() {
    let b = backend("user_query_db");
    b.users.add(&credentials("muki")).unwrap();
    b.users.add(&credentials("puki")).unwrap();
    let users = b.users.query().unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["muki", "puki"]);
}

#[test]
fn get_by_id_and_username() {
    let b = backend("user_get_db");
    let view = b.users.add(&credentials("muki")).unwrap();

    let fetched = b.users.get_by_id(&view.id.to_hex()).unwrap();
    assert_eq!(fetched.username, "muki");

    assert!(matches!(
        b.users.get_by_id(&ObjectId::new().to_hex()),
        Err(toystore::AppError::NotFound(_))
    ));
    assert!(matches!(b.users.get_by_id("junk"), Err(toystore::AppError::Validation(_))));

    let full = b.users.get_by_username("muki").unwrap().unwrap();
    assert_eq!(full.password, "secret1");
    assert!(b.users.get_by_username("nobody").unwrap().is_none());
}

#[test]
fn update_changes_username_and_img_url() {
    let b = backend("user_update_db");
    let view = b.users.add(&credentials("muki")).unwrap();
    let id = view.id.to_hex();

    let updated = b.users.update(&id, Some("muki2"), Some("http://img")).unwrap();
    assert_eq!(updated.username, "muki2");
    assert_eq!(updated.img_url, "http://img");

    let stored = b.users.get_by_id(&id).unwrap();
    assert_eq!(stored.username, "muki2");
    assert_eq!(stored.img_url, "http://img");

    // Empty strings are treated as "leave alone".
    let untouched = b.users.update(&id, Some(""), None).unwrap();
    assert_eq!(untouched.username, "muki2");
}

#[test]
fn update_rejects_a_taken_username() {
    let b = backend("user_taken_db");
    b.users.add(&credentials("muki")).unwrap();
    let other = b.users.add(&credentials("puki")).unwrap();
    let err = b.users.update(&other.id.to_hex(), Some("muki"), None).unwrap_err();
    assert!(err.to_string().contains("username is taken"));
}

#[test]
fn remove_deletes_the_account() {
    let b = backend("user_remove_db");
    let view = b.users.add(&credentials("muki")).unwrap();
    b.users.remove(&view.id.to_hex()).unwrap();
    assert!(b.users.query().unwrap().is_empty());
    assert!(matches!(
        b.users.remove(&view.id.to_hex()),
        Err(toystore::AppError::NotFound(_))
    ));
}
