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
fn signup_logs_in_and_issues_a_token() {
    let b = backend("auth_signup_db");
    let (user, token) = b.auth.signup(&credentials("muki")).unwrap();
    assert_eq!(user.username, "muki");
    assert!(!user.is_admin);
    assert!(!token.is_empty());

    let validated = b.auth.validate_token(&token).expect("fresh token validates");
    assert_eq!(validated, user);
}

#[test]
fn login_checks_the_stored_password() {
    let b = backend("auth_login_db");
    b.auth.signup(&credentials("muki")).unwrap();

    let (user, _token) = b.auth.login("muki", "secret1").unwrap();
    assert_eq!(user.username, "muki");

    let err = b.auth.login("muki", "wrong").unwrap_err();
    assert!(err.to_string().contains("invalid username or password"));

    // Unknown accounts fail the same way as bad passwords.
    let err = b.auth.login("ghost", "secret1").unwrap_err();
    assert!(err.to_string().contains("invalid username or password"));
}

#[test]
fn login_requires_both_credentials() {
    let b = backend("auth_missing_db");
    assert!(matches!(b.auth.login("", "pass"), Err(toystore::AppError::Validation(_))));
    assert!(matches!(b.auth.login("muki", ""), Err(toystore::AppError::Validation(_))));
}

#[test]
fn signup_rejects_a_taken_username() {
    let b = backend("auth_taken_db");
    b.auth.signup(&credentials("muki")).unwrap();
    let err = b.auth.signup(&credentials("muki")).unwrap_err();
    assert!(err.to_string().contains("username is taken"));
}

#[test]
fn tokens_do_not_cross_secrets() {
    let a = Backend::new(&Config::new("auth_cross_db_a", "secret-a")).unwrap();
    let (_, token) = a.auth.signup(&credentials("muki")).unwrap();

    let b = Backend::new(&Config::new("auth_cross_db_b", "secret-b")).unwrap();
    assert!(b.auth.validate_token(&token).is_none());
    assert!(b.auth.validate_token("deadbeef").is_none());
}

#[test]
fn backend_requires_a_usable_secret() {
    assert!(matches!(
        Backend::new(&Config::new("auth_nosecret_db", "")),
        Err(toystore::AppError::Config(_))
    ));
}
