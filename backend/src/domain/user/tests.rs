//! Regression coverage for user value objects and profile patches.

use rstest::rstest;

use super::*;

fn sample_user() -> User {
    User {
        id: UserId::random(),
        email: Email::new("ada@example.com").expect("valid email"),
        password_hash: "$argon2id$stub".to_owned(),
        role: Role::Submitter,
        is_active: true,
        avatar_url: None,
        bio: None,
        github_link: None,
        linkedin_link: None,
        studio_name: None,
    }
}

#[rstest]
#[case("ada@example.com", true)]
#[case("  ada@example.com  ", true)]
#[case("", false)]
#[case("   ", false)]
#[case("no-at-sign", false)]
#[case("@example.com", false)]
#[case("ada@", false)]
#[case("ada@localhost", false)]
#[case("ada@x@y.com", false)]
fn email_validation(#[case] raw: &str, #[case] ok: bool) {
    assert_eq!(Email::new(raw).is_ok(), ok, "email: {raw:?}");
}

#[test]
fn email_is_trimmed() {
    let email = Email::new("  ada@example.com ").expect("valid email");
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
#[case("submitter", Role::Submitter)]
#[case("admin", Role::Admin)]
fn role_round_trips_through_strings(#[case] raw: &str, #[case] role: Role) {
    assert_eq!(Role::parse(raw), Ok(role));
    assert_eq!(role.as_str(), raw);
}

#[test]
fn unknown_role_is_rejected() {
    assert_eq!(Role::parse("root"), Err(UserValidationError::UnknownRole));
}

#[test]
fn user_id_rejects_non_uuid_strings() {
    assert_eq!(
        UserId::new("nonexistent-id"),
        Err(UserValidationError::InvalidId)
    );
}

#[test]
fn public_profile_carries_no_credential_or_role() {
    let user = sample_user();
    let profile = user.public_profile();
    assert_eq!(profile.id, user.id);
    assert_eq!(profile.email, user.email);
    let rendered = serde_json::to_string(&profile).expect("profile serializes");
    assert!(!rendered.contains("password"));
    assert!(!rendered.contains("role"));
}

#[test]
fn absent_patch_fields_leave_values_untouched() {
    let mut user = sample_user();
    user.avatar_url = Some("https://example.com/a.png".to_owned());

    let patch = ProfileUpdate {
        bio: Some(Some("X".to_owned())),
        ..ProfileUpdate::default()
    };
    let updated = patch.apply(user);
    assert_eq!(updated.bio.as_deref(), Some("X"));
    assert_eq!(updated.avatar_url.as_deref(), Some("https://example.com/a.png"));
}

#[test]
fn explicit_null_clears_a_field() {
    let mut user = sample_user();
    user.bio = Some("old".to_owned());

    let patch = ProfileUpdate {
        bio: Some(None),
        ..ProfileUpdate::default()
    };
    assert_eq!(patch.apply(user).bio, None);
}

#[test]
fn explicit_empty_string_is_written() {
    let mut user = sample_user();
    user.studio_name = Some("Studio".to_owned());

    let patch = ProfileUpdate {
        studio_name: Some(Some(String::new())),
        ..ProfileUpdate::default()
    };
    assert_eq!(patch.apply(user).studio_name.as_deref(), Some(""));
}

#[test]
fn empty_patch_is_reported_as_empty() {
    assert!(ProfileUpdate::default().is_empty());
}

#[rstest]
#[case("https://github.com/user", true)]
#[case("", true)]
#[case("not a url", false)]
fn link_fields_must_parse_as_urls(#[case] raw: &str, #[case] ok: bool) {
    let patch = ProfileUpdate {
        github_link: Some(Some(raw.to_owned())),
        ..ProfileUpdate::default()
    };
    assert_eq!(patch.validate().is_ok(), ok, "link: {raw:?}");
}
