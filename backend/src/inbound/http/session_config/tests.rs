//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'k'; len]).expect("write key file");
    file
}

#[fixture]
fn release_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

#[rstest]
fn release_accepts_complete_settings(release_key: NamedTempFile) {
    let env = mock_env(release_vars(&release_key));
    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(release_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&release_key);
    vars.remove(missing);
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .expect_err("missing toggle must fail");
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "2")]
fn release_rejects_malformed_toggles(
    release_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&release_key);
    vars.insert(name, value.to_owned());
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .expect_err("malformed toggle must fail");
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_key: NamedTempFile) {
    let mut vars = release_vars(&release_key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .expect_err("ephemeral keys are debug-only");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_and_missing_keys() {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let err = session_settings_from_env(&mock_env(release_vars(&short)), BuildMode::Release)
        .expect_err("short key must fail");
    assert!(matches!(err, SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1));

    let mut vars = release_vars(&short);
    vars.insert(KEY_FILE_ENV, "/nonexistent/storefront/key".to_owned());
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .expect_err("missing key must fail");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(release_key: NamedTempFile) {
    let mut vars = release_vars(&release_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .expect_err("insecure SameSite=None must fail");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn debug_defaults_cover_an_empty_environment() {
    let settings = session_settings_from_env(&mock_env(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("unexpected", SameSite::Lax)]
#[case("strict", SameSite::Strict)]
#[case(" LAX ", SameSite::Lax)]
fn debug_same_site_parsing(release_key: NamedTempFile, #[case] raw: &str, #[case] expected: SameSite) {
    let mut vars = release_vars(&release_key);
    vars.insert(SAMESITE_ENV, raw.to_owned());
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug settings");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
fn debug_output_hides_key_material(release_key: NamedTempFile) {
    let settings = session_settings_from_env(&mock_env(release_vars(&release_key)), BuildMode::Release)
        .expect("valid settings");
    let rendered = format!("{settings:?}");
    assert!(rendered.contains(&fingerprint::key_fingerprint(&settings.key)));
}
