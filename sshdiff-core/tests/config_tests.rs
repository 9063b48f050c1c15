//! Host-profile config loading and error-message tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use sshdiff_core::{config, ConfigError};
use std::path::PathBuf;

#[test]
fn full_profile_roundtrips_every_field() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".sshdiff/hosts.yaml")
        .write_str(
            "hosts:\n\
             \x20 web1:\n\
             \x20   address: web1.example.com\n\
             \x20   port: 2222\n\
             \x20   username: deploy\n\
             \x20   private_key: /keys/id_ed25519\n\
             \x20   public_key: /keys/id_ed25519.pub\n\
             \x20   remote_root: /var/www/site\n",
        )
        .expect("write config");

    let loaded = config::load_at(home.path()).expect("load");
    let web1 = loaded.profile("web1").expect("profile");
    assert_eq!(web1.address.as_deref(), Some("web1.example.com"));
    assert_eq!(web1.port, Some(2222));
    assert_eq!(web1.username.as_deref(), Some("deploy"));
    assert_eq!(web1.private_key, Some(PathBuf::from("/keys/id_ed25519")));
    assert_eq!(web1.public_key, Some(PathBuf::from("/keys/id_ed25519.pub")));
    assert_eq!(web1.remote_root.as_deref(), Some("/var/www/site"));
}

#[test]
fn corrupt_yaml_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".sshdiff/hosts.yaml")
        .write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write config");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("hosts.yaml"));
}

#[test]
fn unknown_profile_field_is_rejected() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".sshdiff/hosts.yaml")
        .write_str("hosts:\n  web1:\n    adress: typo.example.com\n")
        .expect("write config");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn loading_never_creates_the_config_dir() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    config::load_at(home.path()).expect("load");
    home.child(".sshdiff").assert(predicate::path::missing());
}
