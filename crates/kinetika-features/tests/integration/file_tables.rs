//! Gates built from restriction tables on disk.

use kinetika_features::{Error, FeatureRestrictionMap};

use crate::common::{OVERLAPPING_TABLE, TableFixture, features};

#[test]
fn test_overlapping_features_are_conjunctive() {
    let gate = TableFixture::new(OVERLAPPING_TABLE).gate();

    assert!(!gate.is_permission_allowed("room.device_assign", &features(&["core.rooms"])));
    assert!(!gate.is_permission_allowed("room.device_assign", &features(&["core.ems_devices"])));
    assert!(gate.is_permission_allowed(
        "room.device_assign",
        &features(&["core.rooms", "core.ems_devices"])
    ));
    assert!(gate.is_permission_allowed("room.read", &features(&["core.rooms"])));
}

#[test]
fn test_loaded_table_has_no_builtin_entries() {
    let gate = TableFixture::new(OVERLAPPING_TABLE).gate();
    assert!(gate.is_permission_allowed("studio.create", &features(&[])));
}

#[test]
fn test_invalid_table_file_is_rejected() {
    let fixture = TableFixture::new("[[features]]\nkey = \"\"\npatterns = [\"x.*\"]\n");
    let err = FeatureRestrictionMap::from_file(&fixture.path).unwrap_err();
    assert!(matches!(err, Error::EmptyFeatureKey { index: 0 }));
}

#[test]
fn test_builtin_table_survives_file_roundtrip() {
    let builtin = FeatureRestrictionMap::builtin();
    let fixture = TableFixture::new(&builtin.to_toml_string().unwrap());
    assert_eq!(FeatureRestrictionMap::from_file(&fixture.path).unwrap(), builtin);
}

#[test]
fn test_misspelled_fields_fail_closed() {
    for content in [
        "[[features]]\nkey = \"core.multi_studio\"\npattern = [\"studio.*\"]\n",
        "[[feature]]\nkey = \"core.multi_studio\"\npatterns = [\"studio.*\"]\n",
    ] {
        let fixture = TableFixture::new(content);
        let err = FeatureRestrictionMap::from_file(&fixture.path).unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "{content}");
    }
}
