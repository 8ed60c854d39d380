use std::fs;

use repobind::{
    identity::{ConsumerIdentity, IdentityFile, IdentitySource},
    Error,
};
use tempfile::tempdir;

#[test]
fn missing_file_means_not_registered() -> repobind::Result<()> {
    let dir = tempdir()?;
    let file = IdentityFile::new(dir.path().join("consumer.json"));

    assert_eq!(None, file.load_consumer_id()?);
    Ok(())
}

#[test]
fn saves_and_reloads_json_identity() -> repobind::Result<()> {
    let dir = tempdir()?;
    let file = IdentityFile::new(dir.path().join("nested").join("consumer.json"));

    file.save(&ConsumerIdentity::new("c1"))?;

    assert_eq!(Some(ConsumerIdentity::new("c1")), file.load()?);
    assert_eq!(Some("c1".to_string()), file.load_consumer_id()?);
    Ok(())
}

#[test]
fn reads_plain_text_and_ignores_extra_json_fields() -> repobind::Result<()> {
    let dir = tempdir()?;

    let plain = dir.path().join("consumer.id");
    fs::write(&plain, "\nc1\n")?;
    assert_eq!(
        Some("c1".to_string()),
        IdentityFile::new(&plain).load_consumer_id()?
    );

    let json = dir.path().join("consumer.json");
    fs::write(&json, r#"{"consumer_id": "c2", "registered": "2012-05-01"}"#)?;
    assert_eq!(
        Some("c2".to_string()),
        IdentityFile::new(&json).load_consumer_id()?
    );
    Ok(())
}

#[test]
fn empty_file_means_not_registered() -> repobind::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("consumer.json");
    fs::write(&path, "  \n")?;

    assert_eq!(None, IdentityFile::new(&path).load_consumer_id()?);
    Ok(())
}

#[test]
fn malformed_json_is_reported_with_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("consumer.json");
    fs::write(&path, "{ not json").unwrap();

    let err = IdentityFile::new(&path)
        .load_consumer_id()
        .expect_err("malformed identity must fail");
    match err.downcast_ref::<Error>() {
        Some(Error::InvalidIdentity { path: reported, .. }) => assert_eq!(&path, reported),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn directory_in_place_of_file_is_an_io_error() {
    let dir = tempdir().unwrap();

    let err = IdentityFile::new(dir.path())
        .load_consumer_id()
        .expect_err("directory is not an identity file");
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Io(_))));
}
