//! Error handling tests

use complaint_form::config::Config;
use complaint_form::error::ComplaintError;
use complaint_form::mailer::SendFailure;
use complaint_form::photos;
use complaint_form_common::{FieldUpdate, FormState, RequiredField, ValidationIssue};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn test_collect_photos_missing_folder() {
    let result = photos::collect_photos(&[], Some(Path::new("/nonexistent/path/12345")));
    assert!(matches!(result, Err(ComplaintError::FolderNotFound(_))));
}

#[test]
fn test_collect_photos_unsupported_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let result = photos::collect_photos(&[path], None);
    assert!(matches!(result, Err(ComplaintError::UnsupportedPhoto(_))));
}

#[test]
fn test_collect_photos_files_then_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let single = dir.path().join("z.png");
    std::fs::write(&single, b"png").unwrap();
    let folder = dir.path().join("fotky");
    std::fs::create_dir(&folder).unwrap();
    std::fs::write(folder.join("b.jpg"), b"b").unwrap();
    std::fs::write(folder.join("a.jpg"), b"a").unwrap();

    let photos = photos::collect_photos(&[single], Some(&folder)).unwrap();
    let names: Vec<&str> = photos.iter().map(|p| p.file_name.as_str()).collect();
    assert_eq!(names, vec!["z.png", "a.jpg", "b.jpg"]);
}

#[test]
fn test_invalid_config_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ComplaintError::JsonParse(_))));
}

#[test]
fn test_config_round_trip_on_disk() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.emailjs.service_id = "service_disk".into();
    config.attach_photos = true;
    config.font_path = Some(PathBuf::from("/usr/share/fonts/DejaVuSans.ttf"));
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.emailjs.service_id, "service_disk");
    assert!(loaded.attach_photos);
    assert_eq!(loaded.font_path, config.font_path);
}

#[test]
fn test_missing_config_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("none.json")).unwrap();
    assert!(!config.emailjs.is_configured());
}

#[test]
fn test_send_failure_conversion() {
    let failure = SendFailure {
        status: None,
        text: "connection refused".into(),
    };
    let err: ComplaintError = failure.into();

    assert!(matches!(err, ComplaintError::Send(_)));
    assert_eq!(err.to_string(), "Chyba při odesílání: connection refused");
}

#[test]
fn test_invalid_form_conversion() {
    let form = FormState::now().apply(FieldUpdate::FirstName("Jan".into()));
    let err: ComplaintError = form.ensure_valid().unwrap_err().into();

    match &err {
        ComplaintError::Common(complaint_form_common::Error::Invalid(issues)) => {
            assert!(issues.contains(&ValidationIssue::Missing(RequiredField::LastName)));
            assert!(!issues.contains(&ValidationIssue::Missing(RequiredField::FirstName)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().starts_with("Formulář není vyplněn správně"));
}

#[test]
fn test_user_notice_for_other_errors() {
    let err = ComplaintError::Encoding("worker panicked".into());
    assert_eq!(err.user_notice(), "Chyba při odesílání: Chyba kódování přílohy: worker panicked");

    let err = ComplaintError::SubmissionInFlight;
    assert_eq!(
        err.user_notice(),
        "Chyba při odesílání: Odesílání již probíhá, počkejte na dokončení"
    );
}
