use chrono::NaiveDate;
use std::fs;
use texnotes_core::{create_entry, init_project, project_status, NotesError, ProjectLayout};

#[test]
fn status_lists_references_in_order_and_orphans() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let creator = dir.path().join("creator");
    fs::write(&creator, b"creator").expect("fake entry creator should be written");
    let layout = ProjectLayout::default();
    let project = init_project(dir.path(), "research", &creator, &layout, |_| {})
        .expect("project init should succeed")
        .project_dir;

    for day in [5, 6] {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        create_entry(&project, date, &layout, |_| {}).unwrap();
    }
    fs::remove_file(project.join("entry-20240306.tex")).unwrap();
    fs::write(project.join("entry-20240307.tex"), "\\section20240307\n\n").unwrap();
    fs::write(project.join("notes.txt"), "ignored").unwrap();

    let status = project_status(&project, &layout).unwrap();

    let names: Vec<&str> = status
        .registered
        .iter()
        .map(|entry| entry.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["entry-20240305.tex", "entry-20240306.tex"]);
    assert!(status.registered[0].exists);
    assert!(!status.registered[1].exists);
    assert_eq!(
        status.registered[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 5)
    );
    assert_eq!(status.unregistered, vec!["entry-20240307.tex".to_string()]);

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["registered"][0]["date"], "2024-03-05");
    assert_eq!(json["unregistered"][0], "entry-20240307.tex");
}

#[test]
fn status_of_plain_directory_reports_missing_master() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let err = project_status(dir.path(), &ProjectLayout::default()).unwrap_err();
    assert!(matches!(err, NotesError::MissingMaster(_)));
}
