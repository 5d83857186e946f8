use spotidal::{
    MigrationError,
    management::{DEFAULT_LIBRARY_FILE, LibraryManager, NotFoundReport, default_library_path},
    types::{Playlist, Track},
};

fn sample() -> Vec<Playlist> {
    vec![
        Playlist {
            name: "Road Trip".to_string(),
            tracks: vec![
                Track::new("Song A", &["Artist X"]),
                Track::new("Song B", &["Artist Y", "Artist Z"]),
            ],
        },
        Playlist {
            name: "Empty".to_string(),
            tracks: vec![],
        },
    ]
}

#[tokio::test]
async fn test_persist_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("playlists.json");

    let manager = LibraryManager::new(sample());
    manager.persist(&path).await.unwrap();

    let loaded = LibraryManager::load(&path).await.unwrap();
    assert_eq!(loaded.playlists(), sample().as_slice());
    assert_eq!(loaded.count_playlists(), 2);
    assert_eq!(loaded.count_tracks(), 2);
}

#[tokio::test]
async fn test_document_uses_export_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playlists.json");

    LibraryManager::new(sample()).persist(&path).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json[0]["playlist_name"], "Road Trip");
    assert_eq!(json[0]["tracks"][1]["track_name"], "Song B");
    assert_eq!(json[0]["tracks"][1]["artist_name"][1]["name"], "Artist Z");
}

#[tokio::test]
async fn test_load_ignores_extra_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playlists.json");
    std::fs::write(
        &path,
        r#"[{"playlist_name":"P","owner":"me","tracks":[{"track_name":"T","id":"x","artist_name":[{"name":"A","uri":"u"}]}]}]"#,
    )
    .unwrap();

    let loaded = LibraryManager::load(&path).await.unwrap();
    assert_eq!(
        loaded.into_playlists(),
        vec![Playlist {
            name: "P".to_string(),
            tracks: vec![Track::new("T", &["A"])],
        }]
    );
}

#[tokio::test]
async fn test_load_rejects_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playlists.json");
    std::fs::write(&path, r#"[{"playlist_name":"P","tracks":[{"track_name":"T"}]}]"#).unwrap();

    let err = LibraryManager::load(&path).await.err().unwrap();
    assert!(matches!(err, MigrationError::Parse { .. }));
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = LibraryManager::load(&dir.path().join("nope.json"))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, MigrationError::Io { .. }));
}

#[tokio::test]
async fn test_report_appends_to_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tidal_not_found.txt");
    std::fs::write(&path, "In playlist Old: Song by Someone\n").unwrap();

    let mut report = NotFoundReport::new(&path);
    report
        .append("Road Trip", &Track::new("Song B", &["Artist Y"]))
        .await
        .unwrap();

    assert_eq!(report.written(), 1);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "In playlist Old: Song by Someone\nIn playlist Road Trip: Song B by Artist Y\n"
    );
}

#[test]
fn test_default_library_path() {
    assert_eq!(default_library_path(), std::path::PathBuf::from(DEFAULT_LIBRARY_FILE));
    assert_eq!(DEFAULT_LIBRARY_FILE, "playlists.json");
}
