use jetlag_core::{Catalog, CatalogError, Coordinate, GroupDirectory, UNKNOWN_GROUP};
use std::io::Write;
use tempfile::NamedTempFile;

const DATA: &str = r#"[
    {
        "publishedAt": "2024-03-02T17:00:00Z",
        "title": "We Played Hide And Seek Across Japan",
        "videoId": "jp01",
        "location": "Shibuya Crossing, Tokyo, Japan",
        "geocode": [35.6595, 139.7005],
        "playlist": "s12",
        "marked": true
    },
    {
        "publishedAt": "2023-06-10T17:00:00Z",
        "title": "Behind The Scenes",
        "videoId": "bts1",
        "location": "no location found",
        "geocode": null,
        "playlist": "s12",
        "marked": false
    },
    {
        "title": "Geocoder Gave Up",
        "videoId": "zero",
        "geocode": [0, 0],
        "playlist": "s5"
    },
    {
        "title": "Empty Geocode",
        "videoId": "empty",
        "geocode": []
    },
    {
        "title": "Bonus Round",
        "videoId": "bonus",
        "geocode": [46.5197, 6.6323],
        "playlist": "extra"
    },
    {
        "title": "Duplicate Upload",
        "videoId": "jp01",
        "geocode": [1.0, 1.0],
        "playlist": "s1"
    }
]"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_site_data() {
    let file = write_temp(DATA);
    let catalog = Catalog::load(file.path(), GroupDirectory::default()).unwrap();

    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.placeable_count(), 2);

    let jp = catalog.get("jp01").unwrap();
    assert_eq!(jp.title, "We Played Hide And Seek Across Japan");
    assert_eq!(jp.group_key, "s12");
    assert_eq!(jp.group_label, "Hide + Seek: Japan");
    assert_eq!(jp.coordinate, Some(Coordinate { lat: 35.6595, lng: 139.7005 }));
    assert_eq!(jp.published_at.as_deref(), Some("2024-03-02T17:00:00Z"));
    assert_eq!(jp.location.as_deref(), Some("Shibuya Crossing, Tokyo, Japan"));
}

#[test]
fn test_unusable_geocodes_become_none() {
    let catalog = Catalog::from_json_str(DATA, GroupDirectory::default()).unwrap();
    assert_eq!(catalog.get("bts1").unwrap().coordinate, None);
    assert_eq!(catalog.get("zero").unwrap().coordinate, None);
    assert_eq!(catalog.get("empty").unwrap().coordinate, None);
}

#[test]
fn test_group_labels_resolve() {
    let catalog = Catalog::from_json_str(DATA, GroupDirectory::default()).unwrap();
    assert_eq!(catalog.get("zero").unwrap().group_label, "Race to the End of the World");
    assert_eq!(catalog.get("bonus").unwrap().group_label, "extra");

    let empty = catalog.get("empty").unwrap();
    assert_eq!(empty.group_key, UNKNOWN_GROUP);
    assert_eq!(empty.group_label, "Unknown");
}

#[test]
fn test_duplicate_ids_keep_first() {
    let catalog = Catalog::from_json_str(DATA, GroupDirectory::default()).unwrap();
    let ids: Vec<_> = catalog.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["jp01", "bts1", "zero", "empty", "bonus"]);
    assert_eq!(catalog.get("jp01").unwrap().group_key, "s12");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = Catalog::load(&dir.path().join("data.json"), GroupDirectory::default());
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let file = write_temp("{\"not\": \"a list\"}");
    let result = Catalog::load(file.path(), GroupDirectory::default());
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}
