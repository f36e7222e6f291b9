// JSON folder -> playlist file -> parser

use std::fs;

use m3uc::commands::convert::convert;
use m3uc::core::playlist::parse;
use tempfile::tempdir;

#[test]
fn test_convert_folder_to_playlist() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("json");
    fs::create_dir(&json).unwrap();

    fs::write(
        json.join("a.json"),
        r#"{ "result": [
            { "name": "Sport 24", "href": "http://s.example/24.m3u8", "epg_id": "s24" },
            { "name": "Daily News", "href": "http://n.example/daily.m3u8" }
        ] }"#,
    )
    .unwrap();
    fs::write(
        json.join("b.json"),
        r#"{ "result": [
            { "name": "Daily News", "href": "http://n.example/mirror.m3u8" },
            { "name": "Kitchen", "href": "http://g.example/k.m3u8" }
        ] }"#,
    )
    .unwrap();
    fs::write(json.join("broken.json"), "{ not json").unwrap();
    fs::write(json.join("notes.txt"), "ignored").unwrap();

    let output = dir.path().join("from_json.m3u");
    let converter = convert(&json, &output).unwrap();

    assert_eq!(converter.files_read(), 2);
    assert_eq!(converter.channels().len(), 3);
    assert_eq!(converter.duplicates_removed(), 1);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("#EXTM3U\n"));
    assert!(text.contains("# Duplicates Removed: 1"));

    let entries = parse(&text, "from_json.m3u").unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.display_name.as_str()).collect();
    assert_eq!(names, vec!["Sport 24", "Daily News", "Kitchen"]);
    assert_eq!(entries[0].group.as_deref(), Some("Sports"));
    assert_eq!(entries[2].group.as_deref(), Some("General"));
}

#[test]
fn test_convert_without_json_files_fails() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.m3u");

    assert!(convert(dir.path(), &output).is_err());
    assert!(!output.exists());
}

#[test]
fn test_convert_without_channels_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("empty.json"),
        r#"{ "result": [ { "name": "No Url" }, { "name": "Blank", "href": "  " } ] }"#,
    )
    .unwrap();
    let output = dir.path().join("out.m3u");

    let err = convert(dir.path(), &output).unwrap_err();
    assert!(err.to_string().starts_with("No channels to save!"));
    assert!(!output.exists());
}
