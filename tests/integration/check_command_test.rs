// `m3uc check` end to end: real HTTP probes, real files

use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

use m3uc::commands::check::{run, CheckRequest};
use m3uc::core::config::CheckOptions;
use m3uc::core::writer::backup_path;
use tempfile::tempdir;
use tokio::runtime::Runtime;

use super::support::{spawn_server, stream_routes};

fn start_server() -> (Runtime, SocketAddr) {
    let runtime = Runtime::new().unwrap();
    let addr = runtime.block_on(spawn_server(Duration::ZERO, stream_routes));
    (runtime, addr)
}

fn playlist(addr: SocketAddr) -> String {
    format!(
        "#EXTM3U\n\
         #EXTINF:-1 group-title=\"News\",Alive\n\
         http://{addr}/live/alive.m3u8\n\
         #EXTINF:-1 group-title=\"News\",Dead\n\
         http://{addr}/dead.m3u8\n\
         #EXTINF:-1,Typo\n\
         httpsG://{addr}/typo.m3u8\n",
        addr = addr
    )
}

fn options() -> CheckOptions {
    CheckOptions::default()
        .with_timeout_secs(Some(5))
        .unwrap()
        .with_workers(Some(2))
        .unwrap()
}

#[test]
fn test_default_mode_writes_notworking_file_only() {
    let (_server, addr) = start_server();
    let dir = tempdir().unwrap();
    let file = dir.path().join("channels.m3u");
    let original = playlist(addr);
    fs::write(&file, &original).unwrap();

    let mut request = CheckRequest::new(&file, options());
    request.quiet = true;
    let (check, outputs) = run(&request).unwrap();

    let summary = check.report.summary();
    assert_eq!((summary.working, summary.failed, summary.invalid), (1, 1, 1));

    assert_eq!(fs::read_to_string(&file).unwrap(), original);
    assert!(!dir.path().join("channels_working.m3u").exists());

    let notworking = dir.path().join("channels_notworking.m3u");
    assert_eq!(outputs.notworking_file.as_deref(), Some(notworking.as_path()));
    let removed = fs::read_to_string(&notworking).unwrap();
    assert!(removed.contains("# ERROR: HTTP 404 | Original Line: 5"));
    assert!(!removed.contains("Alive"));
}

#[test]
fn test_split_and_report() {
    let (_server, addr) = start_server();
    let dir = tempdir().unwrap();
    let file = dir.path().join("channels.m3u");
    fs::write(&file, playlist(addr)).unwrap();

    let mut request = CheckRequest::new(&file, options());
    request.quiet = true;
    request.split = true;
    request.report_file = Some(dir.path().join("report.txt"));
    let (_, outputs) = run(&request).unwrap();

    let working = fs::read_to_string(outputs.working_file.unwrap()).unwrap();
    assert!(working.starts_with("#EXTM3U\n"));
    assert!(working.contains("Alive"));
    assert!(!working.contains("Dead"));
    assert!(!working.contains("Typo"));

    let notworking = fs::read_to_string(outputs.notworking_file.unwrap()).unwrap();
    assert!(notworking.contains("(failed: 1 | invalid: 1)"));
    assert!(notworking.contains("# ERROR: Malformed scheme 'httpsG' | Original Line: 7"));

    let report = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(report.starts_with("M3U Stream Test Report\n"));
    assert!(report.contains("WORKING STREAMS (1)"));
    assert!(report.contains("FAILED STREAMS (1)"));
    assert!(report.contains("INVALID URLs (1)"));
}

#[test]
fn test_update_original_with_backup() {
    let (_server, addr) = start_server();
    let dir = tempdir().unwrap();
    let file = dir.path().join("channels.m3u");
    let original = playlist(addr);
    fs::write(&file, &original).unwrap();

    let mut request = CheckRequest::new(&file, options());
    request.quiet = true;
    request.update_original = true;
    let (_, outputs) = run(&request).unwrap();

    assert!(outputs.updated_original);
    assert_eq!(outputs.backup_file, Some(backup_path(&file)));
    assert_eq!(fs::read_to_string(backup_path(&file)).unwrap(), original);

    let updated = fs::read_to_string(&file).unwrap();
    assert_eq!(
        updated,
        format!(
            "#EXTM3U\n#EXTINF:-1 group-title=\"News\",Alive\nhttp://{}/live/alive.m3u8\n",
            addr
        )
    );
}

#[test]
fn test_failed_backup_leaves_original_untouched() {
    let (_server, addr) = start_server();
    let dir = tempdir().unwrap();
    let file = dir.path().join("channels.m3u");
    let original = playlist(addr);
    fs::write(&file, &original).unwrap();
    fs::create_dir(backup_path(&file)).unwrap();

    let mut request = CheckRequest::new(&file, options());
    request.quiet = true;
    request.update_original = true;

    assert!(run(&request).is_err());
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn test_update_original_without_backup() {
    let (_server, addr) = start_server();
    let dir = tempdir().unwrap();
    let file = dir.path().join("channels.m3u");
    fs::write(&file, playlist(addr)).unwrap();

    let mut request = CheckRequest::new(&file, options());
    request.quiet = true;
    request.update_original = true;
    request.backup = false;
    let (_, outputs) = run(&request).unwrap();

    assert_eq!(outputs.backup_file, None);
    assert!(!backup_path(&file).exists());
    assert!(!fs::read_to_string(&file).unwrap().contains("Dead"));
}

#[test]
fn test_missing_file_and_empty_playlist_are_errors() {
    let dir = tempdir().unwrap();

    let missing = CheckRequest::new(dir.path().join("nope.m3u"), options());
    assert!(run(&missing).is_err());

    let empty = dir.path().join("empty.m3u");
    fs::write(&empty, "#EXTM3U\n# nothing here\n").unwrap();
    let err = run(&CheckRequest::new(&empty, options())).unwrap_err();
    assert!(err.to_string().starts_with("No playlist entries found in"));
    assert!(!dir.path().join("empty_notworking.m3u").exists());
}

#[test]
fn test_default_mode_with_only_invalid_entries_writes_no_notworking_file() {
    let (_server, addr) = start_server();
    let dir = tempdir().unwrap();
    let file = dir.path().join("channels.m3u");
    let original = format!(
        "#EXTM3U\n#EXTINF:-1,Alive\nhttp://{addr}/live/a.m3u8\n#EXTINF:-1,Typo\nhttpsG://{addr}/b.m3u8\n",
        addr = addr
    );
    fs::write(&file, &original).unwrap();

    let mut request = CheckRequest::new(&file, options());
    request.quiet = true;
    let (check, outputs) = run(&request).unwrap();

    assert_eq!(check.report.summary().invalid, 1);
    assert_eq!(outputs.notworking_file, None);
    assert!(!dir.path().join("channels_notworking.m3u").exists());
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}
