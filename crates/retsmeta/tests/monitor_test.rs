use std::fs::{self, File};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use retsmeta::config::{CheckOutcome, ConfigChangeListener, ConfigChangedMonitor, FileConfigDao};
use retsmeta::test_utils::RecordingListener;
use tempfile::TempDir;

fn touch(path: &std::path::Path, at: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(at)
        .unwrap();
}

#[test]
fn test_file_change_notifies_listeners() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("retsmeta.toml");
    fs::write(&path, "format = \"COMPACT\"\n").unwrap();
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    touch(&path, start);

    let monitor = ConfigChangedMonitor::new(Arc::new(FileConfigDao::new(&path)));
    let first = RecordingListener::new();
    let second = RecordingListener::new();
    monitor.add_listener(first.clone());
    monitor.add_listener(second.clone());

    assert!(matches!(monitor.check(), CheckOutcome::Baseline(_)));
    assert_eq!(monitor.check(), CheckOutcome::Unchanged);

    touch(&path, start + Duration::from_secs(30));
    assert!(matches!(monitor.check(), CheckOutcome::Changed(_)));
    assert_eq!(first.seen().len(), 1);
    assert_eq!(second.seen(), first.seen());

    // going back in time is not a change
    touch(&path, start);
    assert_eq!(monitor.check(), CheckOutcome::Unchanged);
    assert_eq!(first.seen().len(), 1);
}

#[test]
fn test_missing_file_is_survivable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("retsmeta.toml");
    fs::write(&path, "").unwrap();
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(2_000_000);
    touch(&path, start);

    let monitor = ConfigChangedMonitor::new(Arc::new(FileConfigDao::new(&path)));
    let listener = RecordingListener::new();
    monitor.add_listener(listener.clone());
    monitor.check();

    fs::remove_file(&path).unwrap();
    assert_eq!(monitor.check(), CheckOutcome::Failed);

    fs::write(&path, "").unwrap();
    touch(&path, start + Duration::from_secs(1));
    assert!(matches!(monitor.check(), CheckOutcome::Changed(_)));
    assert_eq!(listener.seen().len(), 1);
}

#[test]
fn test_removed_listener_is_not_notified() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("retsmeta.toml");
    fs::write(&path, "").unwrap();
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(3_000_000);
    touch(&path, start);

    let monitor = ConfigChangedMonitor::new(Arc::new(FileConfigDao::new(&path)));
    let kept = RecordingListener::new();
    let removed = RecordingListener::new();
    let removed_handle: Arc<dyn ConfigChangeListener> = removed.clone();
    monitor.add_listener(kept.clone());
    monitor.add_listener(Arc::clone(&removed_handle));
    assert!(monitor.remove_listener(&removed_handle));

    monitor.check();
    touch(&path, start + Duration::from_secs(1));
    monitor.check();
    assert_eq!(kept.seen().len(), 1);
    assert!(removed.seen().is_empty());
}

#[test]
fn test_panicking_listener_is_isolated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("retsmeta.toml");
    fs::write(&path, "").unwrap();
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(4_000_000);
    touch(&path, start);

    let monitor = ConfigChangedMonitor::new(Arc::new(FileConfigDao::new(&path)));
    monitor.add_listener(Arc::new(|_at: chrono::DateTime<chrono::Utc>| {
        panic!("listener blew up")
    }));
    let later = RecordingListener::new();
    monitor.add_listener(later.clone());
    monitor.check();

    touch(&path, start + Duration::from_secs(1));
    assert!(matches!(monitor.check(), CheckOutcome::Changed(_)));
    touch(&path, start + Duration::from_secs(2));
    assert!(matches!(monitor.check(), CheckOutcome::Changed(_)));
    assert_eq!(later.seen().len(), 2);
}
