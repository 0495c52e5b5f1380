use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use filetime::{set_file_mtime, FileTime};
use patrons_api::{Announcement, ApiError, Notifier};
use patrons_core::{Config, Member, PatronStatus, Tier};
use patrons_sync::{run, SyncOptions, WriteResult};
use tempfile::TempDir;

#[derive(Default)]
struct Recorder {
    sent: RefCell<Vec<Announcement>>,
}

impl Notifier for Recorder {
    fn notify(&self, announcement: &Announcement) -> Result<(), ApiError> {
        self.sent.borrow_mut().push(announcement.clone());
        Ok(())
    }
}

struct AlwaysFails;

impl Notifier for AlwaysFails {
    fn notify(&self, _announcement: &Announcement) -> Result<(), ApiError> {
        Err(ApiError::Transport {
            url: "https://hooks.example".into(),
            message: "connection refused".into(),
        })
    }
}

fn config_in(dir: &Path) -> Config {
    Config {
        output_path: dir.join("src").join("Core").join("PatronsInit.lua"),
        github_output: Some(dir.join("gh_output")),
        ..Config::default()
    }
}

fn gold(name: &str) -> Member {
    Member::new(name, PatronStatus::Active, 500)
}

fn silver(name: &str) -> Member {
    Member::new(name, PatronStatus::Former, 0)
}

fn gh_output(config: &Config) -> String {
    fs::read_to_string(config.github_output.as_ref().unwrap()).unwrap_or_default()
}

#[test]
fn first_run_writes_but_never_announces() {
    let tmp = TempDir::new().expect("tmp");
    let config = config_in(tmp.path());
    let recorder = Recorder::default();
    let members: Vec<Member> = (0..20).map(|i| gold(&format!("P{i}"))).collect();

    let report = run(&config, &members, Some(&recorder), SyncOptions::default()).expect("run");

    assert!(matches!(report.write, WriteResult::Written { .. }));
    assert!(config.output_path.exists());
    assert!(report.announcements.is_empty());
    assert!(recorder.sent.borrow().is_empty());
    assert_eq!(
        gh_output(&config),
        "changed=true\npaying_count=20\nfollower_count=0\n"
    );

    let mut written: Vec<_> = fs::read_dir(config.output_path.parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, vec!["PatronsInit.lua"], "the document is the only file written");
}

#[test]
fn identical_roster_is_unchanged_and_untouched() {
    let tmp = TempDir::new().expect("tmp");
    let config = config_in(tmp.path());
    let members = vec![gold("Amy"), silver("Bo")];
    run(&config, &members, None, SyncOptions::default()).expect("first run");

    let old = FileTime::from_system_time(SystemTime::now() - Duration::from_secs(3600));
    set_file_mtime(&config.output_path, old).expect("set mtime");
    fs::remove_file(config.github_output.as_ref().unwrap()).expect("reset output");

    let report = run(&config, &members, None, SyncOptions::default()).expect("second run");
    assert!(matches!(report.write, WriteResult::Unchanged { .. }));
    assert_eq!(gh_output(&config), "changed=false\n");

    let mtime = FileTime::from_last_modification_time(&fs::metadata(&config.output_path).unwrap());
    assert_eq!(mtime, old, "unchanged run must not rewrite the document");
}

#[test]
fn edited_header_alone_is_not_a_change() {
    let tmp = TempDir::new().expect("tmp");
    let config = config_in(tmp.path());
    let members = vec![gold("Amy")];
    run(&config, &members, None, SyncOptions::default()).expect("first run");

    let edited = fs::read_to_string(&config.output_path)
        .unwrap()
        .replace("-- Last updated: See git commit timestamp", "-- Last updated: yesterday");
    fs::write(&config.output_path, &edited).unwrap();

    let report = run(&config, &members, None, SyncOptions::default()).expect("second run");
    assert!(!report.write.changed());
    assert_eq!(fs::read_to_string(&config.output_path).unwrap(), edited);
}

#[test]
fn new_gold_name_fires_exactly_one_announcement() {
    let tmp = TempDir::new().expect("tmp");
    let config = config_in(tmp.path());
    run(&config, &[gold("A"), gold("B")], None, SyncOptions::default()).expect("seed");

    let recorder = Recorder::default();
    let report = run(
        &config,
        &[gold("A"), gold("B"), gold("C")],
        Some(&recorder),
        SyncOptions::default(),
    )
    .expect("run");

    assert_eq!(report.notified, 1);
    let sent = recorder.sent.borrow();
    assert_eq!(
        *sent,
        vec![Announcement {
            tier: Tier::Gold,
            names: vec!["C".to_string()]
        }]
    );
}

#[test]
fn previous_names_are_read_back_from_the_document() {
    let tmp = TempDir::new().expect("tmp");
    let config = config_in(tmp.path());
    run(&config, &[gold("A"), silver("B")], None, SyncOptions::default()).expect("seed");

    let recorder = Recorder::default();
    run(
        &config,
        &[gold("A"), silver("B"), silver("D"), silver("E")],
        Some(&recorder),
        SyncOptions::default(),
    )
    .expect("run");

    let sent = recorder.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tier, Tier::Silver);
    assert_eq!(sent[0].names, vec!["D", "E"]);
}

#[test]
fn notification_failure_does_not_fail_the_run() {
    let tmp = TempDir::new().expect("tmp");
    let config = config_in(tmp.path());
    run(&config, &[gold("A")], None, SyncOptions::default()).expect("seed");

    let report = run(
        &config,
        &[gold("A"), gold("B")],
        Some(&AlwaysFails),
        SyncOptions::default(),
    )
    .expect("run must succeed despite webhook failure");

    assert!(matches!(report.write, WriteResult::Written { .. }));
    assert_eq!(report.announcements.len(), 1);
    assert_eq!(report.notified, 0);
    assert!(fs::read_to_string(&config.output_path)
        .unwrap()
        .contains("name = \"B\""));
}

#[test]
fn dry_run_touches_nothing() {
    let tmp = TempDir::new().expect("tmp");
    let config = config_in(tmp.path());
    run(&config, &[gold("A")], None, SyncOptions::default()).expect("seed");
    let before = fs::read_to_string(&config.output_path).unwrap();
    fs::remove_file(config.github_output.as_ref().unwrap()).unwrap();

    let recorder = Recorder::default();
    let report = run(
        &config,
        &[gold("A"), gold("Z")],
        Some(&recorder),
        SyncOptions {
            dry_run: true,
            notify: true,
        },
    )
    .expect("dry run");

    assert!(matches!(report.write, WriteResult::WouldWrite { .. }));
    assert_eq!(report.announcements.len(), 1, "dry run still previews new names");
    assert!(recorder.sent.borrow().is_empty());
    assert_eq!(fs::read_to_string(&config.output_path).unwrap(), before);
    assert!(!config.github_output.as_ref().unwrap().exists());
}

#[test]
fn notify_switch_off_suppresses_delivery() {
    let tmp = TempDir::new().expect("tmp");
    let config = config_in(tmp.path());
    run(&config, &[gold("A")], None, SyncOptions::default()).expect("seed");

    let recorder = Recorder::default();
    let report = run(
        &config,
        &[gold("A"), gold("B")],
        Some(&recorder),
        SyncOptions {
            dry_run: false,
            notify: false,
        },
    )
    .expect("run");
    assert_eq!(report.notified, 0);
    assert!(recorder.sent.borrow().is_empty());
}
