use std::collections::HashSet;

use utf8sys::{
    compat,
    config::AdapterConfig,
    env,
    fs::{self, LockMode},
    theme::{FixedPreference, NoPreference, ThemePreference},
    Adapter, ErrorKind,
};

fn adapter() -> Adapter {
    Adapter::with_preference_source(AdapterConfig::default(), Box::new(NoPreference))
}

fn scratch() -> (tempfile::TempDir, String) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let base = tmp.path().to_str().expect("utf8 temp path").to_owned();
    (tmp, base)
}

#[test]
fn open_write_close_then_read_back() {
    let (_tmp, base) = scratch();
    let a = adapter();
    let path = format!("{base}/roundtrip.bin");
    let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();

    let mut f = compat::open(&a, &path, "w", false);
    let mut written = 0;
    while written < payload.len() {
        let n = compat::write(
            &payload[written..],
            payload.len() - written,
            f.as_mut().expect("open for write"),
        );
        assert!(n > 0, "write made no progress");
        written += n;
    }
    compat::close(&mut f, false);
    assert!(f.is_none());

    let mut f = a.open(&path, "rb", LockMode::None).expect("open for read");
    let mut back = Vec::new();
    f.read_to_end(&mut back).expect("read");
    assert_eq!(back, payload);
}

#[test]
fn open_in_missing_directory_fails_cleanly() {
    let (_tmp, base) = scratch();
    let a = adapter();
    let path = format!("{base}/no/such/dir/file.txt");

    assert!(compat::open(&a, &path, "w", false).is_none());
    let err = a.open(&path, "w", LockMode::None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn env_unset_then_set() {
    let name = "UTF8SYS_IT_ENV";
    let mut value = String::new();
    assert!(!compat::get_env(name, &mut value));
    assert!(value.is_empty());

    assert!(compat::set_env(name, "v1"));
    assert!(compat::get_env(name, &mut value));
    assert_eq!(value, "v1");
}

#[test]
fn readdir_yields_each_entry_once_then_one_terminal() {
    let (_tmp, base) = scratch();
    let a = adapter();
    let names = ["one", "two", "three", "vier-ü", "五"];
    for n in names {
        std::fs::write(format!("{base}/{n}"), n).expect("seed");
    }

    let mut dir = compat::opendir(&a, &base);
    let handle = dir.as_mut().expect("opendir");
    let mut seen = HashSet::new();
    loop {
        let entry = compat::readdir(handle);
        if !entry.found {
            assert_eq!(entry.name, "");
            break;
        }
        assert!(seen.insert(entry.name));
    }
    assert_eq!(seen.len(), names.len());
    for n in names {
        assert!(seen.contains(n), "{n} missing");
    }
    assert!(!compat::readdir(handle).found);

    compat::closedir(&mut dir);
    assert!(dir.is_none());
}

#[test]
fn remove_missing_then_existing() {
    let (_tmp, base) = scratch();
    let path = format!("{base}/victim");

    assert!(!compat::remove(&path));
    std::fs::write(&path, b"x").expect("seed");
    assert!(compat::remove(&path));

    let mut st = fs::FileStat::default();
    assert_eq!(compat::stat(&path, &mut st), -1);
    assert_eq!(fs::stat(&path).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn dark_mode_never_fails() {
    let sources: [Box<dyn utf8sys::theme::PreferenceSource + Send + Sync>; 4] = [
        Box::new(NoPreference),
        Box::new(FixedPreference(ThemePreference::Unknown)),
        Box::new(FixedPreference(ThemePreference::Light)),
        utf8sys::theme::system_preference_source(),
    ];
    for src in sources {
        let a = Adapter::with_preference_source(AdapterConfig::default(), src);
        let theme = compat::get_default_theme(&a);
        assert_eq!(compat::is_dark_mode(&a), theme == "dark");
    }
    assert!(!compat::is_dark_mode(&adapter()));
}

#[test]
fn non_ascii_names_and_values_survive() {
    let (_tmp, base) = scratch();
    let a = adapter();
    let name = "Ünïcödé — 日本語 😀.txt";
    let path = format!("{base}/{name}");
    let text = "κόσμε · мир · 世界";

    let mut f = a.open(&path, "w", LockMode::None).expect("create");
    f.write_all(text.as_bytes()).expect("write");
    f.close(false).expect("close");

    let listed: Vec<String> = fs::open_dir(&base)
        .expect("opendir")
        .collect::<Result<_, _>>()
        .expect("readdir");
    assert_eq!(listed, vec![name.to_owned()]);

    let mut f = a.open(&path, "r", LockMode::None).expect("reopen");
    assert_eq!(f.read_to_string().expect("read"), text);

    env::set_env("UTF8SYS_IT_UNICODE", text).expect("setenv");
    assert_eq!(
        env::get_env("UTF8SYS_IT_UNICODE").expect("getenv").as_deref(),
        Some(text)
    );
}

#[test]
fn lock_contention_and_release() {
    let (_tmp, base) = scratch();
    let a = adapter();
    let path = format!("{base}/locked");

    let mut first = compat::open(&a, &path, "w", true);
    assert!(first.is_some());
    assert!(compat::open(&a, &path, "r", true).is_none());

    compat::close(&mut first, true);
    let mut second = compat::open(&a, &path, "r", true);
    assert!(second.is_some());
    compat::close(&mut second, true);
}

#[test]
fn stdout_write_returns_requested_size() {
    let a = adapter();
    let mut out = a.stdout();
    let msg = "console ✓\n";
    assert_eq!(out.write(msg.as_bytes()).expect("write"), msg.len());
    assert_eq!(compat::write(msg.as_bytes(), msg.len(), &mut out), msg.len());
}
