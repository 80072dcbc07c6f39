//! Integration tests for the part fetcher.
//!
//! Exercises the real async path with local files; URL fetches share the
//! same channel plumbing and are covered by the error-path test shape.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use whiplab_viewer_lib::fetch::{FetchedPart, PartFetcher, PartSource};
use whiplab_viewer_lib::fixtures::{binary_stl, unit_triangle};
use whiplab_viewer_lib::harness::ViewerHarness;

fn poll_until_done(fetcher: &mut PartFetcher) -> FetchedPart {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(fetched) = fetcher.poll() {
            return fetched;
        }
        assert!(Instant::now() < deadline, "fetch did not complete in time");
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn temp_part_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("whiplab-test-{}-{name}", std::process::id()))
}

#[test]
fn test_fetch_local_file_and_load() {
    let bytes = binary_stl(b"fixture", &[unit_triangle(), unit_triangle()]);
    let path = temp_part_path("bracket.stl");
    std::fs::write(&path, &bytes).unwrap();

    let mut fetcher = PartFetcher::new();
    fetcher.request(PartSource::File(path.clone()));

    let fetched = poll_until_done(&mut fetcher);
    assert_eq!(fetched.source, PartSource::File(path.clone()));
    assert_eq!(fetched.result.as_deref().unwrap(), bytes.as_slice());

    // Feed the fetched bytes through the session, as the app does per frame
    let mut h = ViewerHarness::new();
    h.session.begin_load(fetched.source);
    h.session.finish_load(&fetched.result.unwrap());
    assert!(h.status().is_ready());
    assert_eq!(h.triangle_count(), 2);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_fetch_missing_file_reports_error() {
    let mut fetcher = PartFetcher::new();
    fetcher.request(PartSource::File(temp_part_path("does-not-exist.stl")));

    let fetched = poll_until_done(&mut fetcher);
    let err = fetched.result.unwrap_err();
    assert!(err.contains("could not read"), "unexpected error: {err}");

    // The session converts a fetch failure into the error status
    let mut h = ViewerHarness::new();
    h.session.begin_load(PartSource::parse("missing.stl"));
    h.session.fail_load(err);
    assert!(h.status().error().is_some());
}

#[test]
fn test_multiple_requests_all_complete() {
    let bytes = binary_stl(b"", &[unit_triangle()]);
    let path_a = temp_part_path("a.stl");
    let path_b = temp_part_path("b.stl");
    std::fs::write(&path_a, &bytes).unwrap();
    std::fs::write(&path_b, &bytes).unwrap();

    // Opening a second part does not cancel the first fetch; both arrive
    // and the mesh slot is last-writer-wins at the session level.
    let mut fetcher = PartFetcher::new();
    fetcher.request(PartSource::File(path_a.clone()));
    fetcher.request(PartSource::File(path_b.clone()));

    let first = poll_until_done(&mut fetcher);
    let second = poll_until_done(&mut fetcher);
    assert!(first.result.is_ok());
    assert!(second.result.is_ok());

    let mut sources = vec![first.source, second.source];
    sources.sort_by_key(|s| s.to_string());
    let mut expected = vec![
        PartSource::File(path_a.clone()),
        PartSource::File(path_b.clone()),
    ];
    expected.sort_by_key(|s| s.to_string());
    assert_eq!(sources, expected);

    let _ = std::fs::remove_file(&path_a);
    let _ = std::fs::remove_file(&path_b);
}
