// crates/mamori/tests/fixtures/dash/*.mpd

use chrono::TimeDelta;
use mamori::{manifest, ManifestError, TransferFormat};

use crate::{fake::epoch, AssertWrapper};

const REFERENCE: &str = "2018-12-13T11:00:00Z";

#[test]
fn sliding_window() -> anyhow::Result<()> {
    crate::init_tracing();

    let data = include_str!("../fixtures/dash/sliding.mpd");
    let window = manifest::parse(data, TransferFormat::Dash, epoch(REFERENCE)).assert_success();

    // one segment is 768 / 200 = 3.84 seconds
    assert_eq!(window.window_end_time(), epoch("2018-12-13T10:59:56.160Z"));
    assert_eq!(window.window_start_time(), epoch("2018-12-13T08:59:56.160Z"));
    assert_eq!(
        window.window_end_time() - window.window_start_time(),
        TimeDelta::hours(2)
    );
    assert_eq!(window.end_ms() - window.start_ms(), 7_200_000);
    assert_eq!(window.time_correction(), window.start_ms() as f64 / 1000.);
    assert!(window.is_sliding());

    Ok(())
}

#[test]
fn sliding_window_follows_reference() -> anyhow::Result<()> {
    let data = include_str!("../fixtures/dash/sliding.mpd");
    let earlier = manifest::parse_dash(data, epoch(REFERENCE))?;
    let later = manifest::parse_dash(data, epoch("2018-12-13T11:00:10Z"))?;

    assert_eq!(later.start_ms() - earlier.start_ms(), 10_000);
    assert_eq!(later.length_seconds(), earlier.length_seconds());
    assert!((later.time_correction() - earlier.time_correction() - 10.).abs() < 1e-3);

    Ok(())
}

#[test]
fn growing_window() -> anyhow::Result<()> {
    let data = include_str!("../fixtures/dash/growing.mpd");
    let window = manifest::parse_dash(data, epoch(REFERENCE))?;

    assert_eq!(window.window_start_time(), epoch("2018-12-13T10:00:00Z"));
    assert_eq!(window.window_end_time(), epoch("2018-12-13T10:59:56.160Z"));
    assert_eq!(window.time_correction(), 0.);
    assert!(!window.is_sliding());

    Ok(())
}

#[test]
fn growing_window_before_availability() {
    let data = include_str!("../fixtures/dash/growing.mpd");
    assert_eq!(
        manifest::parse_dash(data, epoch("2018-12-13T09:00:00Z")),
        Err(ManifestError::DashAttributes)
    );
}

#[test]
fn missing_availability_start_time() {
    let data = include_str!("../fixtures/dash/missing-availability-start-time.mpd");
    let error = manifest::parse_dash(data, epoch(REFERENCE)).unwrap_err();

    assert_eq!(error, ManifestError::DashAttributes);
    assert_eq!(error.to_string(), "Error parsing DASH manifest attributes");
}

#[test]
fn missing_timescale() {
    let data = include_str!("../fixtures/dash/missing-timescale.mpd");
    assert_eq!(
        manifest::parse_dash(data, epoch(REFERENCE)),
        Err(ManifestError::DashAttributes)
    );
}

#[test]
fn missing_segment_template() {
    let data = include_str!("../fixtures/dash/no-segment-template.mpd");
    let error = manifest::parse_dash(data, epoch(REFERENCE)).unwrap_err();

    assert_eq!(error, ManifestError::DashMalformed);
    assert_eq!(error.to_string(), "Error parsing DASH manifest");
}

#[test]
fn not_xml() {
    for data in ["", "not a manifest", "{\"type\": \"dynamic\"}", "<html></html>"] {
        manifest::parse(data, TransferFormat::Dash, epoch(REFERENCE)).assert_error();
        assert_eq!(
            manifest::parse_dash(data, epoch(REFERENCE)),
            Err(ManifestError::DashMalformed)
        );
    }
}
