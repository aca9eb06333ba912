// crates/mamori/tests/fixtures/hls/*.m3u8

use mamori::{manifest, ManifestError, TransferFormat};

use crate::{fake::epoch, AssertWrapper};

#[test]
fn live_playlist() -> anyhow::Result<()> {
    let data = include_str!("../fixtures/hls/live.m3u8");
    // the reference time is not used for HLS
    let window = manifest::parse(data, TransferFormat::Hls, epoch("2030-01-01T00:00:00Z"))
        .assert_success();

    assert_eq!(window.window_start_time(), epoch("2015-07-07T08:55:10Z"));
    // 3 * 7.68 = 23.04, floored
    assert_eq!(window.window_end_time(), epoch("2015-07-07T08:55:33Z"));
    assert_eq!(window.time_correction(), 0.);

    Ok(())
}

#[test]
fn positions_map_onto_wall_clock() -> anyhow::Result<()> {
    let data = include_str!("../fixtures/hls/live.m3u8");
    let window = manifest::parse_hls(data)?;

    assert_eq!(
        window.playback_time_to_epoch_ms(12.5),
        epoch("2015-07-07T08:55:22.500Z").timestamp_millis()
    );
    // whole seconds only
    let at = epoch("2015-07-07T08:55:22.999Z").timestamp_millis();
    assert_eq!(window.epoch_ms_to_playback_time(at), 12.);
    assert_eq!(window.epoch_ms_to_playback_time(window.end_ms()), 23.);

    Ok(())
}

#[test]
fn floors_total_not_segments() -> anyhow::Result<()> {
    let data = include_str!("../fixtures/hls/short-segments.m3u8");
    let window = manifest::parse_hls(data)?;

    // 0.6 + 0.6 = 1.2, while flooring each segment would give an empty window
    assert_eq!(window.end_ms() - window.start_ms(), 1000);

    Ok(())
}

#[test]
fn sums_durations_at_full_precision() -> anyhow::Result<()> {
    // 25 * 3.84 = 96, 10 * 4.7 = 47
    let data = include_str!("../fixtures/hls/long-window.m3u8");
    let window = manifest::parse_hls(data)?;
    assert_eq!(window.end_ms() - window.start_ms(), 96_000);

    let data = include_str!("../fixtures/hls/uneven-segments.m3u8");
    let window = manifest::parse_hls(data)?;
    assert_eq!(window.end_ms() - window.start_ms(), 47_000);

    Ok(())
}

#[test]
fn first_program_date_time() -> anyhow::Result<()> {
    let data = include_str!("../fixtures/hls/late-program-date-time.m3u8");
    let window = manifest::parse_hls(data)?;

    assert_eq!(window.window_start_time(), epoch("2015-07-07T08:55:18Z"));
    assert_eq!(window.window_end_time(), epoch("2015-07-07T08:55:42Z"));

    Ok(())
}

#[test]
fn missing_program_date_time() {
    let data = include_str!("../fixtures/hls/no-program-date-time.m3u8");
    let error = manifest::parse_hls(data).unwrap_err();

    assert_eq!(error, ManifestError::Hls);
    assert_eq!(error.to_string(), "Error parsing HLS manifest");
}

#[test]
fn master_playlist() {
    let data = include_str!("../fixtures/hls/master.m3u8");
    assert_eq!(manifest::parse_hls(data), Err(ManifestError::Hls));
}

#[test]
fn not_a_playlist() {
    for data in ["", "not a playlist", "<MPD/>"] {
        assert_eq!(manifest::parse_hls(data), Err(ManifestError::Hls));
    }
}
