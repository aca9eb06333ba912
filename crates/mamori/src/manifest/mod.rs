//! # Manifest time windows
//!
//! Both DASH and HLS manifests reduce to the same [`TimeWindow`], so failover
//! and position tracking never need to know which format a source uses.
//!
//! `reference` is the caller's best estimate of "now", usually the device clock
//! corrected against the server. It only matters for DASH, whose live edge is
//! computed rather than listed.

mod dash;
pub mod duration;
mod hls;

pub use dash::parse_dash;
pub use hls::parse_hls;

use chrono::{DateTime, Utc};

use crate::{error::ManifestError, TimeWindow, TransferFormat};

pub fn parse(
    document: &str,
    format: TransferFormat,
    reference: DateTime<Utc>,
) -> Result<TimeWindow, ManifestError> {
    match format {
        TransferFormat::Dash => parse_dash(document, reference),
        TransferFormat::Hls => parse_hls(document),
    }
}
