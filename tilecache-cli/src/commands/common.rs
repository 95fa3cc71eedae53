//! Shared argument parsing for tile commands.

use std::ops::RangeInclusive;

use tilecache::coord::MAX_ZOOM;

use crate::error::CliError;

/// Default upper bound on tiles in one prefetch.
pub const DEFAULT_MAX_TILES: u64 = 10_000;

/// Parses an inclusive index range: `7` or `3..9`.
pub fn parse_range(value: &str) -> Result<RangeInclusive<u32>, String> {
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| format!("'{}' is not a tile index", s.trim()))
    };

    match value.split_once("..") {
        Some((start, end)) => {
            let (start, end) = (parse(start)?, parse(end)?);
            if start > end {
                return Err(format!("range start {} is after end {}", start, end));
            }
            Ok(start..=end)
        }
        None => {
            let index = parse(value)?;
            Ok(index..=index)
        }
    }
}

/// Checks that `zoom` is addressable.
pub fn check_zoom(zoom: u8) -> Result<(), CliError> {
    if zoom > MAX_ZOOM {
        return Err(CliError::InvalidTile(format!(
            "zoom {} exceeds maximum {}",
            zoom, MAX_ZOOM
        )));
    }
    Ok(())
}

/// Clamps a requested range to the `2^zoom` grid, or the whole grid if none.
pub fn grid_range(
    zoom: u8,
    requested: Option<RangeInclusive<u32>>,
    axis: &str,
) -> Result<RangeInclusive<u32>, CliError> {
    check_zoom(zoom)?;
    let last = ((1u64 << zoom) - 1) as u32;

    match requested {
        None => Ok(0..=last),
        Some(range) if *range.end() <= last => Ok(range),
        Some(range) => Err(CliError::InvalidTile(format!(
            "{} range {}..{} is outside the zoom {} grid (0..{})",
            axis,
            range.start(),
            range.end(),
            zoom,
            last
        ))),
    }
}

/// Number of indices in an inclusive range.
pub fn range_len(range: &RangeInclusive<u32>) -> u64 {
    u64::from(*range.end()) - u64::from(*range.start()) + 1
}
