//! HTTP Range request parsing module
//!
//! Single-range `bytes=` header evaluation per RFC 7233.

/// A resolved byte range, inclusive on both ends and clamped to the file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the range covers
    #[inline]
    pub const fn byte_len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of evaluating a Range header against a file size
#[derive(Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Range resolves to a slice of the file - respond 206
    Satisfiable(ByteRange),
    /// Range cannot be satisfied (start beyond EOF, inverted) - respond 416
    Unsatisfiable,
    /// No header, wrong unit, multi-range, or malformed - respond with the full content
    Ignored,
}

/// Evaluate a Range header against the file size
///
/// Supported forms:
/// - `bytes=start-end` - fixed range, end clamped to the file
/// - `bytes=start-` - from start to end of file
/// - `bytes=-suffix` - last `suffix` bytes
///
/// Multi-range requests are not served; they fall back to a full response.
///
/// # Examples
/// ```
/// use spa_server::http::range::{evaluate, ByteRange, RangeOutcome};
///
/// assert_eq!(
///     evaluate(Some("bytes=0-99"), 1000),
///     RangeOutcome::Satisfiable(ByteRange { start: 0, end: 99 })
/// );
/// assert_eq!(evaluate(None, 1000), RangeOutcome::Ignored);
/// ```
pub fn evaluate(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(spec) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Ignored;
    };

    // Single range only
    if spec.contains(',') {
        return RangeOutcome::Ignored;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Ignored;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return evaluate_suffix(end_str, file_size);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Ignored;
        };
        if end < start {
            return RangeOutcome::Unsatisfiable;
        }
        end.min(file_size - 1)
    };

    RangeOutcome::Satisfiable(ByteRange { start, end })
}

/// Evaluate a suffix range (`bytes=-N`, the last N bytes)
fn evaluate_suffix(suffix_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };

    // A zero-length suffix cannot be satisfied; a suffix longer than the
    // file simply covers the whole file.
    if suffix == 0 || file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Satisfiable(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}
