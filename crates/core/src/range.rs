//! Single byte-range parsing for `Range: bytes=...` request headers.
//!
//! Only one range per request is honoured. Multi-range and malformed headers
//! parse to `None`, and callers then serve the whole file.

/// A syntactically valid byte-range request, not yet checked against a size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// `bytes=START-` or `bytes=START-END`.
    FromTo { start: u64, end: Option<u64> },
    /// `bytes=-N`: the last `N` bytes.
    Suffix(u64),
}

/// Parse a `Range` header value.
pub fn parse_range_header(value: &str) -> Option<ByteRange> {
    let spec = value.trim().strip_prefix("bytes=")?.trim();
    if spec.contains(',') {
        return None;
    }
    let (first, last) = spec.split_once('-')?;
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        let len = last.parse::<u64>().ok()?;
        return Some(ByteRange::Suffix(len));
    }

    let start = first.parse::<u64>().ok()?;
    let end = if last.is_empty() {
        None
    } else {
        let end = last.parse::<u64>().ok()?;
        if end < start {
            return None;
        }
        Some(end)
    };
    Some(ByteRange::FromTo { start, end })
}

impl ByteRange {
    /// Inclusive `(start, end)` offsets within a file of `size` bytes, or
    /// `None` when the range cannot be satisfied.
    pub fn resolve(self, size: u64) -> Option<(u64, u64)> {
        if size == 0 {
            return None;
        }
        let last = size - 1;
        match self {
            Self::FromTo { start, end } => {
                if start > last {
                    return None;
                }
                Some((start, end.map_or(last, |e| e.min(last))))
            }
            Self::Suffix(0) => None,
            Self::Suffix(len) => Some((size.saturating_sub(len), last)),
        }
    }
}
