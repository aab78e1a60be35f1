//! Listing constants and query-parameter helpers.
//!
//! Query strings arrive as loose text from the storefront, so the helpers
//! here coerce them into the windows and sort modes the store understands
//! instead of rejecting them.

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Page size used when `limit` is missing or unusable.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Number of toys on the featured shelf.
pub const FEATURED_TOYS_LIMIT: i64 = 4;

/// Number of toys returned per category tab.
pub const CATEGORY_TOYS_LIMIT: i64 = 3;

// ---------------------------------------------------------------------------
// Integer coercion
// ---------------------------------------------------------------------------

/// Parse the leading integer of `raw`, ignoring any trailing garbage.
///
/// Accepts leading whitespace and an optional sign, then reads as many
/// decimal digits as are present. `"12px"` yields 12, `"abc"` and `""`
/// yield `None`. Values that overflow `i64` yield `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A resolved `skip`/`limit` window for paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Resolve raw `page` and `limit` query values.
    ///
    /// - `page` defaults to 0 and is floored at 0.
    /// - `limit` falls back to [`DEFAULT_PAGE_LIMIT`] when missing, non-numeric,
    ///   zero or negative.
    /// - `skip = page * limit`, saturating on overflow.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page.and_then(parse_int_prefix).unwrap_or(0).max(0);
        let limit = limit
            .and_then(parse_int_prefix)
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        Self {
            skip: page.saturating_mul(limit),
            limit,
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Price ordering applied to a seller's listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSort {
    /// Natural storage order.
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl PriceSort {
    /// Map the `sortToy` query value. Only the exact strings `ascending` and
    /// `descending` select a sort; anything else leaves the listing unsorted.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("ascending") => Self::Ascending,
            Some("descending") => Self::Descending,
            _ => Self::Unsorted,
        }
    }
}

// ---------------------------------------------------------------------------
// Text matching
// ---------------------------------------------------------------------------

/// Escape `\`, `%` and `_` so user input matches literally inside a
/// `LIKE`/`ILIKE` pattern using the default backslash escape.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring test used by the in-memory store.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
