//! List-read query specification and the translator that builds it.
//!
//! Translation is permissive by contract: missing or unparsable `page` and
//! `limit` fall back to their defaults, values below 1 are clamped to 1, and a
//! non-numeric `age` is treated as "no age filter". Existing clients rely on a
//! list read never failing because of its query string. Numeric values are
//! trimmed before parsing; `name` is matched verbatim.

use serde::{Deserialize, Serialize};

use crate::User;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Raw, untrusted query-string parameters for a list read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl ListParams {
    /// Collect parameters from decoded query-string pairs.
    ///
    /// The first value of a repeated key wins; unknown keys are ignored, so one
    /// odd parameter never discards the others.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "name" => &mut params.name,
                "age" => &mut params.age,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// A resolved list-read specification: equality filters plus a page window.
///
/// # Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    page: u64,
    limit: u64,
    name: Option<String>,
    age: Option<i32>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            name: None,
            age: None,
        }
    }
}

impl UserQuery {
    /// Build a query from explicit values, clamping `page`/`limit` into range.
    pub fn new(page: u64, limit: u64, name: Option<String>, age: Option<i32>) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            name: name.filter(|n| !n.is_empty()),
            age,
        }
    }

    /// Translate raw query parameters. Never fails.
    pub fn from_params(params: &ListParams) -> Self {
        let page = parse_positive(params.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(params.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);
        let age = params
            .age
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i32>().ok());

        Self::new(page, limit, params.name.clone(), age)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Zero-based index of the first row in the window: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Whether a record satisfies the equality filters (ignores the window).
    pub fn matches(&self, user: &User) -> bool {
        self.name.as_deref().is_none_or(|name| user.name == name)
            && self.age.is_none_or(|age| user.age == age)
    }

    /// Apply filters and the page window to rows already in store order.
    pub fn select<'a, I>(&self, rows: I) -> Vec<User>
    where
        I: IntoIterator<Item = &'a User>,
    {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);

        rows.into_iter()
            .filter(|u| self.matches(u))
            .skip(skip)
            .take(take)
            .cloned()
            .collect()
    }
}

/// Parse an integer and clamp it to at least 1. `None` on absence or parse failure.
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let value = raw?.trim().parse::<i64>().ok()?;
    Some(value.max(1).unsigned_abs())
}
