//! Canonical showcase slugs.
//!
//! A storefront is served under one canonical slug. Its tenant id and any
//! slug it used before are still accepted, but answered with a redirect so
//! links converge on the canonical address.

use crate::ids::TenantId;
use serde::{Deserialize, Serialize};

/// Turn a display name into a URL slug.
///
/// ASCII letters and digits are kept lowercased; every other run of
/// characters becomes a single `-`, and none lead or trail.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// The addressing record of one storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storefront {
    pub id: TenantId,
    pub name: String,
    /// Canonical slug.
    pub slug: String,
    /// Slugs the storefront was previously reachable under.
    #[serde(default)]
    pub legacy_slugs: Vec<String>,
}

impl Storefront {
    /// A storefront whose canonical slug is derived from its name.
    pub fn new(id: impl Into<TenantId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            legacy_slugs: Vec::new(),
        }
    }

    /// Move to a new canonical slug, keeping the old one as a redirect.
    pub fn rename_slug(&mut self, slug: &str) {
        let slug = slugify(slug);
        if slug.is_empty() || slug == self.slug {
            return;
        }
        let previous = std::mem::replace(&mut self.slug, slug);
        self.legacy_slugs.retain(|s| !s.eq_ignore_ascii_case(&self.slug));
        if !self.legacy_slugs.iter().any(|s| s.eq_ignore_ascii_case(&previous)) {
            self.legacy_slugs.push(previous);
        }
    }
}

/// Outcome of looking up a showcase path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "slug", rename_all = "snake_case")]
pub enum SlugResolution {
    /// Serve the storefront as requested.
    Canonical,
    /// Redirect to the canonical slug.
    Redirect(String),
    NotFound,
}

/// Decide how to answer a request for `requested` against `storefront`.
pub fn resolve_slug(requested: &str, storefront: &Storefront) -> SlugResolution {
    let requested = requested.trim().trim_matches('/');
    if requested.is_empty() {
        return SlugResolution::NotFound;
    }

    if requested == storefront.slug {
        return SlugResolution::Canonical;
    }

    let known = requested.eq_ignore_ascii_case(&storefront.slug)
        || requested.eq_ignore_ascii_case(storefront.id.as_str())
        || storefront
            .legacy_slugs
            .iter()
            .any(|s| requested.eq_ignore_ascii_case(s));

    if known {
        tracing::debug!(requested, canonical = %storefront.slug, "redirecting to canonical slug");
        SlugResolution::Redirect(storefront.slug.clone())
    } else {
        SlugResolution::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe() -> Storefront {
        let mut storefront = Storefront::new("t_9f2c", "Blue Door Café");
        storefront.legacy_slugs.push("bluedoor".into());
        storefront
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Blue Door Café"), "blue-door-caf");
        assert_eq!(slugify("  Hello,  World!! "), "hello-world");
        assert_eq!(slugify("A&B 2024"), "a-b-2024");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_canonical_slug_served() {
        assert_eq!(resolve_slug("blue-door-caf", &cafe()), SlugResolution::Canonical);
        assert_eq!(resolve_slug("/blue-door-caf/", &cafe()), SlugResolution::Canonical);
    }

    #[test]
    fn test_aliases_redirect() {
        let expected = SlugResolution::Redirect("blue-door-caf".into());
        assert_eq!(resolve_slug("t_9f2c", &cafe()), expected);
        assert_eq!(resolve_slug("BlueDoor", &cafe()), expected);
        assert_eq!(resolve_slug("Blue-Door-Caf", &cafe()), expected);
    }

    #[test]
    fn test_unknown_slug() {
        assert_eq!(resolve_slug("red-door", &cafe()), SlugResolution::NotFound);
        assert_eq!(resolve_slug("", &cafe()), SlugResolution::NotFound);
    }

    #[test]
    fn test_rename_keeps_old_slug() {
        let mut storefront = cafe();
        storefront.rename_slug("The Blue Door");
        assert_eq!(storefront.slug, "the-blue-door");
        assert_eq!(storefront.legacy_slugs, vec!["bluedoor", "blue-door-caf"]);
        assert_eq!(
            resolve_slug("blue-door-caf", &storefront),
            SlugResolution::Redirect("the-blue-door".into())
        );

        storefront.rename_slug("bluedoor");
        assert_eq!(storefront.slug, "bluedoor");
        assert_eq!(storefront.legacy_slugs, vec!["blue-door-caf", "the-blue-door"]);
    }
}
