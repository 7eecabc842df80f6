//! Project identifier resolution.
//!
//! An identifier is either a bare path (`team/docs`), taken relative to the
//! configured default base address, or a fully qualified address
//! (`http://host/team/docs`). Both resolve to a canonical base address plus a
//! path segment, from which the source and wiki fetch addresses are derived.

use url::Url;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    base_address: String,
    path_segment: String,
}

impl RepoLocation {
    pub fn resolve(identifier: &str, default_base: &str) -> Result<Self> {
        let identifier = identifier.trim();
        let invalid = || AppError::InvalidIdentifier(identifier.to_string());

        let address = if has_scheme(identifier) {
            identifier.to_string()
        } else {
            let default_base = default_base.trim_end_matches('/');
            format!(
                "{}/{}",
                default_base,
                normalize_segment(identifier, default_base)
            )
        };

        let url = Url::parse(&address).map_err(|_| invalid())?;
        let host = url.host_str().ok_or_else(invalid)?;

        let mut base_address = format!("{}://", url.scheme());
        if !url.username().is_empty() {
            base_address.push_str(url.username());
            base_address.push('@');
        }
        base_address.push_str(host);
        if let Some(port) = url.port() {
            base_address.push_str(&format!(":{}", port));
        }

        let path_segment = normalize_segment(url.path(), &base_address);
        if path_segment.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            base_address,
            path_segment,
        })
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn path_segment(&self) -> &str {
        &self.path_segment
    }

    /// Browsable project address
    pub fn web_address(&self) -> String {
        format!("{}/{}", self.base_address, self.path_segment)
    }

    pub fn source_address(&self) -> String {
        format!("{}/{}.git", self.base_address, self.path_segment)
    }

    pub fn wiki_address(&self) -> String {
        format!("{}/{}.wiki.git", self.base_address, self.path_segment)
    }
}

fn has_scheme(identifier: &str) -> bool {
    match identifier.find("://") {
        Some(idx) if idx > 0 => identifier[..idx]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

fn normalize_segment(raw: &str, base_address: &str) -> String {
    let segment = raw.strip_prefix(base_address).unwrap_or(raw);
    let segment = segment.trim_matches('/');
    let segment = segment
        .strip_suffix(".wiki.git")
        .or_else(|| segment.strip_suffix(".git"))
        .unwrap_or(segment);
    segment.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://git.example.com";

    #[test]
    fn bare_name_uses_default_base() {
        let location = RepoLocation::resolve("team/docs", BASE).unwrap();

        assert_eq!(location.base_address(), "http://git.example.com");
        assert_eq!(location.path_segment(), "team/docs");
        assert_eq!(
            location.wiki_address(),
            "http://git.example.com/team/docs.wiki.git"
        );
        assert_eq!(
            location.source_address(),
            "http://git.example.com/team/docs.git"
        );
    }

    #[test]
    fn bare_name_separators_are_stripped() {
        let location = RepoLocation::resolve("/team/docs/", BASE).unwrap();
        assert_eq!(location.path_segment(), "team/docs");
    }

    #[test]
    fn full_address_overrides_default_base() {
        let location =
            RepoLocation::resolve("https://gitlab.internal:8443/group/sub/project/", BASE).unwrap();

        assert_eq!(location.base_address(), "https://gitlab.internal:8443");
        assert_eq!(location.path_segment(), "group/sub/project");
        assert_eq!(
            location.web_address(),
            "https://gitlab.internal:8443/group/sub/project"
        );
    }

    #[test]
    fn bare_name_with_default_base_prefix() {
        let location = RepoLocation::resolve("http://git.example.com/team/docs", BASE).unwrap();
        assert_eq!(location.path_segment(), "team/docs");
    }

    #[test]
    fn resolving_derived_addresses_round_trips() {
        for identifier in [
            "team/docs",
            "/team/docs/",
            "http://git.example.com/team/docs",
            "https://other.host/a/b/c",
        ] {
            let first = RepoLocation::resolve(identifier, BASE).unwrap();
            let from_source = RepoLocation::resolve(&first.source_address(), BASE).unwrap();
            let from_wiki = RepoLocation::resolve(&first.wiki_address(), BASE).unwrap();

            assert_eq!(from_source, first, "source address of {identifier}");
            assert_eq!(from_wiki, first, "wiki address of {identifier}");
        }
    }

    #[test]
    fn empty_identifier_is_rejected() {
        assert!(matches!(
            RepoLocation::resolve("  ", BASE),
            Err(AppError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            RepoLocation::resolve("http://git.example.com/", BASE),
            Err(AppError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn unparsable_address_is_rejected() {
        assert!(matches!(
            RepoLocation::resolve("http://", BASE),
            Err(AppError::InvalidIdentifier(_))
        ));
    }
}
