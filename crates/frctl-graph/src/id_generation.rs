//! Canonical identifier generation for graph nodes.
//!
//! Node identifiers follow a package-URL style convention:
//! `pkg:<namespace>/<slug>@<version-tag>`. Identifiers generated from human
//! names always use the `local` version tag.
//!
//! Generation is a pure function of its input. Two distinct names that
//! normalize to the same slug produce the same identifier; the graph's
//! uniqueness check (`Graph::add_node`) is what reports the collision.
//!
//! # Example
//!
//! ```
//! use frctl_graph::id_generation::{generate_id, generate_id_in, validate_id};
//!
//! assert_eq!(generate_id("My Service"), "pkg:frctl/my-service@local");
//! assert_eq!(generate_id_in("acme", "billing_api"), "pkg:acme/billing-api@local");
//! assert!(validate_id("pkg:acme/billing-api@local"));
//! ```

/// Namespace used when the caller does not supply one.
pub const DEFAULT_NAMESPACE: &str = "frctl";

/// Version tag attached to every generated identifier.
pub const LOCAL_VERSION_TAG: &str = "local";

const ID_SCHEME: &str = "pkg:";

/// Normalize a human name into a slug.
///
/// Lowercases the input and replaces every run of whitespace, underscores,
/// or hyphens with a single hyphen. Leading and trailing separators are
/// dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.trim().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
            continue;
        }
        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.extend(c.to_lowercase());
    }

    slug
}

/// Generate an identifier for `name` in the default namespace.
pub fn generate_id(name: &str) -> String {
    generate_id_in(DEFAULT_NAMESPACE, name)
}

/// Generate an identifier for `name` in the given namespace.
pub fn generate_id_in(namespace: &str, name: &str) -> String {
    format!(
        "{}{}/{}@{}",
        ID_SCHEME,
        namespace,
        slugify(name),
        LOCAL_VERSION_TAG
    )
}

/// Validate identifier format.
///
/// Valid format: `pkg:<namespace>/<slug>@<version-tag>` where every part is
/// non-empty and no part contains whitespace. The graph engine itself never
/// parses identifiers; this check is for callers accepting typed input.
pub fn validate_id(id: &str) -> bool {
    let Some(rest) = id.strip_prefix(ID_SCHEME) else {
        return false;
    };

    let Some((namespace, rest)) = rest.split_once('/') else {
        return false;
    };

    let Some((slug, version)) = rest.rsplit_once('@') else {
        return false;
    };

    [namespace, slug, version]
        .iter()
        .all(|part| !part.is_empty() && !part.chars().any(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_normalizes_separators() {
        assert_eq!(slugify("My Service"), "my-service");
        assert_eq!(slugify("my_service"), "my-service");
        assert_eq!(slugify("MY-SERVICE"), "my-service");
        assert_eq!(slugify("  spaced   out__name "), "spaced-out-name");
        assert_eq!(slugify("_leading and trailing_"), "leading-and-trailing");
    }

    #[test]
    fn test_generate_id_template() {
        assert_eq!(generate_id("Auth Service"), "pkg:frctl/auth-service@local");
        assert_eq!(generate_id_in("acme", "Auth"), "pkg:acme/auth@local");
    }

    #[test]
    fn test_collisions_are_not_disambiguated() {
        // Same slug, same id: collision detection belongs to the graph.
        assert_eq!(generate_id("user service"), generate_id("User_Service"));
    }

    #[test]
    fn test_id_validation() {
        assert!(validate_id("pkg:frctl/a@local"));
        assert!(validate_id("pkg:acme/billing-api@1.2.0"));
        assert!(validate_id(&generate_id("Some Name")));

        assert!(!validate_id("frctl/a@local")); // Missing scheme
        assert!(!validate_id("pkg:a@local")); // Missing namespace separator
        assert!(!validate_id("pkg:frctl/a")); // Missing version tag
        assert!(!validate_id("pkg:/a@local")); // Empty namespace
        assert!(!validate_id("pkg:frctl/@local")); // Empty slug
        assert!(!validate_id("pkg:frctl/a b@local")); // Whitespace
    }
}
