//! Mount table module
//!
//! Associates URL path prefixes with filesystem roots. Route precedence is
//! an explicit invariant enforced at construction time, not a side effect of
//! registration order: the catch-all `/` must come last, and the remaining
//! prefixes must not overlap.

use std::path::PathBuf;

use crate::error::GatewayError;

/// One URL prefix bound to a filesystem root
#[derive(Debug, Clone)]
pub struct Mount {
    pub prefix: String,
    pub root: PathBuf,
    /// Serve the root `index.html` for unresolved paths so client-side
    /// routes survive a reload
    pub spa_fallback: bool,
}

impl Mount {
    pub fn new(prefix: &str, root: PathBuf, spa_fallback: bool) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            root,
            spa_fallback,
        }
    }

    /// Whether `path` falls under this mount. Segment-aware: `/static`
    /// matches `/static` and `/static/app.css`, never `/staticfoo`.
    pub fn matches(&self, path: &str) -> bool {
        if self.prefix == "/" {
            return true;
        }
        path == self.prefix
            || path
                .strip_prefix(self.prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Request path relative to the mount root, without leading slashes
    pub fn relative_path<'a>(&self, path: &'a str) -> &'a str {
        path.strip_prefix(self.prefix.as_str())
            .unwrap_or(path)
            .trim_start_matches('/')
    }
}

/// Ordered mount table; earlier entries win
pub struct MountTable {
    mounts: Vec<Mount>,
}

impl MountTable {
    /// Build the table. Checks the ordering invariants, then validates and
    /// canonicalizes every root so request-time containment checks compare
    /// resolved paths. A missing root is fatal: the gateway must not start
    /// serving with a broken mount.
    pub fn new(mounts: Vec<Mount>) -> Result<Self, GatewayError> {
        validate_order(&mounts)?;

        let mounts = mounts
            .into_iter()
            .map(|mut mount| {
                if !mount.root.is_dir() {
                    return Err(GatewayError::MountValidation {
                        prefix: mount.prefix.clone(),
                        root: mount.root,
                    });
                }
                let canonical =
                    mount
                        .root
                        .canonicalize()
                        .map_err(|_| GatewayError::MountValidation {
                            prefix: mount.prefix.clone(),
                            root: mount.root.clone(),
                        })?;
                mount.root = canonical;
                Ok(mount)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { mounts })
    }

    /// First mount whose prefix covers `path`, in table order
    pub fn resolve(&self, path: &str) -> Option<&Mount> {
        self.mounts.iter().find(|mount| mount.matches(path))
    }
}

fn validate_order(mounts: &[Mount]) -> Result<(), GatewayError> {
    for (i, mount) in mounts.iter().enumerate() {
        if mount.prefix == "/" && i + 1 != mounts.len() {
            return Err(GatewayError::MountOrdering(
                "the '/' catch-all must be the last entry".to_string(),
            ));
        }
    }

    for (i, a) in mounts.iter().enumerate() {
        for b in &mounts[i + 1..] {
            if a.prefix != "/" && b.prefix != "/" && (a.matches(&b.prefix) || b.matches(&a.prefix))
            {
                return Err(GatewayError::MountOrdering(format!(
                    "prefixes '{}' and '{}' overlap",
                    a.prefix, b.prefix
                )));
            }
        }
    }

    Ok(())
}

/// Normalize a mount prefix: leading slash, no trailing slash, `/` kept as-is
fn normalize_prefix(prefix: &str) -> String {
    if prefix == "/" {
        return "/".to_string();
    }

    let trimmed = prefix.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(normalize_prefix("/"), "/");
        assert_eq!(normalize_prefix("/static/"), "/static");
        assert_eq!(normalize_prefix("static"), "/static");
    }

    #[test]
    fn test_segment_aware_matching() {
        let mount = Mount::new("/static", PathBuf::from("/tmp"), false);
        assert!(mount.matches("/static"));
        assert!(mount.matches("/static/app.css"));
        assert!(!mount.matches("/staticfoo"));
        assert!(!mount.matches("/other"));
    }

    #[test]
    fn test_catch_all_matches_everything() {
        let mount = Mount::new("/", PathBuf::from("/tmp"), true);
        assert!(mount.matches("/"));
        assert!(mount.matches("/anything/at/all"));
    }

    #[test]
    fn test_relative_path() {
        let mount = Mount::new("/static", PathBuf::from("/tmp"), false);
        assert_eq!(mount.relative_path("/static/app.css"), "app.css");
        assert_eq!(mount.relative_path("/static"), "");

        let root = Mount::new("/", PathBuf::from("/tmp"), true);
        assert_eq!(root.relative_path("/"), "");
        assert_eq!(root.relative_path("/app/route"), "app/route");
    }

    #[test]
    fn test_resolve_precedence() {
        let dir = tempdir().unwrap();
        let table = MountTable::new(vec![
            Mount::new("/static", dir.path().to_path_buf(), false),
            Mount::new("/", dir.path().to_path_buf(), true),
        ])
        .unwrap();

        let hit = table.resolve("/static/frontend-settings.json").unwrap();
        assert_eq!(hit.prefix, "/static");

        let fallback = table.resolve("/app/route").unwrap();
        assert_eq!(fallback.prefix, "/");
    }

    #[test]
    fn test_catch_all_must_be_last() {
        let dir = tempdir().unwrap();
        let result = MountTable::new(vec![
            Mount::new("/", dir.path().to_path_buf(), true),
            Mount::new("/static", dir.path().to_path_buf(), false),
        ]);
        assert!(matches!(result, Err(GatewayError::MountOrdering(_))));
    }

    #[test]
    fn test_overlapping_prefixes_rejected() {
        let dir = tempdir().unwrap();
        let result = MountTable::new(vec![
            Mount::new("/static", dir.path().to_path_buf(), false),
            Mount::new("/static/img", dir.path().to_path_buf(), false),
        ]);
        assert!(matches!(result, Err(GatewayError::MountOrdering(_))));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_dir");
        let result = MountTable::new(vec![Mount::new("/static", missing, false)]);
        assert!(matches!(result, Err(GatewayError::MountValidation { .. })));
    }
}
