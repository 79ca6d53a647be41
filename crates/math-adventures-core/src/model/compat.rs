//! Format-version compatibility for model artifacts.
//!
//! Artifacts carry a `major.minor.patch` format version. A reader accepts
//! any artifact of its own major version; one with a newer minor version is
//! accepted with a warning since it may carry fields this build ignores.

use std::fmt;

/// Outcome of comparing an artifact's version with the supported one.
#[derive(Debug, Clone, PartialEq)]
pub enum Compatibility {
    Compatible,
    /// Artifact is a newer minor revision; readable but possibly lossy.
    MinorNewer { supported: String, found: String },
    /// Different major version or unparseable version string.
    Incompatible {
        supported: String,
        found: String,
        hints: Vec<String>,
    },
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compatibility::Compatible => write!(f, "Artifact version is compatible"),
            Compatibility::MinorNewer { supported, found } => write!(
                f,
                "Artifact version ({found}) is newer than supported ({supported}); \
                 unknown fields will be ignored"
            ),
            Compatibility::Incompatible {
                supported,
                found,
                hints,
            } => {
                writeln!(f, "Incompatible artifact: supported={supported}, found={found}")?;
                for hint in hints {
                    writeln!(f, "  - {hint}")?;
                }
                Ok(())
            }
        }
    }
}

/// Parse `major.minor.patch` into its numeric parts.
pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse::<u32>().ok()?;
    let minor = parts.next()?.parse::<u32>().ok()?;
    let patch = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

/// Compare an artifact's format version with the one this build reads.
pub fn check_compatibility(supported: &str, found: &str) -> Compatibility {
    let incompatible = |hints: Vec<String>| Compatibility::Incompatible {
        supported: supported.to_string(),
        found: found.to_string(),
        hints,
    };

    let Some(supported_ver) = parse_version(supported) else {
        return incompatible(vec!["Invalid supported version format".to_string()]);
    };
    let Some(found_ver) = parse_version(found) else {
        return incompatible(vec!["Invalid artifact version format".to_string()]);
    };

    if supported_ver.0 != found_ver.0 {
        let hint = if found_ver.0 > supported_ver.0 {
            format!("The model was written by a newer trainer (v{}.x.x); upgrade to load it.", found_ver.0)
        } else {
            format!("The model was written by an older trainer (v{}.x.x); retrain it.", found_ver.0)
        };
        return incompatible(vec![hint]);
    }

    if found_ver.1 > supported_ver.1 {
        return Compatibility::MinorNewer {
            supported: supported.to_string(),
            found: found.to_string(),
        };
    }

    Compatibility::Compatible
}
