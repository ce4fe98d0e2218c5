use std::path::{Path, PathBuf};

use super::{subset::ProfileSubsetDocument, ProfileError};

pub const EXTENSION: &str = "ttl";

/// File name for a profile: trimmed, whitespace runs and path separators
/// replaced by `_`, with a `.ttl` suffix.
#[must_use]
pub fn file_name(profile_name: &str) -> String {
    let mut name = String::with_capacity(profile_name.len() + EXTENSION.len() + 1);
    let mut in_gap = false;
    for ch in profile_name.trim().chars() {
        if ch.is_whitespace() || ch == '/' || ch == '\\' {
            if !in_gap {
                name.push('_');
            }
            in_gap = true;
        } else {
            name.push(ch);
            in_gap = false;
        }
    }
    name.push('.');
    name.push_str(EXTENSION);
    name
}

/// Writes the Turtle projection into `dir`, creating it when missing.
///
/// # Errors
///
/// When the directory or file cannot be written.
pub async fn write_turtle(
    dir: &Path,
    profile_name: &str,
    document: &ProfileSubsetDocument,
) -> Result<PathBuf, ProfileError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ProfileError::Export {
            path: dir.to_path_buf(),
            source,
        })?;
    let path = dir.join(file_name(profile_name));
    tokio::fs::write(&path, document.turtle.as_bytes())
        .await
        .map_err(|source| ProfileError::Export {
            path: path.clone(),
            source,
        })?;
    tracing::info!(path = %path.display(), "profile_exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::file_name;

    #[rstest]
    #[case("Test", "Test.ttl")]
    #[case("My Profile", "My_Profile.ttl")]
    #[case("  spaced \t out  ", "spaced_out.ttl")]
    #[case("a/b\\c", "a_b_c.ttl")]
    fn sanitizes_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(file_name(name), expected);
    }
}
