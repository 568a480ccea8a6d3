//! Screenplay file discovery.

use std::fs;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "fountain";
/// Directories that never hold source screenplays.
const SKIP_DIRS: [&str; 2] = ["exports", "node_modules"];
/// Conventional subdirectories tried when the root has no screenplay.
const FALLBACK_DIRS: [&str; 3] = ["screenplay", "script", "draft"];

/// Find the primary screenplay under `root`.
///
/// Prefers a root-level `.fountain` file with a script/screenplay-like name,
/// then any root-level match, then the first match inside the conventional
/// subdirectories.
pub fn find_screenplay_file(root: &Path) -> Option<PathBuf> {
    let mut top_level = screenplay_files_in(root);
    top_level.sort();

    if let Some(preferred) = top_level.iter().find(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        name.contains("script") || name.contains("screenplay")
    }) {
        return Some(preferred.clone());
    }
    if let Some(first) = top_level.into_iter().next() {
        return Some(first);
    }

    for dir in FALLBACK_DIRS {
        let mut nested = Vec::new();
        walk(&root.join(dir), &mut nested);
        nested.sort();
        if let Some(first) = nested.into_iter().next() {
            return Some(first);
        }
    }
    None
}

/// All screenplay files under `root`, recursively, in sorted order.
/// `exports/`, `node_modules/` and dot-directories are skipped.
pub fn find_all_screenplay_files(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, &mut found);
    found.sort();
    found
}

fn screenplay_files_in(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path))
        .collect()
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if !is_skipped(&path) {
                walk(&path, found);
            }
        } else if has_extension(&path) {
            found.push(path);
        }
    }
}

fn has_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(EXTENSION))
        .unwrap_or(false)
}

fn is_skipped(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            name.starts_with('.') || SKIP_DIRS.contains(&name.as_ref())
        })
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "INT. HALL - DAY\n").unwrap();
    }

    #[test]
    fn prefers_script_like_names_at_the_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a-draft.fountain"));
        touch(&dir.path().join("my-script.fountain"));

        let found = find_screenplay_file(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "my-script.fountain");
    }

    #[test]
    fn falls_back_to_conventional_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("screenplay/pilot.fountain"));

        let found = find_screenplay_file(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "pilot.fountain");
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("notes.fountain.bak").with_extension("txt"));
        assert!(find_screenplay_file(dir.path()).is_none());
    }

    #[test]
    fn recursive_discovery_skips_exports_and_dot_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("pilot.fountain"));
        touch(&dir.path().join("acts/act1.fountain"));
        touch(&dir.path().join("exports/old.fountain"));
        touch(&dir.path().join(".git/stale.fountain"));

        let all = find_all_screenplay_files(dir.path());
        let names: Vec<_> = all
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(all.len(), 2);
        assert!(names.contains(&"pilot.fountain".to_string()));
        assert!(names.contains(&"act1.fountain".to_string()));
    }
}
