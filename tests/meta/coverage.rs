//! Layout checks: unit suites mirror `src/` and every file is reachable

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    // Crate roots and module declaration files carry no logic of their own
    const UNTESTED_SOURCES: &[&str] = &["lib.rs", "main.rs"];

    fn crate_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    // Relative paths of every `.rs` file below `dir`, sorted
    fn rust_files(dir: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    if let Ok(relative) = path.strip_prefix(dir) {
                        found.insert(relative.to_path_buf());
                    }
                }
            }
        }
        Ok(found)
    }

    fn is_module_file(path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == "mod.rs")
    }

    // Names declared with `mod name;` or `pub mod name;`
    fn declared_modules(file: &Path) -> io::Result<BTreeSet<String>> {
        let content = fs::read_to_string(file)?;
        Ok(content
            .lines()
            .map(str::trim)
            .map(|line| line.strip_prefix("pub ").unwrap_or(line))
            .filter_map(|line| line.strip_prefix("mod "))
            .filter_map(|rest| rest.strip_suffix(';'))
            .map(str::to_owned)
            .collect())
    }

    // Children of `dir` that `root` never declares, as displayable paths
    fn undeclared(dir: &Path, root: &str, standalone: &[&str]) -> io::Result<Vec<String>> {
        let declared = declared_modules(&dir.join(root))?;
        let mut missing = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if path.is_dir() {
                if !declared.contains(name) {
                    missing.push(path.display().to_string());
                }
                missing.extend(undeclared(&path, "mod.rs", &[])?);
            } else if let Some(stem) = name.strip_suffix(".rs") {
                if name == root || standalone.contains(&name) {
                    continue;
                }
                if !declared.contains(stem) {
                    missing.push(path.display().to_string());
                }
            }
        }

        Ok(missing)
    }

    #[test]
    fn test_every_source_file_has_a_unit_suite() {
        let root = crate_dir();
        let sources = rust_files(&root.join("src")).expect("src is readable");
        let suites = rust_files(&root.join("tests/unit")).expect("tests/unit is readable");

        let missing: Vec<String> = sources
            .iter()
            .filter(|path| !is_module_file(path))
            .filter(|path| !UNTESTED_SOURCES.iter().any(|name| Path::new(name) == *path))
            .filter(|path| !suites.contains(*path))
            .map(|path| format!("  - src/{0} -> tests/unit/{0}", path.display()))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without a unit suite:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_every_unit_suite_has_a_source_file() {
        let root = crate_dir();
        let sources = rust_files(&root.join("src")).expect("src is readable");
        let suites = rust_files(&root.join("tests/unit")).expect("tests/unit is readable");

        let orphaned: Vec<String> = suites
            .iter()
            .filter(|path| !is_module_file(path))
            .filter(|path| !sources.contains(*path))
            .map(|path| format!("  - tests/unit/{}", path.display()))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit suites for files that no longer exist:\n{}",
            orphaned.join("\n")
        );
    }

    // An undeclared file is silently never compiled
    #[test]
    fn test_every_file_is_declared_by_its_parent() {
        let root = crate_dir();
        let mut missing = undeclared(&root.join("src"), "lib.rs", &["main.rs"]).expect("src");
        missing.extend(
            undeclared(&root.join("tests"), "main.rs", &["synthesis.rs"]).expect("tests"),
        );

        assert!(
            missing.is_empty(),
            "Files not declared as modules:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_every_test_file_contains_tests() {
        let tests = crate_dir().join("tests");
        let files = rust_files(&tests).expect("tests is readable");

        let empty: Vec<String> = files
            .iter()
            .filter(|path| !is_module_file(path) && *path != Path::new("main.rs"))
            .filter(|path| {
                fs::read_to_string(tests.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/{}", path.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without a #[test] function:\n{}",
            empty.join("\n")
        );
    }

    #[test]
    fn test_module_declarations_are_parsed() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let file = temp.path().join("mod.rs");
        fs::write(&file, "//! Docs\n\npub mod alpha;\n/// Beta\nmod beta;\nuse gamma;\n")
            .expect("write");

        let declared = declared_modules(&file).expect("readable");

        assert_eq!(
            declared,
            BTreeSet::from(["alpha".to_owned(), "beta".to_owned()])
        );
    }
}
