//! Reassembly of split `.part<N>` files.
//!
//! Every directory under the root (the root included) is scanned on its own.
//! Files named `<base>.part<N>` are grouped by `<base>`; groups with at least two
//! members are concatenated in ascending part order into `<base>` and the
//! fragments are removed. A lone fragment is left alone.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::fs::split_part_name;

/// One reassembled file and the fragments it replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFile {
    pub path: PathBuf,
    /// In concatenation order. These no longer exist on disk.
    pub fragments: Vec<PathBuf>,
}

#[derive(Debug)]
struct Fragment {
    number: u64,
    name: String,
}

/// Merge all part groups found anywhere under `root`.
pub fn merge_part_files(root: &Path) -> Result<Vec<MergedFile>> {
    // Directory list is fixed before any file is touched.
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    let mut merged = Vec::new();
    for dir in dirs {
        for (base, fragments) in part_groups(&dir)? {
            if fragments.len() < 2 {
                continue;
            }
            if base.is_empty() {
                tracing::warn!(
                    "Skipping {} fragments without a base name in {}",
                    fragments.len(),
                    dir.display()
                );
                continue;
            }
            merged.push(merge_group(&dir, &base, fragments)?);
        }
    }

    Ok(merged)
}

/// Fragments in one directory, keyed by base name.
fn part_groups(dir: &Path) -> Result<BTreeMap<String, Vec<Fragment>>> {
    let mut groups: BTreeMap<String, Vec<Fragment>> = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if let Some((base, number)) = split_part_name(&name) {
            groups.entry(base.to_string()).or_default().push(Fragment {
                number,
                name: name.clone(),
            });
        }
    }

    Ok(groups)
}

fn merge_group(dir: &Path, base: &str, mut fragments: Vec<Fragment>) -> Result<MergedFile> {
    // Equal numbers (e.g. `.part0` and `.partX`) fall back to name order.
    fragments.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));

    let target = dir.join(base);
    let sources: Vec<PathBuf> = fragments.iter().map(|f| dir.join(&f.name)).collect();

    let mut writer = BufWriter::new(File::create(&target)?);
    for source in &sources {
        let mut reader = File::open(source)?;
        io::copy(&mut reader, &mut writer)?;
    }
    writer.flush()?;
    drop(writer);

    for source in &sources {
        fs::remove_file(source)?;
    }

    tracing::info!("Merged {} parts into {}", sources.len(), target.display());

    Ok(MergedFile {
        path: target,
        fragments: sources,
    })
}

/// Replace merged fragments in an ordered path list with their merged file.
///
/// The merged path takes the position of its first fragment; later fragments
/// of the same group are dropped.
pub fn substitute_merged(paths: Vec<PathBuf>, merged: &[MergedFile]) -> Vec<PathBuf> {
    let replacements: HashMap<&Path, &Path> = merged
        .iter()
        .flat_map(|m| m.fragments.iter().map(move |f| (f.as_path(), m.path.as_path())))
        .collect();

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut out = Vec::with_capacity(paths.len());

    for path in paths {
        let path = match replacements.get(path.as_path()) {
            Some(target) => target.to_path_buf(),
            None => path,
        };
        if seen.insert(path.clone()) {
            out.push(path);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, data: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, data).unwrap();
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_merges_three_parts_in_order() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join("data.bin.part1"), b"BBB");
        write(&root.path().join("data.bin.part0"), b"AA");
        write(&root.path().join("data.bin.part2"), b"C");

        let merged = merge_part_files(root.path()).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].path, root.path().join("data.bin"));
        assert_eq!(fs::read(root.path().join("data.bin")).unwrap(), b"AABBBC");
        assert_eq!(names(root.path()), vec!["data.bin"]);
    }

    #[test]
    fn test_lone_fragment_untouched() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join("a.part0"), b"only");

        let merged = merge_part_files(root.path()).unwrap();

        assert!(merged.is_empty());
        assert_eq!(names(root.path()), vec!["a.part0"]);
    }

    #[test]
    fn test_numeric_not_lexical_order() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join("a.part10"), b"ten");
        write(&root.path().join("a.part9"), b"nine");

        merge_part_files(root.path()).unwrap();

        assert_eq!(fs::read(root.path().join("a")).unwrap(), b"nineten");
    }

    #[test]
    fn test_non_numeric_suffix_sorts_first() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join("a.part1"), b"one");
        write(&root.path().join("a.partX"), b"x");

        merge_part_files(root.path()).unwrap();

        assert_eq!(fs::read(root.path().join("a")).unwrap(), b"xone");
        assert_eq!(names(root.path()), vec!["a"]);
    }

    #[test]
    fn test_recurses_into_nested_dirs() {
        let root = tempfile::tempdir().unwrap();
        let deep = root.path().join("x").join("y").join("z");
        write(&deep.join("f.part0"), b"1");
        write(&deep.join("f.part1"), b"2");
        write(&root.path().join("top.part0"), b"3");
        write(&root.path().join("top.part1"), b"4");

        let merged = merge_part_files(root.path()).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(fs::read(deep.join("f")).unwrap(), b"12");
        assert_eq!(fs::read(root.path().join("top")).unwrap(), b"34");
        assert_eq!(names(&deep), vec!["f"]);
    }

    #[test]
    fn test_groups_are_per_directory() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join("one/a.part0"), b"1");
        write(&root.path().join("two/a.part1"), b"2");

        let merged = merge_part_files(root.path()).unwrap();

        assert!(merged.is_empty());
        assert!(root.path().join("one/a.part0").exists());
        assert!(root.path().join("two/a.part1").exists());
    }

    #[test]
    fn test_overwrites_existing_target() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join("a"), b"stale contents");
        write(&root.path().join("a.part0"), b"new");
        write(&root.path().join("a.part1"), b"er");

        merge_part_files(root.path()).unwrap();

        assert_eq!(fs::read(root.path().join("a")).unwrap(), b"newer");
    }

    #[test]
    fn test_empty_base_skipped() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join(".part0"), b"1");
        write(&root.path().join(".part1"), b"2");

        let merged = merge_part_files(root.path()).unwrap();

        assert!(merged.is_empty());
        assert_eq!(names(root.path()), vec![".part0", ".part1"]);
    }

    #[test]
    fn test_substitute_merged() {
        let dir = PathBuf::from("/out/data");
        let merged = vec![MergedFile {
            path: dir.join("a"),
            fragments: vec![dir.join("a.part0"), dir.join("a.part1")],
        }];
        let paths = vec![
            PathBuf::from("/out/data"),
            dir.join("a.part1"),
            dir.join("readme.txt"),
            dir.join("a.part0"),
        ];

        assert_eq!(
            substitute_merged(paths, &merged),
            vec![
                PathBuf::from("/out/data"),
                dir.join("a"),
                dir.join("readme.txt"),
            ]
        );
    }
}
