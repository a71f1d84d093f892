//! Tar archive unpacking.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tar::Archive;

use crate::error::{Error, Result};

/// Unpack every member of a tar archive into `output_dir`.
///
/// Returns the on-disk path of each member in archive order. Members that would
/// land outside `output_dir` are skipped and not returned.
pub fn unpack_archive(archive_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(archive_path)?;
    let mut archive = Archive::new(BufReader::new(file));
    let mut unpacked = Vec::new();

    let entries = archive
        .entries()
        .map_err(|e| Error::Extraction(format!("Cannot read archive: {}", e)))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| Error::Extraction(format!("Corrupted archive entry: {}", e)))?;

        let member = entry
            .path()
            .map_err(|e| Error::Extraction(format!("Invalid member path: {}", e)))?
            .into_owned();

        let written = entry.unpack_in(output_dir).map_err(|e| {
            Error::Extraction(format!("Failed to unpack '{}': {}", member.display(), e))
        })?;

        if written {
            unpacked.push(output_dir.join(&member));
        } else {
            tracing::warn!("Skipped archive member outside output directory: {}", member.display());
        }
    }

    tracing::info!("Unpacked {} archive members into {}", unpacked.len(), output_dir.display());
    Ok(unpacked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tar::{Builder, Header};

    fn build_tar(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = Builder::new(Vec::new());
        for (path, data) in entries {
            let mut header = Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, data.as_bytes()).unwrap();
        }
        builder.into_inner().unwrap()
    }

    #[test]
    fn test_unpack_records_members_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("in.tar");
        std::fs::write(&archive, build_tar(&[("b.txt", "bee"), ("nested/a.txt", "ay")])).unwrap();

        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        let files = unpack_archive(&archive, &out).unwrap();

        assert_eq!(files, vec![out.join("b.txt"), out.join("nested/a.txt")]);
        assert_eq!(std::fs::read(out.join("nested/a.txt")).unwrap(), b"ay");
    }

    #[test]
    fn test_garbage_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bad.tar");
        std::fs::write(&archive, vec![b'A'; 1024]).unwrap();

        let err = unpack_archive(&archive, dir.path()).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
