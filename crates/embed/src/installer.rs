//! Installation of native engine bundles.
//!
//! A bundle directory holds one gzip-compressed tarball per platform and
//! release, named `natives-<platform>-<release tag>.tar.gz`. Installing
//! unpacks the matching archive into the install directory and writes an
//! `install.lock` marker so later runs skip the extraction.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use common::{ShellError, ShellResult};
use flate2::read::GzDecoder;
use tracing::{debug, error, info, warn};

use crate::platform::Platform;

/// Marker written after a successful installation.
pub const INSTALL_LOCK: &str = "install.lock";

/// Location of the native archives for one release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeBundle {
    /// Directory containing the archives.
    pub bundle_dir: PathBuf,
    /// Release tag embedded in the archive names.
    pub release_tag: String,
}

impl NativeBundle {
    pub fn new(bundle_dir: impl Into<PathBuf>, release_tag: impl Into<String>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            release_tag: release_tag.into(),
        }
    }

    /// Archive file name for `platform`.
    pub fn archive_name(&self, platform: &Platform) -> String {
        format!("natives-{}-{}.tar.gz", platform.identifier(), self.release_tag)
    }

    /// Full path of the archive for `platform`.
    pub fn archive_path(&self, platform: &Platform) -> PathBuf {
        self.bundle_dir.join(self.archive_name(platform))
    }
}

/// Whether `install_dir` holds a completed installation.
pub fn is_installed(install_dir: &Path) -> bool {
    install_dir.join(INSTALL_LOCK).is_file()
}

/// Extract the archive for `platform` into `install_dir`.
pub fn install(bundle: &NativeBundle, platform: &Platform, install_dir: &Path) -> ShellResult<()> {
    let archive = bundle.archive_path(platform);
    if !archive.is_file() {
        return Err(ShellError::bundle_not_found(archive.display().to_string()));
    }

    fs::create_dir_all(install_dir)?;

    info!(
        archive = %archive.display(),
        install_dir = %install_dir.display(),
        "Installing native bundle"
    );
    let file = File::open(&archive)?;
    let entries = extract_archive(BufReader::new(file), install_dir)?;

    fs::write(install_dir.join(INSTALL_LOCK), &bundle.release_tag)?;
    info!(entries, "Native bundle installed");
    Ok(())
}

/// Unpack a `.tar.gz` stream into `install_dir`.
///
/// Entries whose path would escape `install_dir` are skipped. Entries with
/// any execute bit set are marked executable. Returns the number of
/// entries written.
pub fn extract_archive<R: Read>(reader: R, install_dir: &Path) -> ShellResult<usize> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut count = 0;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let mode = entry.header().mode().unwrap_or(0o644);

        if !entry.unpack_in(install_dir)? {
            warn!(path = %path.display(), "Skipping archive entry outside the install directory");
            continue;
        }

        let target = install_dir.join(&path);
        if mode & 0o111 != 0 {
            if let Err(err) = mark_executable(&target) {
                error!(path = %target.display(), %err, "Unable to mark entry executable");
            }
        }

        debug!(path = %path.display(), "Extracted");
        count += 1;
    }

    Ok(count)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::platform::{Arch, Os};
    use flate2::write::GzEncoder;
    use flate2::Compression;

    /// Write a small native archive for `platform` into `bundle_dir`.
    pub(crate) fn write_bundle(bundle: &NativeBundle, platform: &Platform) {
        fs::create_dir_all(&bundle.bundle_dir).unwrap();
        let file = File::create(bundle.archive_path(platform)).unwrap();
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

        let mut dir = tar::Header::new_gnu();
        dir.set_entry_type(tar::EntryType::Directory);
        dir.set_mode(0o755);
        dir.set_size(0);
        builder.append_data(&mut dir, "lib/", io::empty()).unwrap();

        let helper = b"#!/bin/sh\nexit 0\n";
        let mut header = tar::Header::new_gnu();
        header.set_mode(0o755);
        header.set_size(helper.len() as u64);
        builder
            .append_data(&mut header, "bin/engine_helper", &helper[..])
            .unwrap();

        let data = b"resource";
        let mut header = tar::Header::new_gnu();
        header.set_mode(0o644);
        header.set_size(data.len() as u64);
        builder
            .append_data(&mut header, "lib/resources.pak", &data[..])
            .unwrap();

        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_archive_name() {
        let bundle = NativeBundle::new("bundles", "v1.2.3");
        let platform = Platform::new(Os::Linux, Arch::Amd64);
        assert_eq!(bundle.archive_name(&platform), "natives-linux-amd64-v1.2.3.tar.gz");
        assert_eq!(
            bundle.archive_path(&platform),
            PathBuf::from("bundles/natives-linux-amd64-v1.2.3.tar.gz")
        );
    }

    #[test]
    fn test_install_extracts_and_marks() {
        let temp = tempfile::tempdir().unwrap();
        let bundle = NativeBundle::new(temp.path().join("bundles"), "r1");
        let platform = Platform::new(Os::Linux, Arch::Arm64);
        write_bundle(&bundle, &platform);

        let install_dir = temp.path().join("install");
        assert!(!is_installed(&install_dir));

        install(&bundle, &platform, &install_dir).unwrap();

        assert!(is_installed(&install_dir));
        assert_eq!(
            fs::read_to_string(install_dir.join("lib/resources.pak")).unwrap(),
            "resource"
        );
        assert_eq!(fs::read_to_string(install_dir.join(INSTALL_LOCK)).unwrap(), "r1");
    }

    #[cfg(unix)]
    #[test]
    fn test_install_keeps_execute_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        let bundle = NativeBundle::new(temp.path(), "r1");
        let platform = Platform::new(Os::Linux, Arch::Amd64);
        write_bundle(&bundle, &platform);

        let install_dir = temp.path().join("install");
        install(&bundle, &platform, &install_dir).unwrap();

        let mode = fs::metadata(install_dir.join("bin/engine_helper"))
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o111, 0);
    }

    #[test]
    fn test_missing_archive() {
        let temp = tempfile::tempdir().unwrap();
        let bundle = NativeBundle::new(temp.path(), "r1");
        let platform = Platform::new(Os::Windows, Arch::Amd64);

        let err = install(&bundle, &platform, &temp.path().join("install")).unwrap_err();
        assert!(matches!(err, ShellError::BundleNotFound(_)));
        assert!(!is_installed(&temp.path().join("install")));
    }
}
