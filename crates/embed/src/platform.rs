//! Detection of the current operating system and architecture.
//!
//! Native bundles are published per platform; the identifier produced here
//! (`linux-amd64`, `macosx-arm64`, ...) selects the archive to install.

use std::fmt;

use common::{ShellError, ShellResult};

const OS_MACOSX: &[&str] = &["mac", "darwin"];
const OS_LINUX: &[&str] = &["nux"];
const OS_WINDOWS: &[&str] = &["win"];

const ARCH_AMD64: &[&str] = &["amd64", "x86_64"];
const ARCH_I386: &[&str] = &["x86", "i386", "i486", "i586", "i686", "i786"];
const ARCH_ARM64: &[&str] = &["arm64", "aarch64"];
const ARCH_ARM: &[&str] = &["arm"];

/// Supported operating systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Os {
    MacOsx,
    Linux,
    Windows,
}

impl Os {
    fn identifier(self) -> &'static str {
        match self {
            Os::MacOsx => "macosx",
            Os::Linux => "linux",
            Os::Windows => "windows",
        }
    }

    fn detect(name: &str) -> Option<Os> {
        // "darwin" contains "win", so mac is matched first.
        [(Os::MacOsx, OS_MACOSX), (Os::Linux, OS_LINUX), (Os::Windows, OS_WINDOWS)]
            .into_iter()
            .find(|(_, patterns)| matches_any(name, patterns))
            .map(|(os, _)| os)
    }
}

/// Supported CPU architectures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arch {
    Amd64,
    I386,
    Arm64,
    Arm,
}

impl Arch {
    fn identifier(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::I386 => "i386",
            Arch::Arm64 => "arm64",
            Arch::Arm => "arm",
        }
    }

    fn detect(name: &str) -> Option<Arch> {
        // "x86_64" contains "x86" and "arm64" contains "arm".
        [
            (Arch::Amd64, ARCH_AMD64),
            (Arch::Arm64, ARCH_ARM64),
            (Arch::I386, ARCH_I386),
            (Arch::Arm, ARCH_ARM),
        ]
        .into_iter()
        .find(|(_, patterns)| matches_any(name, patterns))
        .map(|(arch, _)| arch)
    }
}

/// An operating system and architecture pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// The platform this process runs on.
    pub fn current() -> ShellResult<Self> {
        Self::from_names(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Resolve a platform from OS and architecture names.
    pub fn from_names(os_name: &str, os_arch: &str) -> ShellResult<Self> {
        let os_lower = os_name.to_ascii_lowercase();
        let arch_lower = os_arch.to_ascii_lowercase();
        match (Os::detect(&os_lower), Arch::detect(&arch_lower)) {
            (Some(os), Some(arch)) => Ok(Self { os, arch }),
            _ => Err(ShellError::unsupported_platform(os_name, os_arch)),
        }
    }

    /// Identifier used in native bundle names, e.g. `linux-amd64`.
    pub fn identifier(&self) -> String {
        format!("{}-{}", self.os.identifier(), self.arch.identifier())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

fn matches_any(value: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| value.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_rust_target_names() {
        let platform = Platform::from_names("linux", "x86_64").unwrap();
        assert_eq!(platform, Platform::new(Os::Linux, Arch::Amd64));
        assert_eq!(platform.identifier(), "linux-amd64");

        let platform = Platform::from_names("macos", "aarch64").unwrap();
        assert_eq!(platform.identifier(), "macosx-arm64");

        let platform = Platform::from_names("windows", "x86").unwrap();
        assert_eq!(platform.identifier(), "windows-i386");
    }

    #[test]
    fn test_darwin_is_not_windows() {
        let platform = Platform::from_names("Darwin", "arm64").unwrap();
        assert_eq!(platform.os, Os::MacOsx);
    }

    #[test]
    fn test_arm_variants() {
        assert_eq!(Platform::from_names("Linux", "arm").unwrap().arch, Arch::Arm);
        assert_eq!(Platform::from_names("Linux", "armv7").unwrap().arch, Arch::Arm);
        assert_eq!(Platform::from_names("Linux", "arm64").unwrap().arch, Arch::Arm64);
    }

    #[test]
    fn test_case_insensitive() {
        let platform = Platform::from_names("Windows 10", "AMD64").unwrap();
        assert_eq!(platform.identifier(), "windows-amd64");
    }

    #[test]
    fn test_unsupported_platform() {
        let err = Platform::from_names("plan9", "x86_64").unwrap_err();
        assert!(matches!(err, ShellError::UnsupportedPlatform { .. }));

        let err = Platform::from_names("linux", "riscv64").unwrap_err();
        assert!(err.to_string().contains("os.arch=riscv64"));
    }

    #[test]
    fn test_current_platform_resolves() {
        // CI runs on one of the supported targets.
        assert!(Platform::current().is_ok());
    }
}
