use std::fmt;

use digest::Digest;

use crate::checksum::{Checksum, ChecksumKind};
use crate::package::Package;

/// A content identifier for an ordered list of packages: the number of packages plus an md5 over
/// each package's `[epoch:]name-version-release.arch` and checksum, with the checksum kind spelled
/// as in the metadata.
///
/// This is the same scheme as yum's "rpmdb version", so the values can be compared with those
/// from other tools. It is order sensitive - fingerprint a sorted collection so that the same
/// packages always give the same result.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fingerprint {
    count: usize,
    checksum: Checksum,
}

impl Fingerprint {
    pub fn count(&self) -> usize {
        self.count
    }

    /// The md5 digest over all packages
    pub fn checksum(&self) -> &Checksum {
        &self.checksum
    }

    /// Fingerprint packages in the order given
    pub fn of<'a>(packages: impl IntoIterator<Item = &'a Package>) -> Self {
        let mut builder = FingerprintBuilder::new();
        builder.extend(packages);
        builder.finish()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.count, self.checksum.digest())
    }
}

/// Incrementally builds a [`Fingerprint`].
#[derive(Clone, Debug, Default)]
pub struct FingerprintBuilder {
    count: usize,
    hasher: md5::Md5,
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, package: &Package) {
        self.count += 1;
        self.hasher.update(package.ui_envra().as_bytes());
        if let Some(checksum) = package.checksum() {
            self.hasher.update(checksum.kind_name().as_bytes());
            self.hasher.update(checksum.digest().as_bytes());
        }
    }

    pub fn finish(self) -> Fingerprint {
        Fingerprint {
            count: self.count,
            checksum: Checksum::with_kind(ChecksumKind::Md5, hex::encode(self.hasher.finalize())),
        }
    }
}

impl<'a> Extend<&'a Package> for FingerprintBuilder {
    fn extend<T: IntoIterator<Item = &'a Package>>(&mut self, packages: T) {
        for package in packages {
            self.add(package);
        }
    }
}
