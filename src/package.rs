use std::cmp::Ordering;
use std::fmt;

use crate::checksum::Checksum;
use crate::errors::*;
use crate::version::VersionComparator;

/// A package as listed in a repository: Name, Epoch, Version, Release, Architecture and the
/// checksum of the package file.
///
/// Epoch overrides all other fields and is generally only used as a last resort - in cases where
/// a change to the versioning scheme or packaging error creates a situation where newer packages
/// might otherwise sort as being older. A package without an epoch is stored with epoch 0, the two
/// cases can't be told apart afterwards.
///
/// Packages are totally ordered by name, epoch, version, release, architecture and finally the
/// checksum digest. Version and release are compared with [`rpmvercmp`](crate::rpmvercmp), the
/// other string fields bytewise. Two packages are equal only if all of those compare equal.
#[derive(Clone, Debug)]
pub struct Package {
    name: String,
    epoch: i64,
    version: String,
    release: String,
    arch: String,
    checksum: Option<Checksum>,
}

impl Package {
    /// Create a new package without a checksum
    pub fn new(
        name: impl Into<String>,
        epoch: i64,
        version: impl Into<String>,
        release: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Package {
            name: name.into(),
            epoch,
            version: version.into(),
            release: release.into(),
            arch: arch.into(),
            checksum: None,
        }
    }

    pub fn with_checksum(mut self, checksum: Checksum) -> Self {
        self.checksum = Some(checksum);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn checksum(&self) -> Option<&Checksum> {
        self.checksum.as_ref()
    }

    /// The checksum digest, or `""` for a package without a checksum
    pub fn checksum_digest(&self) -> &str {
        self.checksum.as_ref().map_or("", |checksum| checksum.digest())
    }

    /// `name-epoch:version-release.arch`, the epoch is always written
    pub fn nevra(&self) -> String {
        format!(
            "{}-{}:{}-{}.{}",
            self.name, self.epoch, self.version, self.release, self.arch
        )
    }

    /// `name-version-release.arch`, the form typically used for RPM filenames
    pub fn nvra(&self) -> String {
        format!(
            "{}-{}-{}.{}",
            self.name, self.version, self.release, self.arch
        )
    }

    pub fn nevr(&self) -> String {
        format!(
            "{}-{}:{}-{}",
            self.name, self.epoch, self.version, self.release
        )
    }

    pub fn nvr(&self) -> String {
        format!("{}-{}-{}", self.name, self.version, self.release)
    }

    pub fn na(&self) -> String {
        format!("{}.{}", self.name, self.arch)
    }

    /// `epoch:name-version-release.arch`, the older yum style
    pub fn envra(&self) -> String {
        format!(
            "{}:{}-{}-{}.{}",
            self.epoch, self.name, self.version, self.release, self.arch
        )
    }

    /// [`nevra`](Self::nevra) if the package has a non-zero epoch, [`nvra`](Self::nvra) otherwise
    pub fn ui_nevra(&self) -> String {
        match self.epoch {
            0 => self.nvra(),
            _ => self.nevra(),
        }
    }

    /// [`nevr`](Self::nevr) if the package has a non-zero epoch, [`nvr`](Self::nvr) otherwise
    pub fn ui_nevr(&self) -> String {
        match self.epoch {
            0 => self.nvr(),
            _ => self.nevr(),
        }
    }

    /// [`envra`](Self::envra) if the package has a non-zero epoch, [`nvra`](Self::nvra) otherwise
    pub fn ui_envra(&self) -> String {
        match self.epoch {
            0 => self.nvra(),
            _ => self.envra(),
        }
    }

    /// Compare using an explicitly configured version comparator
    pub fn cmp_with(&self, other: &Self, comparator: &VersionComparator) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.epoch.cmp(&other.epoch))
            .then_with(|| comparator.compare(&self.version, &other.version))
            .then_with(|| comparator.compare(&self.release, &other.release))
            // rpm itself stops here, the rest only makes the order total
            .then_with(|| self.arch.cmp(&other.arch))
            .then_with(|| self.checksum_digest().cmp(other.checksum_digest()))
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ui_nevra())
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Package {}

impl PartialOrd for Package {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Package {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_with(other, &VersionComparator::default())
    }
}

/// A package entry exactly as a repository loader reads it, before validation.
///
/// An entry with neither checksum kind nor digest becomes a package without a checksum.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PackageRecord {
    pub name: String,
    pub epoch: i64,
    pub version: String,
    pub release: String,
    pub arch: String,
    pub checksum_kind: String,
    pub checksum_digest: String,
}

impl TryFrom<PackageRecord> for Package {
    type Error = Error;

    fn try_from(record: PackageRecord) -> Result<Self> {
        let package = Package::new(
            record.name,
            record.epoch,
            record.version,
            record.release,
            record.arch,
        );

        if record.checksum_kind.is_empty() && record.checksum_digest.is_empty() {
            return Ok(package);
        }

        let checksum = Checksum::new(&record.checksum_kind, record.checksum_digest)?;
        Ok(package.with_checksum(checksum))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::version::CompareFlags;

    fn bash(release: &str) -> Package {
        Package::new("bash", 0, "5.1", release, "x86_64")
    }

    /// Test that the different textual forms are rendered as expected
    #[test]
    fn test_renderings() {
        let pkg = Package::new("python3.9", 0, "3.9.11", "2.fc38", "x86_64");
        assert_eq!("python3.9-0:3.9.11-2.fc38.x86_64", pkg.nevra());
        assert_eq!("python3.9-3.9.11-2.fc38.x86_64", pkg.nvra());
        assert_eq!("python3.9-0:3.9.11-2.fc38", pkg.nevr());
        assert_eq!("python3.9-3.9.11-2.fc38", pkg.nvr());
        assert_eq!("python3.9.x86_64", pkg.na());
        assert_eq!("python3.9", pkg.name());
        assert_eq!("0:python3.9-3.9.11-2.fc38.x86_64", pkg.envra());
    }

    /// An epoch of zero disappears from the UI forms, any other epoch is shown
    #[test]
    fn test_ui_renderings() {
        let pkg = Package::new("foo", 0, "1.2.3", "45", "noarch");
        assert_eq!("foo-1.2.3-45.noarch", pkg.ui_nevra());
        assert_eq!("foo-1.2.3-45", pkg.ui_nevr());
        assert_eq!("foo-1.2.3-45.noarch", pkg.ui_envra());
        assert_eq!("foo-1.2.3-45.noarch", pkg.to_string());

        let pkg = Package::new("foo", 2, "1.2.3", "45", "noarch");
        assert_eq!("foo-2:1.2.3-45.noarch", pkg.ui_nevra());
        assert_eq!("foo-2:1.2.3-45", pkg.ui_nevr());
        assert_eq!("2:foo-1.2.3-45.noarch", pkg.ui_envra());
        assert_eq!("foo-2:1.2.3-45.noarch", pkg.to_string());
    }

    /// Test comparing packages using comparison operators
    #[test]
    fn test_package_ord() {
        assert!(bash("4.fc34") < bash("5.fc34"));
        assert!(bash("10.fc34") > bash("9.fc34"));

        fn noarch(name: &str, epoch: i64, version: &str) -> Package {
            Package::new(name, epoch, version, "1", "noarch")
        }

        assert!(noarch("bar", 9, "1") < noarch("foo", 0, "1"));
        assert!(noarch("foo", 0, "1") < noarch("foobar", 0, "1"));
        // names are compared bytewise, not as versions
        assert!(
            Package::new("python3.11", 0, "3.11.7", "2", "x86_64")
                < Package::new("python3.9", 0, "3.9.12", "2", "x86_64")
        );

        // epoch wins over the version
        assert!(noarch("foo", 0, "4.0") < noarch("foo", 1, "1.0"));
        assert!(noarch("foo", 0, "1.0~rc1") < noarch("foo", 0, "1.0"));
        assert!(
            Package::new("foo", 0, "1.0", "1", "i686")
                < Package::new("foo", 0, "1.0", "1", "x86_64")
        );
    }

    /// The checksum digest is the last tie breaker, its kind isn't compared
    #[test]
    fn test_package_checksum_tie_break() -> Result<()> {
        let a = bash("4.fc34").with_checksum(Checksum::new("md5", "aaa")?);
        let b = bash("4.fc34").with_checksum(Checksum::new("md5", "bbb")?);
        assert!(a < b);
        assert_ne!(a, b);

        let c = bash("4.fc34").with_checksum(Checksum::new("sha256", "aaa")?);
        assert_eq!(a, c);

        // no checksum sorts like an empty digest
        assert!(bash("4.fc34") < a);
        Ok(())
    }

    /// Equality follows the version comparison, not the raw strings
    #[test]
    fn test_package_eq_follows_ordering() {
        let a = Package::new("foo", 0, "1.0001", "1", "noarch");
        let b = Package::new("foo", 0, "1.1", "1", "noarch");
        assert_eq!(a, b);
        assert_ne!(a.nvra(), b.nvra());
    }

    #[test]
    fn test_cmp_with_comparator() {
        let rc = Package::new("foo", 0, "1.0~rc1", "1", "noarch");
        let plain = Package::new("foo", 0, "1.0", "1", "noarch");
        assert_eq!(Ordering::Less, rc.cmp(&plain));
        assert_eq!(
            Ordering::Greater,
            rc.cmp_with(&plain, &VersionComparator::new(CompareFlags::empty()))
        );
    }

    #[test]
    fn test_from_record() -> Result<()> {
        let record = PackageRecord {
            name: "bash".to_string(),
            version: "5.1".to_string(),
            release: "4.fc34".to_string(),
            arch: "x86_64".to_string(),
            checksum_kind: "sha256".to_string(),
            checksum_digest: "abcd".to_string(),
            ..Default::default()
        };
        let pkg = Package::try_from(record.clone())?;
        assert_eq!("bash-5.1-4.fc34.x86_64", pkg.to_string());
        assert_eq!(Some("sha256:abcd".to_string()), pkg.checksum().map(|c| c.to_string()));

        let unchecked = Package::try_from(PackageRecord {
            checksum_kind: String::new(),
            checksum_digest: String::new(),
            ..record.clone()
        })?;
        assert!(unchecked.checksum().is_none());

        let missing_kind = Package::try_from(PackageRecord {
            checksum_kind: String::new(),
            ..record.clone()
        });
        assert!(matches!(missing_kind, Err(Error::MissingChecksumKind)));

        let unknown_kind = Package::try_from(PackageRecord {
            checksum_kind: "crc32".to_string(),
            ..record
        });
        assert!(matches!(unknown_kind, Err(Error::UnsupportedChecksumKind(_))));
        Ok(())
    }
}
