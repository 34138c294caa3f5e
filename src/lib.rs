//! # rpm-repos
//!
//! RPM version comparison and set operations over the package lists of RPM repositories.
//!
//! Version and release strings are compared exactly like `rpmvercmp`, including the tilde (~)
//! pre-release and caret (^) snapshot markers. On top of that, packages are totally ordered,
//! can be matched against the globs users type on the command line (`bash*`, `*.noarch`, ...),
//! merged as sorted sets, and summarised into a yum style "rpmdb version" fingerprint.
//!
//! Fetching and parsing repository metadata is left to the caller, see [`PackageSource`].
//!
//! # Example
//!
//! ```rust
//! use std::cmp::Ordering;
//!
//! use rpm_repos::{Checksum, Package, PackageCollection, rpmvercmp};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! assert_eq!(Ordering::Less, rpmvercmp("1.0~rc1", "1.0"));
//! assert_eq!(Ordering::Greater, rpmvercmp("1.0^git1", "1.0"));
//!
//! let mut packages = PackageCollection::new(vec![
//!     Package::new("bash", 0, "5.1", "5.fc34", "x86_64")
//!         .with_checksum(Checksum::new("sha256", "bbbb")?),
//!     Package::new("zsh", 0, "5.8", "5.fc34", "x86_64"),
//!     Package::new("bash", 0, "5.1", "4.fc34", "x86_64")
//!         .with_checksum(Checksum::new("sha256", "aaaa")?),
//! ])
//! .with_origin("fedora");
//! packages.sort();
//!
//! let bash = packages.select(&["bash*"]);
//! assert_eq!(2, bash.len());
//! assert_eq!("bash-5.1-4.fc34.x86_64", bash.packages()[0].to_string());
//!
//! let fingerprint = bash.fingerprint();
//! assert_eq!(2, fingerprint.count());
//! println!("{fingerprint}");
//! # Ok(())
//! # }
//! ```

#![allow(unknown_lints, clippy::uninlined_format_args)]

mod errors;
pub use crate::errors::*;

mod checksum;
pub use crate::checksum::*;

mod version;
pub use crate::version::*;

mod package;
pub use crate::package::*;

mod pattern;
pub use crate::pattern::*;

mod collection;
pub use crate::collection::*;

mod fingerprint;
pub use crate::fingerprint::*;

pub mod source;
pub use crate::source::{PackageSource, SourceResult, load_all};
