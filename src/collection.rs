use std::cmp::Ordering;

use itertools::{EitherOrBoth, Itertools};

use crate::errors::*;
use crate::fingerprint::Fingerprint;
use crate::package::{Package, PackageRecord};
use crate::pattern::Pattern;
use crate::version::VersionComparator;

/// An ordered list of packages, optionally tagged with the repository it was loaded from.
///
/// Loading produces packages in no particular order. Call [`sort`](Self::sort) once before
/// using [`merge`](Self::merge) or [`fingerprint`](Self::fingerprint), which rely on the
/// packages being sorted and don't check it in release builds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PackageCollection {
    origin: Option<String>,
    packages: Vec<Package>,
}

impl PackageCollection {
    /// Create an untagged collection. The packages are kept in the order given.
    pub fn new(packages: Vec<Package>) -> Self {
        PackageCollection {
            origin: None,
            packages,
        }
    }

    /// An empty collection tagged with `origin`
    pub fn empty(origin: Option<String>) -> Self {
        PackageCollection {
            origin,
            packages: Vec::new(),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Validate the records from a repository loader and sort the resulting packages.
    pub fn from_records(
        origin: Option<String>,
        records: impl IntoIterator<Item = PackageRecord>,
    ) -> Result<Self> {
        let packages = records
            .into_iter()
            .map(Package::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut collection = PackageCollection { origin, packages };
        collection.sort();
        Ok(collection)
    }

    /// The repository these packages came from, if known
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn into_packages(self) -> Vec<Package> {
        self.packages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn sort(&mut self) {
        self.packages.sort();
    }

    pub fn sort_with(&mut self, comparator: &VersionComparator) {
        self.packages.sort_by(|a, b| a.cmp_with(b, comparator));
    }

    pub fn is_sorted(&self) -> bool {
        self.is_sorted_with(&VersionComparator::default())
    }

    pub fn is_sorted_with(&self, comparator: &VersionComparator) -> bool {
        self.packages
            .is_sorted_by(|a, b| a.cmp_with(b, comparator) != Ordering::Greater)
    }

    /// The packages matching `pattern`, in their current order. The origin is kept.
    ///
    /// A pattern which doesn't parse matches nothing.
    pub fn filter(&self, pattern: &str) -> Self {
        match Pattern::new(pattern) {
            Ok(pattern) => self.filter_pattern(&pattern),
            Err(e) => {
                log::debug!("{e}");
                Self::empty(self.origin.clone())
            }
        }
    }

    pub fn filter_pattern(&self, pattern: &Pattern) -> Self {
        PackageCollection {
            origin: self.origin.clone(),
            packages: self
                .packages
                .iter()
                .filter(|package| pattern.matches(package))
                .cloned()
                .collect(),
        }
    }

    /// The sorted union of two sorted collections.
    ///
    /// A package present in both is taken from `self` only once. The result keeps the origin if
    /// both collections share it and is untagged otherwise.
    pub fn merge(&self, other: &Self) -> Self {
        self.merge_with(other, &VersionComparator::default())
    }

    /// [`merge`](Self::merge) for collections sorted with a custom comparator
    pub fn merge_with(&self, other: &Self, comparator: &VersionComparator) -> Self {
        debug_assert!(self.is_sorted_with(comparator), "merge of unsorted packages");
        debug_assert!(other.is_sorted_with(comparator), "merge of unsorted packages");

        let origin = match self.origin == other.origin {
            true => self.origin.clone(),
            false => None,
        };

        let packages = self
            .packages
            .iter()
            .merge_join_by(other.packages.iter(), |a, b| a.cmp_with(b, comparator))
            .map(|pair| match pair {
                EitherOrBoth::Left(package)
                | EitherOrBoth::Right(package)
                | EitherOrBoth::Both(package, _) => package.clone(),
            })
            .collect();

        PackageCollection { origin, packages }
    }

    /// Packages matching any of the patterns, sorted and without duplicates.
    ///
    /// No patterns at all selects the whole collection.
    pub fn select<S: AsRef<str>>(&self, patterns: &[S]) -> Self {
        if patterns.is_empty() {
            return self.clone();
        }

        let selected = patterns
            .iter()
            .fold(Self::empty(self.origin.clone()), |selected, pattern| {
                selected.merge(&self.filter(pattern.as_ref()))
            });
        log::debug!(
            "selected {} of {} packages with {} pattern(s)",
            selected.len(),
            self.len(),
            patterns.len()
        );
        selected
    }

    /// Fingerprint the packages in their current order
    pub fn fingerprint(&self) -> Fingerprint {
        debug_assert!(self.is_sorted(), "fingerprint of unsorted packages");
        Fingerprint::of(&self.packages)
    }
}

impl FromIterator<Package> for PackageCollection {
    fn from_iter<T: IntoIterator<Item = Package>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PackageCollection {
    type Item = Package;
    type IntoIter = std::vec::IntoIter<Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.into_iter()
    }
}

impl<'a> IntoIterator for &'a PackageCollection {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
