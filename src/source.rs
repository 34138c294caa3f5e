//! The boundary to whatever fetches and parses repository metadata.
//!
//! Network access, XML parsing and decompression live outside this crate. A loader implements
//! [`PackageSource`], and [`load_all`] runs every source on its own thread, waits for all of them
//! and hands back one result per source. A failing source never affects the others.

use std::fmt;
use std::thread;

use crate::checksum::{Checksum, verify_all};
use crate::collection::PackageCollection;
use crate::errors::*;

/// Something which can produce the package list of one repository.
pub trait PackageSource: Sync {
    /// Human readable name, used to tag the loaded collection and in log messages
    fn name(&self) -> &str;

    /// Fetch and parse the package list. The packages may come back in any order.
    fn load(&self) -> Result<PackageCollection>;
}

impl<T: PackageSource + ?Sized> PackageSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> Result<PackageCollection> {
        (**self).load()
    }
}

/// The outcome of loading one [`PackageSource`].
#[derive(Debug)]
pub struct SourceResult {
    pub name: String,
    pub result: Result<PackageCollection>,
}

/// Load every source concurrently and wait for all of them.
///
/// Results come back in the same order as `sources`. Successfully loaded collections are sorted,
/// and tagged with the source name unless the loader tagged them itself.
pub fn load_all<S: PackageSource>(sources: &[S]) -> Vec<SourceResult> {
    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || load_one(source)))
            .collect();

        handles
            .into_iter()
            .zip(sources)
            .map(|(handle, source)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(Error::SourceFailed {
                        source_name: source.name().to_string(),
                        message: "loader panicked".to_string(),
                    })
                });
                if let Err(e) = &result {
                    log::warn!("skipping {}: {}", source.name(), e);
                }
                SourceResult {
                    name: source.name().to_string(),
                    result,
                }
            })
            .collect()
    })
}

fn load_one<S: PackageSource + ?Sized>(source: &S) -> Result<PackageCollection> {
    let mut collection = source.load()?;
    if collection.origin().is_none() {
        collection = collection.with_origin(source.name());
    }
    collection.sort();
    log::debug!("loaded {} packages from {}", collection.len(), source.name());
    Ok(collection)
}

/// One candidate location for a metadata document. Higher preference is tried first.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Mirror {
    pub url: String,
    pub preference: u32,
}

impl Mirror {
    pub fn new(url: impl Into<String>, preference: u32) -> Self {
        Mirror {
            url: url.into(),
            preference,
        }
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Fetch a document from the first mirror which both delivers it and matches every checksum.
///
/// Mirrors are tried once each, by descending preference, keeping the given order among equal
/// preferences. The search stops at the first good copy.
pub fn fetch_first_verified<'m, F, E>(
    mirrors: &'m [Mirror],
    checksums: &[Checksum],
    mut fetch: F,
) -> Result<(&'m Mirror, Vec<u8>)>
where
    F: FnMut(&Mirror) -> std::result::Result<Vec<u8>, E>,
    E: fmt::Display,
{
    let mut ordered: Vec<&Mirror> = mirrors.iter().collect();
    ordered.sort_by(|a, b| b.preference.cmp(&a.preference));

    let mut last_error = None;
    for &mirror in &ordered {
        log::trace!("trying {mirror}");
        let data = match fetch(mirror) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("failed to fetch {mirror}: {e}");
                last_error = Some(Error::FetchFailed {
                    location: mirror.url.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        if !verify_all(&data, checksums) {
            log::warn!("checksum doesn't match for {mirror}");
            last_error = Some(Error::ChecksumMismatch {
                location: mirror.url.clone(),
            });
            continue;
        }

        return Ok((mirror, data));
    }

    Err(Error::NoUsableMirror {
        tried: ordered.len(),
        last_error: last_error.map(Box::new),
    })
}
