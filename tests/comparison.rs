use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use rpm_repos::*;

mod common;

const VERSIONS: &[&str] = &[
    "",
    "0",
    "1",
    "1.0",
    "1.0~rc1",
    "1.0~~rc1",
    "1.0^",
    "1.0^git1",
    "1.0^^",
    "1.01",
    "1.a",
    "1a",
    "1.0.1",
    "2.0",
    "10.0001",
    "10.1",
    "5.5p10",
    "5.5p2",
    "xyz.4",
    "20240521",
    "4.fc34",
    "5.fc34",
    "1.1.α",
    "1.1.β",
    "...",
    "~",
    "^",
];

#[test]
fn test_reflexive() {
    for version in VERSIONS {
        assert_eq!(Ordering::Equal, rpmvercmp(version, version), "{version:?}");
    }
}

#[test]
fn test_antisymmetric() {
    for a in VERSIONS {
        for b in VERSIONS {
            assert_eq!(
                rpmvercmp(a, b),
                rpmvercmp(b, a).reverse(),
                "rpmvercmp({a:?}, {b:?})"
            );
        }
    }
}

/// The examples that decide real upgrade paths
#[test]
fn test_documented_examples() {
    assert_eq!(Ordering::Equal, rpmvercmp("10.0001", "10.1"));
    assert_eq!(Ordering::Less, rpmvercmp("1.0~rc1", "1.0"));
    assert_eq!(Ordering::Greater, rpmvercmp("1.0^", "1.0"));
    assert_eq!(Ordering::Greater, rpmvercmp("1.0^git1", "1.0"));
    assert_eq!(Ordering::Greater, rpmvercmp("1.0~~~rc1", "1.0~~~~rc1"));
    assert_eq!(Ordering::Equal, rpmvercmp("1.a.1....", "1a1"));
    assert_eq!(Ordering::Less, rpmvercmp("4.fc34", "5.fc34"));
    assert_eq!(Ordering::Less, rpmvercmp("", "1"));
    assert_eq!(Ordering::Equal, rpmvercmp("...", "+_-"));
}

/// A typical upgrade path sorts the way rpm would install it
#[test]
fn test_upgrade_path_is_ordered() {
    let path = [
        "1.0~alpha1",
        "1.0~beta1",
        "1.0~rc1",
        "1.0~rc2",
        "1.0",
        "1.0^20240101git1",
        "1.0^20240102git1",
        "1.0.1",
        "1.1~rc1",
        "1.1",
        "1.10",
        "2",
    ];
    for (i, a) in path.iter().enumerate() {
        for b in &path[i + 1..] {
            assert_eq!(Ordering::Less, rpmvercmp(a, b), "rpmvercmp({a:?}, {b:?})");
        }
    }

    let mut shuffled = path.to_vec();
    shuffled.reverse();
    shuffled.sort_by(|a, b| rpmvercmp(a, b));
    assert_eq!(path.to_vec(), shuffled);
}

#[test]
fn test_comparators_coexist() {
    let full = VersionComparator::default();
    let no_tilde = VersionComparator::new(CompareFlags::CARET);
    let no_caret = VersionComparator::new(CompareFlags::TILDE);

    assert_eq!(Ordering::Less, full.compare("1.0~rc1", "1.0"));
    assert_eq!(Ordering::Greater, no_tilde.compare("1.0~rc1", "1.0"));
    assert_eq!(Ordering::Less, no_caret.compare("1.0~rc1", "1.0"));

    assert_eq!(Ordering::Greater, full.compare("1.0^", "1.0"));
    assert_eq!(Ordering::Greater, no_tilde.compare("1.0^", "1.0"));
    assert_eq!(Ordering::Equal, no_caret.compare("1.0^", "1.0"));
}

#[test]
fn test_evr_strings() {
    assert_eq!(Ordering::Equal, rpm_evr_compare("0:5.1-4.fc34", "5.1-4.fc34"));
    assert_eq!(Ordering::Less, rpm_evr_compare("5.1-4.fc34", "5.1-5.fc34"));
    assert_eq!(Ordering::Greater, rpm_evr_compare("1:2.0-1", "3.0-1"));
}

#[test]
fn test_package_order() {
    common::init_logging();
    let names: Vec<String> = common::fedora()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(
        vec![
            "bash-5.1-4.fc34.x86_64",
            "bash-5.1-5.fc34.x86_64",
            "bash-completion-1:2.11-2.fc34.noarch",
            "glibc-2.33-5.fc34.i686",
            "glibc-2.33-5.fc34.x86_64",
            "glibc-common-2.33-5.fc34.x86_64",
            "kernel-5.11.12-300.fc34.x86_64",
            "kernel-5.12.0-0.rc5.180.fc35.x86_64",
            "python3-3.9.2-1.fc34.x86_64",
            "python3-3.10.0~a6-2.fc35.x86_64",
            "zsh-5.8-5.fc34.x86_64",
        ],
        names
    );
}
