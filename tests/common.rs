use rpm_repos::{Checksum, Package, PackageCollection};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A package with a made up md5 checksum derived from its NVRA
pub fn package(name: &str, epoch: i64, version: &str, release: &str, arch: &str) -> Package {
    let pkg = Package::new(name, epoch, version, release, arch);
    let digest = rpm_repos::ChecksumKind::Md5.hex_digest(pkg.nvra().as_bytes());
    pkg.with_checksum(Checksum::with_kind(rpm_repos::ChecksumKind::Md5, digest))
}

/// A small, unsorted snapshot of a Fedora-like repository
pub fn fedora_packages() -> Vec<Package> {
    vec![
        package("zsh", 0, "5.8", "5.fc34", "x86_64"),
        package("bash", 0, "5.1", "5.fc34", "x86_64"),
        package("bash-completion", 1, "2.11", "2.fc34", "noarch"),
        package("glibc", 0, "2.33", "5.fc34", "x86_64"),
        package("glibc", 0, "2.33", "5.fc34", "i686"),
        package("glibc-common", 0, "2.33", "5.fc34", "x86_64"),
        package("bash", 0, "5.1", "4.fc34", "x86_64"),
        package("kernel", 0, "5.11.12", "300.fc34", "x86_64"),
        package("kernel", 0, "5.12.0", "0.rc5.180.fc35", "x86_64"),
        package("python3", 0, "3.9.2", "1.fc34", "x86_64"),
        package("python3", 0, "3.10.0~a6", "2.fc35", "x86_64"),
    ]
}

pub fn fedora() -> PackageCollection {
    let mut collection = PackageCollection::new(fedora_packages()).with_origin("fedora");
    collection.sort();
    collection
}
