#[test]
fn cargo_toml_has_release_profile() {
    let cargo_toml = include_str!("../Cargo.toml");
    assert!(
        cargo_toml.contains("[profile.release]"),
        "Cargo.toml must have a [profile.release] section"
    );
    assert!(
        cargo_toml.contains("lto = true"),
        "Release profile must enable LTO"
    );
    assert!(
        cargo_toml.contains("strip = true"),
        "Release profile must strip symbols"
    );
    assert!(
        cargo_toml.contains("codegen-units = 1"),
        "Release profile must use single codegen unit"
    );
}

#[test]
fn libc_is_unix_only() {
    let cargo_toml = include_str!("../Cargo.toml");
    let unix = cargo_toml
        .find("[target.'cfg(unix)'.dependencies]")
        .expect("Cargo.toml must have a unix-only dependency table");
    let libc = cargo_toml.find("libc =").expect("libc must be a dependency");
    assert!(libc > unix, "libc must only be pulled in on unix");
}
