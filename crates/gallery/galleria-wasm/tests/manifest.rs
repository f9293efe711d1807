//! Runtime dependencies of the adapter stay limited to what `src/` uses.

const MANIFEST: &str = include_str!("../Cargo.toml");
const SOURCES: &[&str] = &[include_str!("../src/lib.rs"), include_str!("../src/logging.rs")];

fn section(name: &str) -> Vec<&'static str> {
    let header = format!("[{name}]");
    MANIFEST
        .lines()
        .skip_while(|l| l.trim() != header)
        .skip(1)
        .take_while(|l| !l.trim_start().starts_with('['))
        .filter_map(|l| l.split('=').next())
        .map(str::trim)
        .filter(|k| !k.is_empty() && !k.starts_with('#'))
        .collect()
}

#[test]
fn runtime_dependencies_are_used_by_sources() {
    let deps = section("dependencies");
    assert!(deps.contains(&"wasm-bindgen"));
    for dep in deps {
        let path = dep.replace('-', "_");
        assert!(
            SOURCES.iter().any(|s| s.contains(&format!("{path}::"))
                || s.contains(&format!("use {path}"))
                || s.contains(&format!("extern crate {path}"))),
            "{dep} is listed but unused"
        );
    }
}

#[test]
fn serde_json_is_test_only() {
    assert!(!section("dependencies").contains(&"serde_json"));
    assert!(section("dev-dependencies").contains(&"serde_json"));
}
