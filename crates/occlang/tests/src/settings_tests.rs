use std::path::PathBuf;

use super::*;

fn unique_temp_dir(name: &str) -> PathBuf {
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("valid clock")
        .as_nanos();
    std::env::temp_dir().join(format!("occlang-settings-{name}-{}-{nonce}", std::process::id()))
}

#[test]
fn defaults_invoke_plain_clang() {
    let settings = ParserSettings::default();
    assert_eq!(settings.clang_path, "clang");
    assert!(settings.include_paths.is_empty());
    assert!(settings.extra_flags.is_empty());
}

#[test]
fn load_settings_reads_and_normalizes_the_file() {
    let dir = unique_temp_dir("load");
    std::fs::create_dir_all(&dir).expect("temp dir");
    let toml_path = dir.join("occlang.toml");
    std::fs::write(
        &toml_path,
        r#"
clang_path = "  clang-18  "
include_paths = ["/proj/include", "  ", "/proj/vendor "]
extra_flags = ["-std=c++20"]
"#,
    )
    .expect("write toml");

    let settings = load_settings(&toml_path).expect("settings parse");
    assert_eq!(settings.clang_path, "clang-18");
    assert_eq!(settings.include_paths, ["/proj/include", "/proj/vendor"]);
    assert_eq!(settings.extra_flags, ["-std=c++20"]);

    let _ = std::fs::remove_file(&toml_path);
    let _ = std::fs::remove_dir(&dir);
}

#[test]
fn load_settings_rejects_malformed_toml() {
    let dir = unique_temp_dir("malformed");
    std::fs::create_dir_all(&dir).expect("temp dir");
    let toml_path = dir.join("occlang.toml");
    std::fs::write(&toml_path, "include_paths = \"not-a-list\"").expect("write toml");

    assert!(load_settings(&toml_path).is_none());

    let _ = std::fs::remove_file(&toml_path);
    let _ = std::fs::remove_dir(&dir);
}

#[test]
fn discovery_walks_ancestors_from_the_source_file() {
    let root = unique_temp_dir("discover");
    let nested = root.join("src").join("deep");
    std::fs::create_dir_all(&nested).expect("dirs");
    let toml_path = root.join("occlang.toml");
    std::fs::write(&toml_path, "extra_flags = [\"-std=c++17\"]").expect("write toml");
    let source = nested.join("a.cpp");
    std::fs::write(&source, "int main() { return 0; }\n").expect("write source");

    let found = find_settings_toml(&source).expect("toml discovered");
    assert_eq!(found, toml_path);

    let settings = ParserSettings::for_source(&source);
    assert_eq!(settings.extra_flags, ["-std=c++17"]);
    assert_eq!(settings.clang_path, "clang");

    let _ = std::fs::remove_file(&source);
    let _ = std::fs::remove_file(&toml_path);
    let _ = std::fs::remove_dir(&nested);
    let _ = std::fs::remove_dir(root.join("src"));
    let _ = std::fs::remove_dir(&root);
}
