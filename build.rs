use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// Calls whose first argument names an environment variable.
const ENV_READERS: &[&str] = &["var", "var_os", "env_or_path", "env_or_usize", "env_or_string"];

fn source_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut pending = vec![root.to_path_buf()];
    let mut files = Vec::new();
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    Ok(files)
}

fn env_keys_read_in(source: &str, out: &mut BTreeSet<String>) {
    for (start, _) in source.match_indices("(\"FOLIO_") {
        let callee = source[..start]
            .rsplit(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .next()
            .unwrap_or_default();
        if !ENV_READERS.contains(&callee) {
            continue;
        }
        let literal = &source[start + 2..];
        let Some(end) = literal.find('"') else {
            continue;
        };
        let key = &literal[..end];
        if key
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
        {
            out.insert(key.to_string());
        }
    }
}

fn main() {
    let mut keys = BTreeSet::new();
    for file in source_files(Path::new("src")).expect("failed to walk src") {
        if let Ok(source) = fs::read_to_string(&file) {
            env_keys_read_in(&source, &mut keys);
        }
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let mut f = fs::File::create(Path::new(&out_dir).join("folio_env_allowlist.rs"))
        .expect("failed to create allowlist");
    let entries = keys
        .iter()
        .map(|key| format!("    \"{key}\",\n"))
        .collect::<String>();
    write!(
        f,
        "pub const GENERATED_FOLIO_ENV_ALLOWLIST: &[&str] = &[\n{entries}];\n"
    )
    .expect("failed to write allowlist");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src");
}
