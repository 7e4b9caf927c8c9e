//! Embeds the gzip-compressed tool payloads found in the asset directory.
//!
//! Every `*.gz` file under `assets/` (or `$TRIMMER_ASSET_DIR`) becomes an
//! entry of `EMBEDDED_ASSETS` in `$OUT_DIR/embedded_assets.rs`. Picking the
//! right entry happens at run time.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

fn main() {
    println!("cargo:rerun-if-env-changed=TRIMMER_ASSET_DIR");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let asset_dir = env::var_os("TRIMMER_ASSET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| manifest_dir.join("assets"));
    println!("cargo:rerun-if-changed={}", asset_dir.display());

    let mut entries = String::new();
    if asset_dir.is_dir() {
        let mut payloads: Vec<PathBuf> = WalkDir::new(&asset_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "gz"))
            .collect();
        payloads.sort();

        for path in payloads {
            println!("cargo:rerun-if-changed={}", path.display());
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let absolute = fs::canonicalize(&path).unwrap_or(path);
            writeln!(
                entries,
                "    ({:?}, include_bytes!({:?})),",
                name,
                absolute.display().to_string()
            )
            .expect("write to String");
        }
    }

    let generated = format!(
        "/// Gzip payloads embedded at build time, as `(file name, bytes)`.\n\
         pub static EMBEDDED_ASSETS: &[(&str, &[u8])] = &[\n{entries}];\n"
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    fs::write(out_dir.join("embedded_assets.rs"), generated).expect("write embedded_assets.rs");
}
