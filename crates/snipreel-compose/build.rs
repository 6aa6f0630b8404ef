use std::env;
use std::path::PathBuf;

use syntect::dumps::dump_to_uncompressed_file;
use two_face::syntax;

fn main() {
    write_syntax_pack().expect("failed to write the syntax pack");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Dump the bundled grammars, TypeScript and TSX included, so the crate can
/// load them without parsing syntax definitions at runtime.
fn write_syntax_pack() -> Result<(), String> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(|err| err.to_string())?);
    let syntax_set = syntax::extra_newlines();
    let pack_path = out_dir.join("syntaxes.packdump");
    dump_to_uncompressed_file(&syntax_set, &pack_path)
        .map_err(|err| format!("failed to encode syntax set: {err}"))?;

    println!("cargo:rustc-env=SYNTAX_PACK_FILE={}", pack_path.display());
    Ok(())
}
