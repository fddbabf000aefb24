//! Generate `include/todo_ffi.h` from the `extern "C"` surface.

use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let out_dir = crate_dir.join("include");

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        println!("cargo:warning=cannot create {}: {e}", out_dir.display());
        return;
    }

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("TODO_FFI_H")
        .with_cpp_compat(true)
        .generate();

    match bindings {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("todo_ffi.h"));
        }
        Err(e) => println!("cargo:warning=cbindgen failed, header not written: {e}"),
    }
}
