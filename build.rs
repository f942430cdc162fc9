//! Build script for proto compilation.
//!
//! Compiles `proto/provider.proto` into the `hemmer.provider.v1` module that
//! `src/lib.rs` pulls in with `tonic::include_proto!`. A vendored `protoc` is
//! used so the build does not depend on a system install.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let protoc = protoc_bin_vendored::protoc_bin_path()
        .map_err(|e| format!("vendored protoc unavailable: {e}"))?;
    std::env::set_var("PROTOC", protoc);

    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(&["proto/provider.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/provider.proto");

    Ok(())
}
