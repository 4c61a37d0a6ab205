use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/dispatch.proto");
    println!("cargo:rerun-if-changed=proto/dispatch_generated.rs");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let generated = out_dir.join("dispatch.rs");

    // Prefer compiling the proto with protoc when it is available. In offline
    // environments without a `protoc` binary, fall back to the checked-in
    // vendored output so the crate still builds. Either way `$OUT_DIR/dispatch.rs`
    // ends up populated for `tonic::include_proto!("dispatch")`.
    match tonic_build::compile_protos("proto/dispatch.proto") {
        Ok(()) => Ok(()),
        Err(_) => {
            std::fs::copy("proto/dispatch_generated.rs", &generated)?;
            Ok(())
        }
    }
}
