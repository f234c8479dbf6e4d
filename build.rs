use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(lanefft_simd, values(none(), \"sse\", \"neon\"))");

    if env::var_os("CARGO_FEATURE_SIMD").is_none() {
        return;
    }

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let target_features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let has_feature = |name: &str| target_features.split(',').any(|f| f == name);

    let backend = match target_arch.as_str() {
        // SSE is part of the x86_64 baseline.
        "x86_64" => Some("sse"),
        "x86" if has_feature("sse") => Some("sse"),
        "aarch64" if has_feature("neon") => Some("neon"),
        _ => None,
    };

    // The bare name gates the lane type itself, the valued one picks the module.
    if let Some(backend) = backend {
        println!("cargo:rustc-cfg=lanefft_simd");
        println!("cargo:rustc-cfg=lanefft_simd=\"{backend}\"");
    }
}
