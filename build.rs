/// Casement build script.
///
/// The native window backend is Win32-only.  Other targets still build the
/// library, the C surface and the tests over the headless backend; say so
/// loudly rather than silently producing a shell that never opens a window.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=casement: no native window backend for \
             target_os = {target_os:?}; using the headless backend"
        );
    }

    // Only re-run the build script when it changes.
    println!("cargo:rerun-if-changed=build.rs");
}
