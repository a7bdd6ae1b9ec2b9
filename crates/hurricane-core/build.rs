// File: crates/hurricane-core/build.rs
// Summary: Links the Windows registry API that Skia's font manager pulls in.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW / RegQueryInfoKeyW for system font discovery
        println!("cargo:rustc-link-lib=advapi32");
    }
}
