//! Build script for the in-process driver entry.
//!
//! Only active with the `inproc` feature: compiles the C++ glue exposing
//! the driver's `main` as an unmangled symbol and emits llvm-config-derived
//! link instructions. The default build has no native requirements.

fn main() {
    #[cfg(feature = "inproc")]
    inproc::build_entry();
}

#[cfg(feature = "inproc")]
mod inproc {
    use std::process::Command;

    pub fn build_entry() {
        let llvm_config =
            std::env::var("LLVM_CONFIG").unwrap_or_else(|_| "llvm-config".to_string());

        let include_dir = llvm_config_output(&llvm_config, "--includedir");
        let lib_dir = llvm_config_output(&llvm_config, "--libdir");

        cc::Build::new()
            .cpp(true)
            .std("c++17")
            .file("native/inproc_entry.cc")
            .include(&include_dir)
            .compile("inproc_entry");

        println!("cargo:rustc-link-search=native={}", lib_dir);
        println!("cargo:rustc-link-lib=dylib=clang-cpp");
        println!("cargo:rustc-link-lib=dylib=LLVM");
        println!("cargo:rerun-if-changed=native/inproc_entry.cc");
        println!("cargo:rerun-if-env-changed=LLVM_CONFIG");
    }

    fn llvm_config_output(llvm_config: &str, flag: &str) -> String {
        let output = Command::new(llvm_config)
            .arg(flag)
            .output()
            .unwrap_or_else(|e| panic!("failed to run `{} {}`: {}", llvm_config, flag, e));
        if !output.status.success() {
            panic!(
                "`{} {}` exited with status {:?}",
                llvm_config,
                flag,
                output.status.code()
            );
        }
        String::from_utf8(output.stdout)
            .expect("llvm-config emitted non-UTF-8 output")
            .trim()
            .to_string()
    }
}
