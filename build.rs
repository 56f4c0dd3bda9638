// build.rs
use cargo_metadata::MetadataCommand;
use std::collections::HashSet;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    // Récupère la metadata du projet
    let metadata = match MetadataCommand::new().exec() {
        Ok(metadata) => metadata,
        Err(err) => {
            // Hors ligne ou sans cargo dans le PATH : les versions resteront "Unknown"
            println!("cargo:warning=cargo metadata unavailable: {err}");
            return;
        }
    };

    // Crates dont on expose la version au runtime (cf. utils::show_rust_core_dependencies)
    let tracked = HashSet::from(["gl", "glfw", "glam"]);

    for package in &metadata.packages {
        if tracked.contains(package.name.as_str()) {
            println!(
                "cargo:rustc-env={}_VERSION={}",
                package.name.to_uppercase(),
                package.version
            );
        }
    }
}
