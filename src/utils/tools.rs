use log::info;

/// Versions des crates graphiques, injectées par `build.rs`.
pub fn core_dependency_versions() -> [(&'static str, &'static str); 3] {
    [
        ("GL", option_env!("GL_VERSION").unwrap_or("Unknown")),
        ("GLFW", option_env!("GLFW_VERSION").unwrap_or("Unknown")),
        ("glam", option_env!("GLAM_VERSION").unwrap_or("Unknown")),
    ]
}

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    info!("Rust core dependencies");
    for (name, version) in core_dependency_versions() {
        info!("  {:<4} version: {}", name, version);
    }
}
