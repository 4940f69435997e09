fn main() {
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rerun-if-changed=.env");

    // WIFI_SSID and WIFI_PASSWORD come from .env or the build environment
    if let Err(e) = dotenv_build::output(dotenv_build::Config::default()) {
        println!("cargo:warning=failed to load .env: {e}");
    }

    let version = format!(
        "{}+{}",
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().format("%Y%m%d%H%M")
    );
    println!("cargo:rustc-env=BUILD_VERSION={version}");
}
