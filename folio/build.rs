const PRETTY_ENV: &str = "RUST_LOG_PRETTY";

fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed={PRETTY_ENV}");
    if matches!(std::env::var(PRETTY_ENV).as_deref(), Ok("1")) {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
