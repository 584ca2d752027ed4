fn main() {
    // The base URL and UI origin are baked in with `option_env!`; rebuild when they change.
    println!("cargo:rerun-if-env-changed=PROBE_API_BASE_URL");
    println!("cargo:rerun-if-env-changed=PROBE_UI_ORIGIN");
}
