use env_logger::Env;

/// Initializes the process-wide logger. Call once at startup; tests use
/// `try_init` through `init_for_tests` so repeated calls are harmless.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

pub fn init_for_tests() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
