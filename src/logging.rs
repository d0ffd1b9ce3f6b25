use env_logger::Env;

/// Initializes the process-wide logger. Safe to call more than once; only
/// the first call takes effect. The embedding application should call this
/// once at startup; tests may call it to see log output.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .ok();
}
