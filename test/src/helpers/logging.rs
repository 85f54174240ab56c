/// Installs `env_logger` once per test binary. `RUST_LOG` overrides the
/// default level.
pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .is_test(true)
        .try_init()
        .ok();
}
