use dotenvy::dotenv;
use std::sync::Once;

static INIT: Once = Once::new();

/// Loads `.env`, mutes outbound snapshots unless a test opts in, and routes logs to the
/// test harness.
pub fn setup_test_env() {
    INIT.call_once(|| {
        dotenv().ok();
        if std::env::var("NOTIFY_ENABLED").is_err() {
            std::env::set_var("NOTIFY_ENABLED", "false");
        }
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
