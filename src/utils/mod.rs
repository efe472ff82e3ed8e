pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: &str = "warn,finance_control=info";

/// Installs the global fmt subscriber. Output goes to stderr so it never
/// mixes with rendered tables.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter(from_env.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// `RUST_LOG` wins when set; the crate's own default applies otherwise.
fn env_filter(from_env: Option<&str>) -> EnvFilter {
    let directives = from_env
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_DIRECTIVES);
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}
