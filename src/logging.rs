use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global fmt subscriber; `RUST_LOG` overrides the default level
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spend_dashboard=info,dashboard_server=info,tower_http=info"));

        fmt().with_env_filter(filter).init();
    });
}
