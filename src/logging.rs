use std::sync::Once;

static INIT: Once = Once::new();

/// Tag under which the plugin logs on Android
pub const LOG_TAG: &str = "SaveImageGallery";

/// Installs the platform logger. Safe to call more than once.
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(target_os = "android")]
        {
            android_logger::init_once(
                android_logger::Config::default()
                    .with_max_level(log::LevelFilter::Debug)
                    .with_tag(LOG_TAG),
            );
        }

        #[cfg(not(target_os = "android"))]
        {
            // Host applications may already own a logger
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("info"),
            )
            .try_init();
        }

        log::debug!("{} logging initialized", LOG_TAG);
    });
}
