// src/log.rs
//
// Short logging macros over `tracing`. The library only emits events;
// installing a subscriber is the binary's job (`init`, behind the `cli` feature).

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

#[cfg(feature = "cli")]
pub use subscriber::init;

#[cfg(feature = "cli")]
mod subscriber {
    use std::fs::OpenOptions;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;

    use tracing_subscriber::EnvFilter;

    fn level_for(verbosity: u8) -> &'static str {
        match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Install the global subscriber. `RUST_LOG` wins over `verbosity`.
    /// With `log_file`, lines are appended to that file instead of stderr.
    pub fn init(verbosity: u8, log_file: Option<&Path>) -> io::Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);

        // A second init (tests, embedding) keeps the first subscriber.
        match log_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let _ = builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            None => {
                let _ = builder.with_writer(io::stderr).try_init();
            }
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::level_for;

        #[test]
        fn verbosity_maps_to_levels() {
            assert_eq!(level_for(0), "warn");
            assert_eq!(level_for(1), "info");
            assert_eq!(level_for(5), "debug");
        }
    }
}
