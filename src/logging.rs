use cfg_if::cfg_if;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::config::LoggingSettings;

/// `RUST_LOG` wins over the configured directive
fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter))
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Browser console only. `settings.file` has nowhere to go here.
        pub fn init(settings: &LoggingSettings) {
            let console = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());
            let installed = tracing_subscriber::registry()
                .with(env_filter(settings))
                .with(console)
                .try_init()
                .is_ok();

            if installed {
                #[cfg(feature = "console_error_panic_hook")]
                console_error_panic_hook::set_once();
            }
        }
    } else {
        use std::ffi::OsStr;
        use std::path::Path;

        use once_cell::sync::OnceCell;
        use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
        use tracing_subscriber::fmt;

        static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

        /// Compact stderr output, plus a daily-rolling copy of it when
        /// `settings.file` is set. Only the first call installs anything;
        /// it also routes panics through `tracing`.
        pub fn init(settings: &LoggingSettings) {
            let (file_writer, guard) = match settings.file.as_deref() {
                Some(path) => {
                    let (writer, guard) = rolling_writer(path);
                    (Some(writer), Some(guard))
                }
                None => (None, None),
            };
            let file_layer = file_writer.map(|writer| {
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .compact()
            });
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .compact();

            let installed = tracing_subscriber::registry()
                .with(env_filter(settings))
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .is_ok();
            if !installed {
                return;
            }
            if let Some(guard) = guard {
                let _ = FILE_GUARD.set(guard);
            }

            std::panic::set_hook(Box::new(|info| {
                let payload = info.payload();
                let message = payload
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("<non-string panic>");
                let location = info
                    .location()
                    .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
                    .unwrap_or_default();
                let backtrace = std::backtrace::Backtrace::force_capture();
                tracing::error!(%location, %backtrace, "panic: {}", message);
            }));
        }

        fn rolling_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path.file_name().unwrap_or(OsStr::new("holy-engine.log"));
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name))
        }
    }
}
