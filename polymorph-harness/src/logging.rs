use std::fs::File;
use std::path::PathBuf;
use std::sync::Once;

use anyhow::Context;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "polymorph=trace"). Output goes to `file` because the terminal is taken by
/// the UI.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            file: std::env::temp_dir().join("polymorph-harness.log"),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        let file = match File::create(&config.file)
            .with_context(|| format!("creating log file {}", config.file.display()))
        {
            Ok(file) => file,
            Err(err) => {
                result = Err(err);
                return;
            }
        };

        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder
            .target(env_logger::Target::Pipe(Box::new(file)))
            .write_style(env_logger::WriteStyle::Never)
            .init();

        log::debug!("logging initialized");
    });

    result
}
