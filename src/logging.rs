use crate::utils::{truncate_str, wrap_text};
use crate::Post;
use std::fmt::Display;
use tracing::{debug, error};

#[cfg(feature = "logging")]
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_appender::rolling::{RollingFileAppender, Rotation};
#[cfg(feature = "logging")]
use tracing_subscriber::{
    fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[cfg(feature = "logging")]
#[derive(Debug)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
    pub console_output: bool,
    pub file_output: bool,
}

#[cfg(feature = "logging")]
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            log_level: "info".into(),
            console_output: true,
            file_output: true,
        }
    }
}

const CARD_WIDTH: usize = 80;
const CONTENT_WIDTH: usize = CARD_WIDTH - 2;

/// Logs a boxed summary of a normalized post at debug level.
pub fn log_post_card(post: &Post) {
    let horizontal_line = "═".repeat(CARD_WIDTH - 2);

    debug!(
        "\n╔{}╗\n\
         URL: {}\n\
         Author: {}\n\
         Date: {}\n\
         Likes: {}  Comments: {}  Images: {}\n\
         Content: {}\n\
         ╚{}╝",
        horizontal_line,
        wrap_text(&post.source_url, CONTENT_WIDTH - 5),
        truncate_str(&post.author, CONTENT_WIDTH - 8),
        post.date,
        post.like_count,
        post.comment_count,
        post.images.len(),
        wrap_text(&truncate_str(&post.content, 400), CONTENT_WIDTH - 9),
        horizontal_line,
    );
}

pub fn log_error_card<E: Display + std::error::Error>(url: &str, error: &E) {
    const ERROR_CARD_WIDTH: usize = 70;
    const ERROR_CONTENT_WIDTH: usize = ERROR_CARD_WIDTH - 8;

    let top_bottom = "═".repeat(ERROR_CARD_WIDTH - 2);
    let middle = "─".repeat(ERROR_CARD_WIDTH - 2);

    let mut error_details = error.to_string();
    if let Some(source) = error.source() {
        error_details = format!("{error_details} (cause: {source})");
    }

    error!(
        "\n╔═{}═╗\n\
         ║ URL: {:<width$} ║\n\
         ║{}║\n\
         ║ Error: {:<width$} ║\n\
         ╚═{}═╝",
        top_bottom,
        truncate_str(url, ERROR_CONTENT_WIDTH),
        middle,
        truncate_str(&error_details, ERROR_CONTENT_WIDTH),
        top_bottom,
        width = ERROR_CONTENT_WIDTH
    );
}

/// Installs a global subscriber with console and/or daily-rolling file output.
///
/// `RUST_LOG` takes precedence over `config.log_level`.
#[cfg(feature = "logging")]
pub fn setup_logging(config: LogConfig) -> std::io::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let mut layers = Vec::new();

    if config.console_output {
        let console_layer = subscriber_fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty();
        layers.push(console_layer.boxed());
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir)?;

        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "post-reply.log");

        let file_layer = subscriber_fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_writer(file_appender);

        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    debug!("Logging system initialized with config: {:?}", config);
    Ok(())
}
