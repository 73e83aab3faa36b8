//! Tracing configuration for hosts embedding the engine.
//!
//! Output format is chosen by `JAVELIN_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented span hierarchy via `tracing-tree`, handy when following
//!   a scope query or a rewrite session step by step
//! - `json`: one JSON object per event
//!
//! ```bash
//! JAVELIN_LOG=debug JAVELIN_LOG_FORMAT=tree cargo test -p javelin-rewrite
//! JAVELIN_LOG="javelin_binder=trace,javelin_rewrite=debug" my-host
//! ```
//!
//! Nothing is installed unless `JAVELIN_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `JAVELIN_LOG_FORMAT` value; unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("JAVELIN_LOG_FORMAT").unwrap_or_default())
    }
}

/// `JAVELIN_LOG` wins over `RUST_LOG`; both use the `RUST_LOG` syntax.
fn build_filter() -> Option<EnvFilter> {
    if let Ok(value) = std::env::var("JAVELIN_LOG") {
        return Some(EnvFilter::builder().parse_lossy(value));
    }
    std::env::var("RUST_LOG")
        .is_ok()
        .then(EnvFilter::from_default_env)
}

/// Install the global subscriber, writing to stderr.
///
/// Returns `false` when logging was not requested or another subscriber is
/// already installed.
pub fn init_tracing() -> bool {
    let Some(filter) = build_filter() else {
        return false;
    };

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init().is_ok()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init().is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;
