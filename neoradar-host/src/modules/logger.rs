use neoradar_sdk::logger::{LogLevel, LoggerApi};

/// Forwards plugin log lines to `tracing`, tagged with the plugin name
#[derive(Debug, Clone)]
pub struct TracingLogger {
    plugin: String,
}

impl TracingLogger {
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
        }
    }

    pub fn plugin(&self) -> &str {
        &self.plugin
    }
}

impl LoggerApi for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(plugin = %self.plugin, "{message}"),
            LogLevel::Info => tracing::info!(plugin = %self.plugin, "{message}"),
            LogLevel::Warning => tracing::warn!(plugin = %self.plugin, "{message}"),
            LogLevel::Error => tracing::error!(plugin = %self.plugin, "{message}"),
            _ => tracing::info!(plugin = %self.plugin, level = %level, "{message}"),
        }
    }
}
