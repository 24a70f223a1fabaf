use log::error;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_FILE_PREFIX: &str = "almanac.log";
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// 覆盖配置中过滤指令的环境变量，语法同 `RUST_LOG`
pub const LOG_ENV: &str = "ALMANAC_LOG";

/// 日志初始化错误
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log directive: {0}")]
    Directive(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// 配置文件中的 `logging` 段，所有字段可省略
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: Option<String>,
    /// `EnvFilter` 指令，如 `almanac_core=debug,info`
    pub directives: Option<String>,
    pub console: Option<bool>,
    pub file: Option<bool>,
    pub dir: Option<PathBuf>,
    pub file_prefix: Option<String>,
    pub max_files: Option<usize>,
    pub time_format: Option<String>,
}

/// 日志配置构建器
///
/// 控制台输出与按天滚动的文件输出可分别开关；配置了 `max_files` 时，
/// 初始化会立即清理一次旧文件，并在后台按间隔持续清理。
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// 日志文件前缀 (实际文件名会包含日期，如 almanac.log.2023-10-01)
    file_prefix: String,
    /// 日志存储目录
    log_dir: PathBuf,
    /// 时间格式字符串 (基于 Chrono 格式)
    time_format: String,
    /// 过滤指令，单独的级别（`info`）也是合法指令
    directives: String,
    /// 是否启用控制台输出
    console: bool,
    /// 是否启用文件输出
    file: bool,
    /// 保留的最大日志文件数量
    max_files: Option<usize>,
    /// 清理任务检查间隔
    cleanup_interval: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            directives: "info".to_string(),
            console: true,
            file: false,
            max_files: None,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

impl LoggerConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置段构建，未给出的字段保持默认值
    pub fn from_settings(settings: &LogSettings) -> Self {
        let mut config = Self::default();
        if let Some(level) = &settings.level {
            config.directives = level.clone();
        }
        if let Some(directives) = &settings.directives {
            config.directives = directives.clone();
        }
        if let Some(console) = settings.console {
            config.console = console;
        }
        if let Some(file) = settings.file {
            config.file = file;
        }
        if let Some(dir) = &settings.dir {
            config.log_dir = dir.clone();
        }
        if let Some(prefix) = &settings.file_prefix {
            config.file_prefix = prefix.clone();
        }
        if let Some(format) = &settings.time_format {
            config.time_format = format.clone();
        }
        config.max_files = settings.max_files.or(config.max_files);
        config
    }

    /// 设置日志文件前缀
    ///
    /// 滚动日志文件名为 `<prefix>.<yyyy-MM-dd>`。
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// 设置日志存储目录
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// 设置日志时间戳格式
    ///
    /// 格式参考 chrono::format::strftime
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// 设置全局日志级别，等同于只含级别的过滤指令
    pub fn level(self, level: impl Into<String>) -> Self {
        self.directives(level)
    }

    /// 设置 `EnvFilter` 过滤指令，如 `almanac_core=debug,info`
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = directives.into();
        self
    }

    /// 启用或禁用控制台日志输出
    pub fn enable_console(mut self, enable: bool) -> Self {
        self.console = enable;
        self
    }

    /// 启用或禁用文件日志输出
    pub fn enable_file(mut self, enable: bool) -> Self {
        self.file = enable;
        self
    }

    /// 设置保留的最大日志文件数量
    ///
    /// 超过此数量的旧日志文件将被自动删除。
    pub fn max_files(mut self, count: usize) -> Self {
        self.max_files = Some(count);
        self
    }

    /// 设置日志清理任务的检查间隔
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// 解析过滤指令；设置了 [`LOG_ENV`] 时以环境变量为准
    pub fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| self.directives.clone());
        Ok(EnvFilter::try_new(directives)?)
    }

    /// 初始化日志系统
    ///
    /// 返回的 `WorkerGuard` 必须被持有，否则文件中的异步日志可能丢失。
    pub fn init(self) -> Result<Option<WorkerGuard>, LoggerError> {
        let filter = self.build_filter()?;
        let console_layer = self.build_console_layer();
        let (file_layer, guard) = self.build_file_layer();

        Registry::default()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        self.spawn_cleanup_task_if_needed();
        Ok(guard)
    }

    /// 构建控制台输出层
    fn build_console_layer<S>(&self) -> Option<impl Layer<S>>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        self.console.then(|| {
            fmt::layer()
                .with_timer(ChronoLocal::new(self.time_format.clone()))
                .with_writer(std::io::stdout)
        })
    }

    /// 构建文件输出层
    fn build_file_layer<S>(&self) -> (Option<impl Layer<S>>, Option<WorkerGuard>)
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        if !self.file {
            return (None, None);
        }

        let appender = tracing_appender::rolling::daily(&self.log_dir, &self.file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_timer(ChronoLocal::new(self.time_format.clone()))
            .with_ansi(false)
            .with_writer(non_blocking);
        (Some(layer), Some(guard))
    }

    /// 配置了 `max_files` 时先清理一次，再启动后台清理任务
    fn spawn_cleanup_task_if_needed(&self) {
        let Some(max_files) = self.max_files.filter(|_| self.file) else {
            return;
        };

        prune_and_log(&self.log_dir, &self.file_prefix, max_files);

        let log_dir = self.log_dir.clone();
        let file_prefix = self.file_prefix.clone();
        let interval = self.cleanup_interval;
        std::thread::spawn(move || {
            loop {
                std::thread::sleep(interval);
                prune_and_log(&log_dir, &file_prefix, max_files);
            }
        });
    }
}

fn prune_and_log(log_dir: &Path, file_prefix: &str, keep: usize) {
    if let Err(e) = prune_rolled_files(log_dir, file_prefix, keep) {
        error!("Failed to prune log directory {}: {}", log_dir.display(), e);
    }
}

/// 保留最新的 `keep` 个以 `file_prefix` 开头的日志文件，返回删除的数量
///
/// 依赖日期后缀按字典序即时间序（`.2023-10-01`）。
pub fn prune_rolled_files(
    log_dir: &Path,
    file_prefix: &str,
    keep: usize,
) -> std::io::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let mut log_files: Vec<(PathBuf, String)> = std::fs::read_dir(log_dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let name = entry.file_name().into_string().ok()?;
            name.starts_with(file_prefix).then(|| (entry.path(), name))
        })
        .collect();

    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    let mut removed = 0;
    for (path, _) in log_files.iter().skip(keep) {
        match std::fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) => error!("Failed to remove old log file {}: {}", path.display(), e),
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "almanac_logger_{}_{}_{}",
            name,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = temp_dir("prune");
        for date in ["2023-10-20", "2023-10-21", "2023-10-22", "2023-10-23"] {
            File::create(dir.join(format!("almanac.log.{date}"))).unwrap();
        }
        File::create(dir.join("other.txt")).unwrap();

        assert_eq!(prune_rolled_files(&dir, "almanac.log", 2).unwrap(), 2);

        let mut left: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, ["almanac.log.2023-10-22", "almanac.log.2023-10-23", "other.txt"]);

        assert_eq!(prune_rolled_files(&dir.join("missing"), "almanac.log", 1).unwrap(), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_from_settings_overrides_defaults() {
        let settings = LogSettings {
            level: Some("debug".to_string()),
            file: Some(true),
            dir: Some(PathBuf::from("/var/log/almanac")),
            max_files: Some(7),
            ..LogSettings::default()
        };
        let config = LoggerConfig::from_settings(&settings);
        assert_eq!(config.directives, "debug");
        assert!(config.console);
        assert!(config.file);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/almanac"));
        assert_eq!(config.file_prefix, DEFAULT_FILE_PREFIX);
        assert_eq!(config.max_files, Some(7));

        let with_directives = LogSettings {
            directives: Some("almanac_core=trace,warn".to_string()),
            ..settings
        };
        assert_eq!(
            LoggerConfig::from_settings(&with_directives).directives,
            "almanac_core=trace,warn"
        );
    }

    #[test]
    fn test_invalid_directive() {
        let config = LoggerConfig::new().directives("almanac_core=notalevel");
        assert!(matches!(config.build_filter(), Err(LoggerError::Directive(_))));
    }
}
