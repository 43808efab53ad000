use std::fmt::{Arguments, Display};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    level: LogLevel,
    module: String,
    message: String,
    time: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: String, message: String) -> Self {
        Self {
            level,
            module,
            message,
            time: Utc::now(),
        }
    }
    pub fn level(&self) -> LogLevel {
        self.level
    }
    pub fn module(&self) -> &str {
        &self.module
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Single line as written by [`Logger::log`], newline included.
    pub fn to_line(&self) -> String {
        format!("{}[{}][{}]: {}\n",
                self.time.to_rfc3339(),
                self.level,
                self.module,
                self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub file_path: Option<String>,
    pub file_prefix: String,
    pub file_suffix: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warning,
            file_path: None,
            file_prefix: "ComplexLog".to_string(),
            file_suffix: ".log".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

pub struct Logger {
    level: LogLevel,
    sink: Mutex<Box<dyn Write + Send>>,
    log_file_name: Option<String>,
}

impl Logger {
    /// Opens the sink described by `config`: a fresh timestamped file under
    /// `file_path` when one is given, stderr otherwise.
    pub fn new(config: &LoggerConfig) -> io::Result<Self> {
        match &config.file_path {
            Some(dir) => {
                let path = Path::new(dir.as_str());
                if !path.exists() {
                    fs::create_dir_all(path)?;
                } else if !path.is_dir() {
                    return Err(io::Error::new(io::ErrorKind::InvalidInput,
                                              format!("log path {} is not a directory", dir)));
                }
                let date_str = Utc::now().format("%Y-%m-%dT%H-%M-%S%.6f");
                let file_name = format!("{}/{}_{}{}",
                                        dir,
                                        config.file_prefix,
                                        date_str,
                                        config.file_suffix);
                let file = fs::File::create(file_name.as_str())?;
                Ok(Self {
                    level: config.level,
                    sink: Mutex::new(Box::new(file)),
                    log_file_name: Some(file_name),
                })
            }
            None => Ok(Self::with_writer(config.level, Box::new(io::stderr()))),
        }
    }

    pub fn with_writer(level: LogLevel, writer: Box<dyn Write + Send>) -> Self {
        Self {
            level,
            sink: Mutex::new(writer),
            log_file_name: None,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn log_file_name(&self) -> Option<&str> {
        self.log_file_name.as_deref()
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    pub fn log(&self, entry: &LogEntry) -> io::Result<()> {
        if !self.enabled(entry.level) {
            return Ok(());
        }
        let mut sink = self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sink.write_all(entry.to_line().as_bytes())?;
        sink.flush()
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger. Only the first call wins; the rejected
/// logger is handed back.
pub fn install(logger: Logger) -> Result<(), Logger> {
    LOGGER.set(logger)
}

pub fn installed() -> Option<&'static Logger> {
    LOGGER.get()
}

#[doc(hidden)]
pub fn dispatch(level: LogLevel, module: &str, message: Arguments<'_>) {
    if let Some(logger) = LOGGER.get() {
        if logger.enabled(level) {
            let entry = LogEntry::new(level, module.to_string(), message.to_string());
            // a broken sink must never turn into an arithmetic failure
            let _ = logger.log(&entry);
        }
    }
}

#[macro_export]
macro_rules! log {
    ($level:expr, $module:expr, $($arg:tt)+) => {
        $crate::dispatch($level, $module, format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_level_filter() {
        let buffer = SharedBuffer::default();
        let logger = Logger::with_writer(LogLevel::Warning, Box::new(buffer.clone()));
        assert_eq!(logger.level(), LogLevel::Warning);
        logger.log(&LogEntry::new(LogLevel::Info, "Main".to_string(), "This is an info message.".to_string())).unwrap();
        logger.log(&LogEntry::new(LogLevel::Error, "Main".to_string(), "This is an error message.".to_string())).unwrap();
        let contents = buffer.contents();
        assert!(!contents.contains("info message"));
        assert!(contents.contains("[Error][Main]: This is an error message.\n"));
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_level_order() {
        assert!(LogLevel::Emergency < LogLevel::Error);
        assert!(LogLevel::Warning < LogLevel::Debug);
        assert_eq!(LogLevel::Notice.to_string(), "Notice");
    }

    #[test]
    fn test_config_from_json() {
        let config = LoggerConfig::from_json(r#"{"level": "Debug", "file_prefix": "roots"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.file_prefix, "roots");
        assert_eq!(config.file_suffix, ".log");
        assert!(config.file_path.is_none());
        assert!(LoggerConfig::from_json(r#"{"level": "Loud"}"#).is_err());
    }

    #[test]
    fn test_file_logger() {
        let dir = std::env::temp_dir().join(format!("complex_logger_{}", Utc::now().timestamp_nanos_opt().unwrap_or_default()));
        let config = LoggerConfig {
            level: LogLevel::Info,
            file_path: Some(dir.to_string_lossy().to_string()),
            ..LoggerConfig::default()
        };
        let logger = Logger::new(&config).unwrap();
        logger.log(&LogEntry::new(LogLevel::Notice, "file".to_string(), "written".to_string())).unwrap();
        let file_name = logger.log_file_name().unwrap().to_string();
        assert!(file_name.ends_with(".log"));
        let contents = fs::read_to_string(&file_name).unwrap();
        assert!(contents.contains("[Notice][file]: written"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_entry_serialize() {
        let entry = LogEntry::new(LogLevel::Alert, "serde".to_string(), "payload".to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "Alert");
        assert_eq!(json["module"], "serde");
        assert_eq!(json["message"], "payload");
    }

    #[test]
    fn test_installed_logger() {
        let buffer = SharedBuffer::default();
        assert!(install(Logger::with_writer(LogLevel::Error, Box::new(buffer.clone()))).is_ok());
        assert!(install(Logger::with_writer(LogLevel::Debug, Box::new(io::sink()))).is_err());
        log!(LogLevel::Critical, "macro", "value {}", 42);
        log!(LogLevel::Debug, "macro", "hidden");
        let contents = buffer.contents();
        assert!(contents.contains("[Critical][macro]: value 42"));
        assert!(!contents.contains("hidden"));
        assert_eq!(installed().map(Logger::level), Some(LogLevel::Error));
    }
}
