use {
    crate::utils::oserror::OsError,
    log::{Level, Log, Metadata, Record, SetLoggerError},
    std::{
        cell::RefCell,
        io::Write,
        path::{Path, PathBuf},
        sync::{
            Arc,
            atomic::{AtomicU32, Ordering::Relaxed},
        },
        time::SystemTime,
    },
    thiserror::Error,
    uapi::{Fd, OwnedFd, c},
};

thread_local! {
    static BUFFER: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Could not dup stderr")]
    DupStderr(#[source] OsError),
    #[error("Could not open the log file {}", .0.display())]
    OpenFile(PathBuf, #[source] OsError),
    #[error("A logger is already installed")]
    AlreadyInstalled(#[source] SetLoggerError),
}

pub struct Logger {
    level: AtomicU32,
    path: Option<PathBuf>,
    file: OwnedFd,
}

impl Logger {
    pub fn install_stderr(level: Level) -> Result<Arc<Self>, LoggerError> {
        let file = uapi::fcntl_dupfd_cloexec(2, 0)
            .map_err(|e| LoggerError::DupStderr(e.into()))?;
        Self::install(level, None, file)
    }

    pub fn install_file(level: Level, path: &Path) -> Result<Arc<Self>, LoggerError> {
        let file = uapi::open(
            path,
            c::O_CREAT | c::O_APPEND | c::O_CLOEXEC | c::O_WRONLY,
            0o644,
        )
        .map_err(|e| LoggerError::OpenFile(path.to_path_buf(), e.into()))?;
        Self::install(level, Some(path.to_path_buf()), file)
    }

    fn install(level: Level, path: Option<PathBuf>, file: OwnedFd) -> Result<Arc<Self>, LoggerError> {
        let slf = Arc::new(Self {
            level: AtomicU32::new(level as _),
            path,
            file,
        });
        log::set_boxed_logger(Box::new(LogWrapper {
            logger: slf.clone(),
        }))
        .map_err(LoggerError::AlreadyInstalled)?;
        log::set_max_level(level.to_level_filter());
        Ok(slf)
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level as _, Relaxed);
        log::set_max_level(level.to_level_filter());
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

struct LogWrapper {
    logger: Arc<Logger>,
}

impl Log for LogWrapper {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() as u32 <= self.logger.level.load(Relaxed)
    }

    fn log(&self, record: &Record) {
        if record.level() as u32 > self.logger.level.load(Relaxed) {
            return;
        }
        BUFFER.with_borrow_mut(|buffer| {
            buffer.clear();
            let now = SystemTime::now();
            let _ = if let Some(mp) = record.module_path() {
                writeln!(
                    buffer,
                    "[{} {:5} {}] {}",
                    humantime::format_rfc3339_millis(now),
                    record.level(),
                    mp,
                    record.args(),
                )
            } else {
                writeln!(
                    buffer,
                    "[{} {:5}] {}",
                    humantime::format_rfc3339_millis(now),
                    record.level(),
                    record.args(),
                )
            };
            let mut fd = Fd::new(self.logger.file.raw());
            let _ = fd.write_all(buffer);
        });
    }

    fn flush(&self) {
        // nothing
    }
}
