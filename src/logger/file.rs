/// File persistence for log lines
///
/// One file per process start under the logs directory. File logging is
/// optional: until `init_file_logging` succeeds, lines only reach the console.
use super::config::get_logger_config;
use chrono::Local;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

pub fn init_file_logging() {
    if !get_logger_config().file_logging {
        return;
    }

    let dir = crate::paths::get_logs_directory();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Failed to create log directory {}: {}", dir.display(), e);
        return;
    }

    let file_name = format!("nftbot_{}.log", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(file_name);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            *LOG_FILE.lock() = Some(BufWriter::new(file));
        }
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
        }
    }
}

pub fn write_to_file(line: &str) {
    let mut guard = LOG_FILE.lock();
    if let Some(writer) = guard.as_mut() {
        let _ = writeln!(writer, "{}", line);
    }
}

pub fn flush_file_logging() {
    let mut guard = LOG_FILE.lock();
    if let Some(writer) = guard.as_mut() {
        let _ = writer.flush();
    }
}
