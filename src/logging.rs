use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use env_logger::{Builder, Env, Target};

/// Installs the global logger. `RUST_LOG` picks the level (default `info`).
///
/// With a log directory, records go to a fresh timestamped file inside it
/// instead of stderr; its path is returned.
pub fn init(log_dir: Option<&str>) -> io::Result<Option<PathBuf>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {} {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.line().unwrap_or_default(),
            record.target(),
            record.level(),
            record.args()
        )
    });

    let log_path = match log_dir {
        Some(dir) => {
            let path = create_log_file_path(Path::new(dir), Local::now())?;
            let file = File::create(&path)?;
            builder.target(Target::Pipe(Box::new(file)));
            Some(path)
        }
        None => None,
    };

    builder.try_init().map_err(io::Error::other)?;

    if let Some(path) = &log_path {
        log::info!("Writing logs to {}", path.display());
    }
    Ok(log_path)
}

fn create_log_file_path(dir: &Path, now: DateTime<Local>) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.join(log_file_name(now)))
}

pub fn log_file_name(now: DateTime<Local>) -> String {
    format!("{}.log", now.format("%m_%d_%Y_%H_%M_%S"))
}

/// Shortens text for log lines and error messages.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
