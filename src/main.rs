use cadence::app::App;
use cadence::ui::TuiManager;
use log::{error, LevelFilter};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "cadence.log";

fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

fn open_log_file(path: &Path) -> Option<File> {
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Stderr is hidden behind the alternate screen, so records go to a file.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match open_log_file(&log_path()) {
        Some(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut app = App::new();

    // Optional document path as the first argument; otherwise load from the command deck.
    if let Some(path) = std::env::args().nth(1) {
        match cadence::input::load_text_file(&path) {
            Ok(doc) => {
                app.load_text(&doc.text);
            }
            Err(err) => {
                error!("{}", err);
                return Err(err.into());
            }
        }
    }

    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_outside_the_terminal() {
        let path = std::env::temp_dir().join(format!("cadence-log-{}.log", std::process::id()));
        assert!(open_log_file(&path).is_some());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unwritable_log_path_is_rejected() {
        assert!(open_log_file(Path::new("/nonexistent/cadence/cadence.log")).is_none());
    }

    #[test]
    fn test_log_path_is_named_after_the_binary() {
        assert!(log_path().ends_with(LOG_FILE_NAME));
    }
}
