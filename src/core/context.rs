use crate::config::Config;
use crate::core::cli::CliPaths;
use crate::core::store::EventRepository;
use crate::errors::Result;
use crate::logging::Logger;
use std::path::PathBuf;

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub store: EventRepository,
    pub logger: Logger,
    pub startup_displayed: bool,
    pub config_path: PathBuf,
    pub events_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppContext {
    pub fn from_paths(paths: &CliPaths) -> Result<Self> {
        Self::new_with_paths(
            paths.config_path.clone(),
            paths.events_path.clone(),
            paths.logs_dir.clone(),
        )
    }

    pub fn new_with_paths(
        config_path: PathBuf,
        events_path: PathBuf,
        logs_dir: PathBuf,
    ) -> Result<Self> {
        let config = Config::load_from(&config_path)?;
        let store = EventRepository::open(&events_path)?;

        let logger = Logger::new();
        logger.set_log_dir(&logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());

        Ok(Self {
            config,
            store,
            logger,
            startup_displayed: false,
            config_path,
            events_path,
            logs_dir,
        })
    }
}
