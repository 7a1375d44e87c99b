use rustc_hash::FxHashMap;
use std::io::IsTerminal;

/// Log targets that emit one record per drawn frame
pub const FRAME_LOG_TARGETS: [&str; 2] = ["waveview::wave", "draw"];

/// Configure the logs output
/// Logs will show a timestamp using the UTC time with format `[year]-[month]-[day] [hour]:[minutes]:[seconds]`.
/// Per frame records are capped to `Info` unless `with_frame_logs` enables them.
#[derive(Clone, Debug)]
pub struct LogConfig {
    level: log::LevelFilter,
    levels_for: FxHashMap<String, log::LevelFilter>,
    colored: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        };

        Self::new(level)
    }
}

impl LogConfig {
    /// Creates a new configuration using the given level filter
    pub fn new(level: log::LevelFilter) -> Self {
        Self {
            level,
            levels_for: Default::default(),
            colored: cfg!(debug_assertions) && std::io::stdout().is_terminal(),
        }
        .with_frame_logs(false)
    }

    /// Configure logs to use debug level filter
    pub fn debug() -> Self {
        Self::new(log::LevelFilter::Debug)
    }

    /// Change the filter level for a given target (module path or dependency)
    pub fn level_for(mut self, id: &str, level: log::LevelFilter) -> Self {
        self.levels_for.insert(id.to_string(), level);
        self
    }

    /// Shows the trace records emitted while drawing each frame
    pub fn with_frame_logs(self, enabled: bool) -> Self {
        let level = if enabled {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        };

        FRAME_LOG_TARGETS
            .iter()
            .fold(self, |config, target| config.level_for(target, level))
    }
}

fn timestamp() -> String {
    let now = time::OffsetDateTime::now_utc();
    format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

fn set_panic_hook() {
    use std::panic::{self, PanicHookInfo};

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info: &PanicHookInfo| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("Unknown");

        match info.location() {
            Some(location) => log::error!(
                "Panic at '{}:{}': {payload}",
                location.file(),
                location.line()
            ),
            None => log::error!("Panic: {payload}"),
        }

        default_hook(info);
    }));
}

/// Installs the global logger writing to stdout, calling it twice only reports an error
pub fn init_logs(config: LogConfig) {
    use fern::colors::{Color, ColoredLevelConfig};

    set_panic_hook();

    let mut dispatch = fern::Dispatch::new().level(config.level);
    for (id, lvl) in config.levels_for.iter() {
        dispatch = dispatch.level_for(id.clone(), *lvl);
    }

    let colors = config.colored.then(|| {
        ColoredLevelConfig::new()
            .error(Color::BrightRed)
            .warn(Color::BrightYellow)
            .info(Color::BrightGreen)
            .debug(Color::BrightCyan)
            .trace(Color::BrightBlack)
    });

    let result = dispatch
        .format(move |out, message, record| {
            let level = match &colors {
                Some(colors) => colors.color(record.level()).to_string(),
                None => record.level().to_string(),
            };

            out.finish(format_args!(
                "{date} [{target}] {level}: {message}",
                date = timestamp(),
                target = record.target(),
            ))
        })
        .chain(std::io::stdout())
        .apply();

    if let Err(e) = result {
        eprintln!("Error initializing logs: {e}");
    }
}
