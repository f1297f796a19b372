use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;

/// Maps `-v` occurrences to a default filter. `RUST_LOG` still takes precedence.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr logger. Warnings are visible without any flags.
pub fn setup_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let env = Env::default().default_filter_or(level_for(verbosity));

    Builder::from_env(env)
        .format(|buf, record| {
            let label = match record.level() {
                Level::Error => "error",
                Level::Warn => "warning",
                Level::Info => "info",
                Level::Debug => "debug",
                Level::Trace => "trace",
            };
            writeln!(buf, "{label}: {}", record.args())
        })
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }
}
