use log::LevelFilter;
use std::io::Write;

/// Initialize the global logger at `level`.
///
/// Lines are formatted as `<timestamp> - <LEVEL> - <message>`. `RUST_LOG`
/// directives are applied on top of `level`. Calling this more than once is
/// harmless; later calls keep the first logger.
pub fn init_logging(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_env("RUST_LOG")
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
