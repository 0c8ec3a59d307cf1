use env_logger::{Builder, Env};
use log::LevelFilter;

/// Routes the simulation crates' `log` output to stderr for the `skirmish` binary.
///
/// Fight, death and respawn traces from the world are debug level and only
/// appear with `--verbose`; the run summary is info level. A `RUST_LOG`
/// filter overrides either choice.
pub(crate) fn init(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // A second install fails harmlessly; unit tests may initialise repeatedly.
    let _ = Builder::from_env(Env::default().default_filter_or(default_level.as_str())).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialisation_is_harmless() {
        init(true);
        init(false);
        log::debug!("logger installed once");
    }
}
