use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_local;
use crate::args::BenchArgs;
use crate::error::AppResult;

pub(crate) fn run() -> AppResult<()> {
    let matches = BenchArgs::command().get_matches();
    let args = resolve_args(&matches)?;

    // Config may set no_color, so logging starts only once it is applied.
    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_local(&args))
}

/// Builds the final arguments: command line first, then config values for
/// anything the command line left at its default.
fn resolve_args(matches: &ArgMatches) -> AppResult<BenchArgs> {
    let mut args = BenchArgs::from_arg_matches(matches)?;
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, matches, &config)?;
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn matches_from(argv: &[&str]) -> Result<ArgMatches, String> {
        BenchArgs::command()
            .try_get_matches_from(argv)
            .map_err(|err| format!("parse failed: {}", err))
    }

    #[test]
    fn resolve_args_applies_config_before_logging_settings_are_read() -> Result<(), String> {
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let path = dir.path().join("bench.toml");
        std::fs::write(
            &path,
            "url = \"http://localhost\"\nrequests = 7\nno_color = true\n",
        )
        .map_err(|err| format!("write failed: {}", err))?;
        let path = path.to_string_lossy().into_owned();

        let matches = matches_from(&["apibench", "--config", path.as_str()])?;
        let args = resolve_args(&matches).map_err(|err| err.to_string())?;

        if !args.no_color {
            return Err("Config no_color must be applied".to_owned());
        }
        if args.requests.get() != 7 {
            return Err(format!("Unexpected requests: {}", args.requests.get()));
        }
        if args.url.as_deref() != Some("http://localhost") {
            return Err("Config url must be applied".to_owned());
        }
        Ok(())
    }

    #[test]
    fn resolve_args_surfaces_config_errors() -> Result<(), String> {
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let path = dir.path().join("bench.toml");
        std::fs::write(&path, "requests = 0\n").map_err(|err| format!("write failed: {}", err))?;
        let path = path.to_string_lossy().into_owned();

        let matches = matches_from(&["apibench", "--config", path.as_str()])?;
        if resolve_args(&matches).is_ok() {
            return Err("Expected zero requests in config to fail".to_owned());
        }
        Ok(())
    }
}
