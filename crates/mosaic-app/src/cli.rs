use std::path::PathBuf;

use clap::Parser;

/// Mosaic: a browser that shows many tabs at once, tiled in one window.
#[derive(Parser, Debug)]
#[command(name = "mosaic", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// State file path override.
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Log filter override (e.g. `debug`, `mosaic_shell=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Start with default pages, ignoring the saved session.
    #[arg(long)]
    pub fresh: bool,

    /// Directory served under `mosaic://localhost/` ahead of the bundled
    /// chrome pages.
    #[arg(long)]
    pub chrome_dir: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["mosaic"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.state_file.is_none());
        assert!(args.log_level.is_none());
        assert!(!args.fresh);
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "mosaic",
            "--config",
            "/tmp/c.toml",
            "--state-file",
            "/tmp/s.json",
            "--log-level",
            "debug",
            "--fresh",
        ])
        .unwrap();
        assert_eq!(args.config.unwrap(), PathBuf::from("/tmp/c.toml"));
        assert_eq!(args.state_file.unwrap(), PathBuf::from("/tmp/s.json"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.fresh);
    }
}
