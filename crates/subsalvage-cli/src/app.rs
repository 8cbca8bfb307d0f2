use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(name = "subsalvage", version, about, long_about = None, propagate_version = true)]
pub struct App {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Pick the subtitle out of an archive and decode it
    #[command(alias = "x", name = "extract")]
    Extract(ExtractArg),
    /// Decode a single subtitle file
    #[command(alias = "d", name = "decode")]
    Decode(DecodeArg),
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArg {
    /// Archive payload (zip, tar, tar.gz or gzip)
    pub archive: PathBuf,

    #[command(flatten)]
    pub common: CommonArg,
}

#[derive(Clone, Debug, Args)]
pub struct DecodeArg {
    pub file: PathBuf,

    /// File name hint; defaults to the input's own name
    #[arg(short, long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub common: CommonArg,
}

#[derive(Clone, Debug, Args)]
pub struct CommonArg {
    /// Preferred encoding label, tried before the built-in catalog
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// TOML file with engine options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// MicroDVD frame rate, overriding the config file
    #[arg(long)]
    pub frame_rate: Option<f64>,

    /// Output file, or a directory to write the resulting file name into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        App::command().debug_assert();
    }

    #[test]
    fn parses_extract() {
        let app = App::parse_from(["subsalvage", "-vv", "x", "subs.zip", "-e", "cp1256", "--json"]);
        assert_eq!(app.verbose, 2);
        let Commands::Extract(arg) = app.cmd else {
            panic!("expected extract");
        };
        assert_eq!(arg.archive, PathBuf::from("subs.zip"));
        assert_eq!(arg.common.encoding.as_deref(), Some("cp1256"));
        assert!(arg.common.json);
    }

    #[test]
    fn parses_decode() {
        let app = App::parse_from([
            "subsalvage", "decode", "blob.bin", "--name", "movie.sub", "--frame-rate", "23.976",
        ]);
        let Commands::Decode(arg) = app.cmd else {
            panic!("expected decode");
        };
        assert_eq!(arg.name.as_deref(), Some("movie.sub"));
        assert_eq!(arg.common.frame_rate, Some(23.976));
        assert_eq!(arg.common.output, None);
    }
}
