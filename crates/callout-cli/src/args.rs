//! Command-line argument definitions for the Callout CLI.
//!
//! [`Args`] is parsed from the command line using [`clap`] and controls the
//! input and output paths, configuration file selection and log verbosity.

use clap::Parser;

/// Command-line arguments for the Callout scene renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file (TOML)
    #[arg(help = "Path to the input scene file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["callout", "scene.toml"]);
        assert_eq!(args.input, "scene.toml");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "callout",
            "scene.toml",
            "-o",
            "label.svg",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.output, "label.svg");
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        assert_eq!(args.log_level, "debug");
    }
}
