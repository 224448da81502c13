use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::loader::ParseOptions;
use crate::error::DataError;
use crate::state::theme::Theme;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "bookstats.json";

pub const USAGE: &str = "Usage: bookstats [DATA_FILE] [--config FILE] [--results FILE] [--charts DIR]";

/// Where the analysis reads from and writes to, and how it behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_path: PathBuf,
    pub results_path: PathBuf,
    /// Directory the chart PNGs are written into.
    pub chart_dir: PathBuf,
    /// Length of the longest-books and published-years rankings.
    pub top_n: usize,
    pub skip_malformed_rows: bool,
    /// Save every chart as a PNG when the chart window opens.
    pub export_charts: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("7kBooks.csv"),
            results_path: PathBuf::from("7kBooks_Results.txt"),
            chart_dir: PathBuf::from("."),
            top_n: 10,
            skip_malformed_rows: false,
            export_charts: true,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path).map_err(|e| DataError::from_io(path, e))?;
        serde_json::from_str(&json).map_err(|source| DataError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the named config file, or the default one if it exists, or fall
    /// back to built-in defaults.
    pub fn resolve(config: Option<&Path>) -> Result<Self, DataError> {
        match config {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            skip_malformed_rows: self.skip_malformed_rows,
        }
    }
}

/// Command-line overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub data_path: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub results_path: Option<PathBuf>,
    pub chart_dir: Option<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .map(PathBuf::from)
                    .ok_or_else(|| format!("{flag} needs a value"))
            };
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--config" => parsed.config = Some(value("--config")?),
                "--results" => parsed.results_path = Some(value("--results")?),
                "--charts" => parsed.chart_dir = Some(value("--charts")?),
                flag if flag.starts_with("--") => return Err(format!("Unknown option: {flag}")),
                _ if parsed.data_path.is_none() => parsed.data_path = Some(PathBuf::from(&arg)),
                _ => return Err(format!("Unexpected argument: {arg}")),
            }
        }
        Ok(parsed)
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.data_path {
            settings.data_path = path.clone();
        }
        if let Some(path) = &self.results_path {
            settings.results_path = path.clone();
        }
        if let Some(dir) = &self.chart_dir {
            settings.chart_dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "top_n": 5, "theme": "Dark" }"#).expect("valid json");
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.data_path, PathBuf::from("7kBooks.csv"));
        assert!(settings.export_charts);
    }

    #[test]
    fn cli_overrides() {
        let cli = CliArgs::parse(args(&["books.csv", "--results", "out.txt", "--charts", "img"]))
            .expect("valid args");
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.data_path, PathBuf::from("books.csv"));
        assert_eq!(settings.results_path, PathBuf::from("out.txt"));
        assert_eq!(settings.chart_dir, PathBuf::from("img"));
    }

    #[test]
    fn cli_rejects_bad_input() {
        assert!(CliArgs::parse(args(&["--config"])).is_err());
        assert!(CliArgs::parse(args(&["--verbose"])).is_err());
        assert!(CliArgs::parse(args(&["a.csv", "b.csv"])).is_err());
        assert!(CliArgs::parse(args(&["--help"])).expect("help").help);
    }
}
