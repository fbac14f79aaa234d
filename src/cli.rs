use std::path::PathBuf;

use classprep::config::{
    Settings, DEFAULT_EXPECTED_JAVAC, DEFAULT_MANIFEST, DEFAULT_OUT_DIR, JAVA_HOME_ENV,
};
use clap::Parser;

/// Prepare Java fixtures: compile sources from runtime/vm testdata and extract JDK classes.
#[derive(Parser, Debug)]
#[command(name = "classprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Exact `javac --version` output to require
    #[arg(long, default_value = DEFAULT_EXPECTED_JAVAC)]
    pub expected_javac: String,

    /// Root output directory for class files
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// TOML config with modules/classes to extract
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    pub config: PathBuf,

    /// JAVA_HOME override (defaults to env)
    #[arg(long)]
    pub java_home: Option<PathBuf>,

    /// Verbosity level (-v lists each source as it is compiled, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve flags into run settings.
    ///
    /// This is the only place `JAVA_HOME` is read.
    pub fn into_settings(self) -> Settings {
        let java_home = self.java_home.or_else(|| {
            std::env::var_os(JAVA_HOME_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        Settings {
            expected_javac: self.expected_javac,
            out_dir: self.out_dir,
            manifest_path: self.config,
            java_home,
        }
    }
}
