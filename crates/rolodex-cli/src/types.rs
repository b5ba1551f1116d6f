use clap::ValueEnum;

/// Crates whose events `--log-level` raises; everything else stays at `warn`
const OWN_TARGETS: [&str; 5] = [
    "rolodex",
    "rolodex_engine",
    "rolodex_gateway",
    "rolodex_runtime",
    "rolodex_types",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text, coloured on a terminal
    Plain,
    /// One pretty-printed JSON document on stdout
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// `EnvFilter` directive for this level.
    ///
    /// Quieter levels apply everywhere. Louder ones only open up the rolodex
    /// crates, so HTTP client internals stay at `warn`.
    pub fn directive(self) -> String {
        match self {
            LogLevel::Error | LogLevel::Warn => self.as_str().to_string(),
            louder => {
                let mut directive = String::from("warn");
                for target in OWN_TARGETS {
                    directive.push_str(&format!(",{}={}", target, louder.as_str()));
                }
                directive
            }
        }
    }
}
