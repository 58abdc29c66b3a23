//! Choosing between JSON, plain and pretty output.

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// A single JSON document on stdout
    Json,
    /// One `key=value` fact per line; the default off a terminal
    #[default]
    Plain,
    /// Tables, badges and color for an interactive terminal
    Pretty,
}

impl OutputMode {
    /// Mode for a `--format` value, if it names one.
    fn named(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "plain" => Some(Self::Plain),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }

    /// `--json` wins, then an explicit `--format`. Otherwise pretty on a
    /// terminal that is not `TERM=dumb`, plain everywhere else.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if let Some(mode) = format_flag.and_then(Self::named) {
            return mode;
        }

        match (is_tty, term_is_dumb) {
            (true, false) => Self::Pretty,
            _ => Self::Plain,
        }
    }

    pub fn is_json(self) -> bool {
        self == Self::Json
    }

    pub fn is_pretty(self) -> bool {
        self == Self::Pretty
    }
}
