use std::{env, error::Error, fmt, path::PathBuf};

/// The model file used when `MODEL_PATH` isn't set.
pub const DEFAULT_MODEL_PATH: &str = "mnist_model.safetensors";

pub const USAGE: &str = "\
usage: digit_recognizer <command>

commands:
  predict <image>...      classify each image, printing one JSON line per image
  health                  report whether the model can be loaded
  init <path>             write a freshly initialized (untrained) model
  sample <digit> <path>   draw a sample digit into a PNG

environment:
  MODEL_PATH              model file (default: mnist_model.safetensors)
  SEED                    seed for `init`
  RUST_LOG                log filter";

/// Configuration errors, reported before anything is loaded.
#[derive(Debug, PartialEq)]
pub enum ConfigErr {
    Usage(String),
    InvalidVar { name: &'static str, value: String },
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}\n\n{USAGE}"),
            Self::InvalidVar { name, value } => write!(f, "invalid value for {name}: {value:?}"),
        }
    }
}

impl Error for ConfigErr {}

/// Settings taken from the environment.
///
/// `SEED` is kept raw until `seed` parses it, only `init` needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model_path: PathBuf,
    seed: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration looking every variable up with `var`.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_path = var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        Self {
            model_path,
            seed: var("SEED"),
        }
    }

    /// Returns the seed for `init`, `None` when `SEED` isn't set.
    pub fn seed(&self) -> Result<Option<u64>, ConfigErr> {
        self.seed
            .as_ref()
            .map(|value| {
                value.parse().map_err(|_| ConfigErr::InvalidVar {
                    name: "SEED",
                    value: value.clone(),
                })
            })
            .transpose()
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Predict(Vec<PathBuf>),
    Health,
    Init(PathBuf),
    Sample { digit: u8, path: PathBuf },
}

impl Command {
    /// Parses the command line arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, ConfigErr>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let usage = |msg: &str| ConfigErr::Usage(msg.to_string());

        let Some(cmd) = args.next() else {
            return Err(usage("missing command"));
        };

        let rest: Vec<String> = args.collect();
        match (cmd.as_str(), rest.as_slice()) {
            ("predict", []) => Err(usage("predict needs at least one image")),
            ("predict", images) => Ok(Self::Predict(images.iter().map(PathBuf::from).collect())),
            ("health", []) => Ok(Self::Health),
            ("init", [path]) => Ok(Self::Init(PathBuf::from(path))),
            ("sample", [digit, path]) => {
                let digit = digit
                    .parse::<u8>()
                    .ok()
                    .filter(|d| *d <= 9)
                    .ok_or_else(|| usage(&format!("{digit:?} is not a digit")))?;

                Ok(Self::Sample {
                    digit,
                    path: PathBuf::from(path),
                })
            }
            ("health" | "init" | "sample", _) => Err(usage(&format!("wrong arguments for {cmd}"))),
            _ => Err(usage(&format!("unknown command {cmd:?}"))),
        }
    }
}
