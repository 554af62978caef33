use std::{env, process};

use anyhow::Context;
use digit_recognizer::{
    config::{Command, Config, ConfigErr},
    service,
};
use log::info;
use machine_learning::{Network, NetworkParameters};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let command = or_usage_exit(Command::parse(env::args().skip(1)));
    let config = Config::from_env();

    match command {
        Command::Predict(paths) => {
            let params = NetworkParameters::load(&config.model_path)
                .with_context(|| format!("loading {}", config.model_path.display()))?;
            info!("loaded model from {}", config.model_path.display());

            let network = Network::new(params);
            let responses = service::predict_files(&network, &paths);
            for response in &responses {
                println!("{}", serde_json::to_string(response)?);
            }

            if responses.iter().any(|r| !r.is_success()) {
                process::exit(1);
            }
        }
        Command::Health => {
            let health = service::health(&config.model_path);
            println!("{}", serde_json::to_string(&health)?);
        }
        Command::Init(path) => {
            let seed = or_usage_exit(config.seed());
            service::init_model(&path, seed)?;
            info!("wrote an untrained model to {}", path.display());
        }
        Command::Sample { digit, path } => {
            vision::sample_image(digit)?
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("drew a {digit} into {}", path.display());
        }
    }

    Ok(())
}

/// Configuration mistakes exit with status 2, before anything is loaded or written.
fn or_usage_exit<T>(res: Result<T, ConfigErr>) -> T {
    res.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(2);
    })
}
