use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, warn};
use machine_learning::{Network, NetworkParameters, Prediction};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::response::{HealthResponse, PredictResponse};

/// Decodes, normalizes and classifies a single image file.
pub fn classify(network: &Network, path: &Path) -> anyhow::Result<Prediction> {
    let image = vision::open(path).with_context(|| format!("reading {}", path.display()))?;
    let features = vision::normalize(&image)?;
    let prediction = network.predict_with_probability(features.view())?;

    debug!(
        "{} looks like a {} ({:.3})",
        path.display(),
        prediction.class,
        prediction.confidence()
    );
    Ok(prediction)
}

pub fn predict_file(network: &Network, path: &Path) -> PredictResponse {
    match classify(network, path) {
        Ok(prediction) => PredictResponse::success(prediction),
        Err(e) => {
            warn!("failed to classify {}: {e:#}", path.display());
            PredictResponse::failure(format!("{e:#}"))
        }
    }
}

/// Classifies every image in parallel. The responses keep the order of `paths`.
pub fn predict_files(network: &Network, paths: &[PathBuf]) -> Vec<PredictResponse> {
    paths
        .par_iter()
        .map(|path| predict_file(network, path))
        .collect()
}

pub fn health(model_path: &Path) -> HealthResponse {
    let model_loaded = match NetworkParameters::load(model_path) {
        Ok(_) => true,
        Err(e) => {
            warn!("model at {} can't be loaded: {e}", model_path.display());
            false
        }
    };

    HealthResponse {
        status: "healthy",
        model_loaded,
    }
}

/// Writes an untrained model to `path`, seeded for reproducibility if `seed` is given.
pub fn init_model(path: &Path, seed: Option<u64>) -> anyhow::Result<NetworkParameters> {
    let params = match seed {
        Some(seed) => NetworkParameters::init(&mut StdRng::seed_from_u64(seed)),
        None => NetworkParameters::init(&mut rand::rng()),
    };

    params
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;

    Ok(params)
}
