use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use adclick_ftrl::FtrlParams;
use serde::{Deserialize, Serialize};

use crate::error::{DriverError, Result};

/// Hyperparameter values explored by the grid search
///
/// Missing keys in a JSON file fall back to the default grid, e.g. `{"alpha": [0.05, 0.1]}`
/// only replaces the learning rates. Unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub alpha: Vec<f64>,
    pub beta: Vec<f64>,
    pub lambda1: Vec<f64>,
    pub lambda2: Vec<f64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        let regularization = vec![0.001, 0.01, 0.1, 1.0, 10.0, 100.0, 1000.0];
        GridConfig {
            alpha: vec![0.01, 0.1, 1.0, 10.0, 100.0, 1000.0],
            beta: vec![0.1, 1.0, 10.0],
            lambda1: regularization.clone(),
            lambda2: regularization,
        }
    }
}

impl GridConfig {
    pub fn from_json_reader<R: Read>(rdr: R) -> Result<Self> {
        Ok(serde_json::from_reader(rdr)?)
    }

    /// Read a grid from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        Self::from_json_reader(file)
    }

    /// Number of hyperparameter combinations
    pub fn len(&self) -> usize {
        self.alpha.len() * self.beta.len() * self.lambda1.len() * self.lambda2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All combinations, nested as alpha, beta, lambda1, lambda2 with lambda2 varying fastest
    ///
    /// The values are not validated here.
    pub fn combinations(&self, n_coordinates: usize) -> Result<Vec<FtrlParams<f64>>> {
        for (name, values) in [
            ("alpha", &self.alpha),
            ("beta", &self.beta),
            ("lambda1", &self.lambda1),
            ("lambda2", &self.lambda2),
        ]
        .iter()
        {
            if values.is_empty() {
                return Err(DriverError::EmptyGrid(*name));
            }
        }

        let mut params = Vec::with_capacity(self.len());
        for &alpha in &self.alpha {
            for &beta in &self.beta {
                for &lambda1 in &self.lambda1 {
                    for &lambda2 in &self.lambda2 {
                        params.push(FtrlParams::new(alpha, beta, lambda1, lambda2, n_coordinates));
                    }
                }
            }
        }
        Ok(params)
    }
}
