//! Variational parameter vectors.

use serde::{Deserialize, Serialize};

use crate::error::{QaoaError, QaoaResult};

/// QAOA variational parameters for `p` layers.
///
/// The optimizer works on a flat vector of `2p` reals; the first half is
/// interpreted as mixer angles β, the second half as cost angles γ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaoaParams {
    /// Mixer angles, one per layer.
    pub beta: Vec<f64>,
    /// Cost angles, one per layer.
    pub gamma: Vec<f64>,
}

impl QaoaParams {
    /// Create parameters from explicit β and γ vectors.
    pub fn new(beta: Vec<f64>, gamma: Vec<f64>) -> QaoaResult<Self> {
        if beta.is_empty() || beta.len() != gamma.len() {
            return Err(QaoaError::ParameterCount(beta.len() + gamma.len()));
        }
        Ok(Self { beta, gamma })
    }

    /// Split a flat optimizer vector into (β, γ) halves.
    pub fn from_flat(flat: &[f64]) -> QaoaResult<Self> {
        if flat.is_empty() || flat.len() % 2 != 0 {
            return Err(QaoaError::ParameterCount(flat.len()));
        }
        let p = flat.len() / 2;
        Ok(Self {
            beta: flat[..p].to_vec(),
            gamma: flat[p..].to_vec(),
        })
    }

    /// Flatten back into the optimizer's layout.
    pub fn flatten(&self) -> Vec<f64> {
        self.beta.iter().chain(self.gamma.iter()).copied().collect()
    }

    /// Number of QAOA layers.
    pub fn layers(&self) -> usize {
        self.beta.len()
    }

    /// The uniform starting point the optimization begins from.
    pub fn uniform_start(p: usize) -> Vec<f64> {
        vec![1.0; 2 * p]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_splits_halves() {
        let params = QaoaParams::from_flat(&[0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(params.beta, vec![0.1, 0.2]);
        assert_eq!(params.gamma, vec![0.3, 0.4]);
        assert_eq!(params.layers(), 2);
    }

    #[test]
    fn test_flatten_round_trip() {
        let flat = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let params = QaoaParams::from_flat(&flat).unwrap();
        assert_eq!(params.flatten(), flat);
    }

    #[test]
    fn test_odd_length_rejected() {
        assert!(matches!(
            QaoaParams::from_flat(&[1.0, 2.0, 3.0]),
            Err(QaoaError::ParameterCount(3))
        ));
        assert!(matches!(
            QaoaParams::from_flat(&[]),
            Err(QaoaError::ParameterCount(0))
        ));
    }

    #[test]
    fn test_uniform_start() {
        assert_eq!(QaoaParams::uniform_start(2), vec![1.0; 4]);
    }

    #[test]
    fn test_new_validates_halves() {
        assert!(QaoaParams::new(vec![0.1], vec![0.2]).is_ok());
        assert!(QaoaParams::new(vec![0.1, 0.2], vec![0.3]).is_err());
        assert!(QaoaParams::new(vec![], vec![]).is_err());
    }
}
