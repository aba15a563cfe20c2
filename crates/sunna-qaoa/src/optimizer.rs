//! Derivative-free optimizers.
//!
//! Variational loops evaluate their objective by executing a circuit on a
//! (possibly remote) backend, so objectives here are async and fallible: a
//! backend error aborts the optimization instead of poisoning the simplex
//! with garbage values.

use crate::error::QaoaResult;

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameter values.
    pub optimal_params: Vec<f64>,
    /// Optimal objective value.
    pub optimal_value: f64,
    /// Number of function evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// History of improving objective values.
    pub history: Vec<f64>,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// A derivative-free minimizer over async objectives.
pub trait Optimizer {
    /// Minimize `objective` starting from `initial_params`.
    fn minimize<F, Fut>(
        &self,
        objective: F,
        initial_params: Vec<f64>,
    ) -> impl Future<Output = QaoaResult<OptimizationResult>>
    where
        F: FnMut(Vec<f64>) -> Fut,
        Fut: Future<Output = QaoaResult<f64>>;
}

/// COBYLA-style optimizer configuration.
///
/// A simplex method with trust-region contraction — a practical stand-in
/// for the classic linear-approximation COBYLA, suited to noisy
/// shot-sampled objectives where gradients are unavailable.
#[derive(Debug, Clone)]
pub struct Cobyla {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Convergence tolerance.
    pub tol: f64,
    /// Initial trust region radius.
    pub rhobeg: f64,
    /// Final trust region radius.
    pub rhoend: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            rhobeg: 0.5,
            rhoend: 1e-4,
        }
    }
}

impl Cobyla {
    /// Create a new COBYLA optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set trust region parameters.
    pub fn with_trust_region(mut self, rhobeg: f64, rhoend: f64) -> Self {
        self.rhobeg = rhobeg;
        self.rhoend = rhoend;
        self
    }
}

impl Optimizer for Cobyla {
    async fn minimize<F, Fut>(
        &self,
        mut objective: F,
        initial_params: Vec<f64>,
    ) -> QaoaResult<OptimizationResult>
    where
        F: FnMut(Vec<f64>) -> Fut,
        Fut: Future<Output = QaoaResult<f64>>,
    {
        let n = initial_params.len();
        let x = initial_params.clone();
        let mut f_x = objective(x.clone()).await?;
        let mut history = vec![f_x];
        let mut num_evaluations = 1;

        // Initialize simplex
        let mut simplex: Vec<Vec<f64>> = vec![x.clone()];
        let mut f_simplex: Vec<f64> = vec![f_x];

        for i in 0..n {
            let mut point = x.clone();
            point[i] += self.rhobeg;
            let f_point = objective(point.clone()).await?;
            num_evaluations += 1;
            simplex.push(point);
            f_simplex.push(f_point);
        }

        let mut rho = self.rhobeg;
        let mut converged = false;

        for _iteration in 0..self.maxiter {
            // Sort simplex by function value
            let mut indices: Vec<usize> = (0..=n).collect();
            indices.sort_by(|&a, &b| f_simplex[a].partial_cmp(&f_simplex[b]).unwrap());

            let best_idx = indices[0];
            let worst_idx = indices[n];

            // Check convergence
            let spread = f_simplex[worst_idx] - f_simplex[best_idx];
            if spread < self.tol && rho <= self.rhoend {
                converged = true;
                break;
            }

            // Contract trust region if needed
            if spread < self.tol {
                rho = (rho * 0.5).max(self.rhoend);

                // Reset simplex around best point
                let best = simplex[best_idx].clone();
                let f_best = f_simplex[best_idx];
                simplex = vec![best.clone()];
                f_simplex = vec![f_best];

                for i in 0..n {
                    let mut point = best.clone();
                    point[i] += rho;
                    let f_point = objective(point.clone()).await?;
                    num_evaluations += 1;
                    simplex.push(point);
                    f_simplex.push(f_point);
                }
                continue;
            }

            // Centroid of all points except the worst
            let mut centroid = vec![0.0; n];
            for &idx in &indices[..n] {
                for i in 0..n {
                    centroid[i] += simplex[idx][i];
                }
            }
            for val in &mut centroid {
                *val /= n as f64;
            }

            // Reflection
            let mut reflected: Vec<f64> = centroid
                .iter()
                .zip(&simplex[worst_idx])
                .map(|(c, w)| 2.0 * c - w)
                .collect();

            // Bound the step size
            for i in 0..n {
                let diff = reflected[i] - centroid[i];
                if diff.abs() > rho {
                    reflected[i] = centroid[i] + rho * diff.signum();
                }
            }

            let f_reflected = objective(reflected.clone()).await?;
            num_evaluations += 1;

            if f_reflected < f_simplex[best_idx] {
                // Expansion
                let expanded: Vec<f64> = centroid
                    .iter()
                    .zip(&reflected)
                    .map(|(c, r)| c + 2.0 * (r - c))
                    .collect();
                let f_expanded = objective(expanded.clone()).await?;
                num_evaluations += 1;

                if f_expanded < f_reflected {
                    simplex[worst_idx] = expanded;
                    f_simplex[worst_idx] = f_expanded;
                } else {
                    simplex[worst_idx] = reflected;
                    f_simplex[worst_idx] = f_reflected;
                }
            } else if f_reflected < f_simplex[indices[n - 1]] {
                // Accept reflection
                simplex[worst_idx] = reflected;
                f_simplex[worst_idx] = f_reflected;
            } else {
                // Contraction
                let contracted: Vec<f64> = centroid
                    .iter()
                    .zip(&simplex[worst_idx])
                    .map(|(c, w)| 0.5 * (c + w))
                    .collect();
                let f_contracted = objective(contracted.clone()).await?;
                num_evaluations += 1;

                if f_contracted < f_simplex[worst_idx] {
                    simplex[worst_idx] = contracted;
                    f_simplex[worst_idx] = f_contracted;
                } else {
                    // Shrink toward the best point
                    let best = simplex[best_idx].clone();
                    for i in 0..=n {
                        if i != best_idx {
                            for j in 0..n {
                                simplex[i][j] = 0.5 * (best[j] + simplex[i][j]);
                            }
                            f_simplex[i] = objective(simplex[i].clone()).await?;
                            num_evaluations += 1;
                        }
                    }
                }
            }

            // Update best
            let min_idx = f_simplex
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
                .map(|(i, _)| i)
                .unwrap();

            if f_simplex[min_idx] < f_x {
                f_x = f_simplex[min_idx];
                history.push(f_x);
            }
        }

        let min_idx = f_simplex
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        Ok(OptimizationResult {
            optimal_params: simplex[min_idx].clone(),
            optimal_value: f_simplex[min_idx],
            num_evaluations,
            num_iterations: history.len(),
            history,
            converged,
        })
    }
}

/// SPSA (Simultaneous Perturbation Stochastic Approximation) optimizer.
///
/// Gradient-free stochastic optimization; estimates gradients from random
/// two-point perturbations. Uses a seeded LCG so runs are reproducible.
#[derive(Debug, Clone)]
pub struct Spsa {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Initial step size for parameter updates.
    pub a: f64,
    /// Perturbation size.
    pub c: f64,
    /// Perturbation decay parameter.
    pub gamma: f64,
}

impl Default for Spsa {
    fn default() -> Self {
        Self {
            maxiter: 100,
            a: 0.1,
            c: 0.1,
            gamma: 0.101,
        }
    }
}

impl Spsa {
    /// Create a new SPSA optimizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }
}

impl Optimizer for Spsa {
    async fn minimize<F, Fut>(
        &self,
        mut objective: F,
        initial_params: Vec<f64>,
    ) -> QaoaResult<OptimizationResult>
    where
        F: FnMut(Vec<f64>) -> Fut,
        Fut: Future<Output = QaoaResult<f64>>,
    {
        let n = initial_params.len();
        let mut x = initial_params;
        let mut f_x = objective(x.clone()).await?;
        let mut history = vec![f_x];
        let mut num_evaluations = 1;

        // Simple LCG for reproducible perturbation directions
        let mut rand_state: u64 = 42;
        let mut rand = || -> f64 {
            rand_state = rand_state.wrapping_mul(1103515245).wrapping_add(12345);
            if (rand_state >> 16) & 1 == 1 { 1.0 } else { -1.0 }
        };

        for k in 0..self.maxiter {
            let a_k = self.a / (k + 1) as f64;
            let c_k = self.c / ((k + 1) as f64).powf(self.gamma);

            let delta: Vec<f64> = (0..n).map(|_| rand()).collect();

            let x_plus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi + c_k * di).collect();
            let x_minus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi - c_k * di).collect();

            let f_plus = objective(x_plus).await?;
            let f_minus = objective(x_minus).await?;
            num_evaluations += 2;

            let grad: Vec<f64> = delta
                .iter()
                .map(|di| (f_plus - f_minus) / (2.0 * c_k * di))
                .collect();

            for i in 0..n {
                x[i] -= a_k * grad[i];
            }

            f_x = objective(x.clone()).await?;
            num_evaluations += 1;
            history.push(f_x);
        }

        Ok(OptimizationResult {
            optimal_params: x,
            optimal_value: f_x,
            num_evaluations,
            num_iterations: self.maxiter,
            history,
            converged: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cobyla_quadratic() {
        let cobyla = Cobyla::new().with_maxiter(200);

        // Minimize (x-1)^2 + (y-2)^2
        let result = cobyla
            .minimize(
                |params: Vec<f64>| async move {
                    Ok((params[0] - 1.0).powi(2) + (params[1] - 2.0).powi(2))
                },
                vec![0.0, 0.0],
            )
            .await
            .unwrap();

        assert!(result.optimal_value < 0.01);
        assert!((result.optimal_params[0] - 1.0).abs() < 0.1);
        assert!((result.optimal_params[1] - 2.0).abs() < 0.1);
    }

    #[tokio::test]
    async fn test_cobyla_rosenbrock_improves() {
        let cobyla = Cobyla::new().with_maxiter(500);

        let result = cobyla
            .minimize(
                |params: Vec<f64>| async move {
                    let (x, y) = (params[0], params[1]);
                    Ok((1.0 - x).powi(2) + 100.0 * (y - x.powi(2)).powi(2))
                },
                vec![0.0, 0.0],
            )
            .await
            .unwrap();

        // Rosenbrock is hard, just check we improved
        assert!(result.optimal_value < 1.0);
    }

    #[tokio::test]
    async fn test_cobyla_propagates_objective_errors() {
        use crate::error::QaoaError;

        let cobyla = Cobyla::new().with_maxiter(10);
        let err = cobyla
            .minimize(
                |_params: Vec<f64>| async move { Err(QaoaError::EmptyHistogram) },
                vec![0.0, 0.0],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, QaoaError::EmptyHistogram));
    }

    #[tokio::test]
    async fn test_spsa_quadratic() {
        let spsa = Spsa::new().with_maxiter(100);

        let result = spsa
            .minimize(
                |params: Vec<f64>| async move { Ok(params[0].powi(2) + params[1].powi(2)) },
                vec![1.0, 1.0],
            )
            .await
            .unwrap();

        assert!(result.optimal_value < 0.5);
    }
}
