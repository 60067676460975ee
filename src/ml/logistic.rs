//! L2-regularized binary logistic regression.
//!
//! The model is trained with the dual coordinate-descent method used by
//! liblinear for L2-regularized logistic regression. That method suits
//! sparse, high-dimensional text features. For each training sample `i`
//! the solver keeps a dual pair `(α_i, C_i - α_i)` and maintains
//! `w = Σ y_i α_i x_i` incrementally. Each coordinate update solves a
//! one-variable sub-problem with a few Newton steps.
//!
//! The intercept is modelled as an extra constant feature equal to
//! `intercept_scaling`, and it is regularized together with the weights.
//!
//! Per-sample upper bounds `C_i = C * class_weight(y_i)` implement class
//! weighting. With [`ClassWeight::Balanced`] each class gets weight
//! `n_samples / (2 * class_count)`.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{HamspamError, Result};
use crate::ml::sparse::SparseVector;
use crate::types::Label;

const MAX_INNER_ITER: usize = 100;

/// Class weighting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassWeight {
    /// Every sample has weight 1.
    None,
    /// Inverse class frequency, so the minority class is not ignored.
    #[default]
    Balanced,
}

/// Hyper-parameters for [`LogisticRegression`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionParams {
    /// Inverse regularization strength.
    pub c: f64,
    /// Stopping tolerance on the largest projected gradient.
    pub tolerance: f64,
    /// Maximum number of passes over the training data.
    pub max_iter: usize,
    /// Whether to learn an intercept.
    pub fit_intercept: bool,
    /// Value of the constant feature used for the intercept.
    pub intercept_scaling: f64,
    /// Class weighting strategy.
    pub class_weight: ClassWeight,
    /// Seed for the coordinate visiting order.
    pub seed: u64,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-4,
            max_iter: 100,
            fit_intercept: true,
            intercept_scaling: 1.0,
            class_weight: ClassWeight::Balanced,
            seed: 42,
        }
    }
}

/// Statistics from the last call to [`LogisticRegression::fit`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    /// Outer iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was reached before `max_iter`.
    pub converged: bool,
    /// Final largest projected gradient.
    pub max_gradient: f64,
    /// Weight applied to Spam samples.
    pub spam_weight: f64,
    /// Weight applied to Ham samples.
    pub ham_weight: f64,
}

/// Binary logistic regression classifier. Ham is the positive class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    params: LogisticRegressionParams,
    weights: Vec<f64>,
    intercept: f64,
    summary: Option<FitSummary>,
}

impl LogisticRegression {
    pub fn new(params: LogisticRegressionParams) -> Self {
        Self {
            params,
            weights: Vec::new(),
            intercept: 0.0,
            summary: None,
        }
    }

    /// Fit the model on feature vectors over `n_features` dimensions.
    pub fn fit(
        &mut self,
        samples: &[SparseVector],
        labels: &[Label],
        n_features: usize,
    ) -> Result<&FitSummary> {
        if samples.len() != labels.len() {
            return Err(HamspamError::training(format!(
                "Sample count {} does not match label count {}",
                samples.len(),
                labels.len()
            )));
        }
        if samples.is_empty() {
            return Err(HamspamError::training("Cannot fit on an empty training set"));
        }
        if !(self.params.c > 0.0) {
            return Err(HamspamError::invalid_config("C must be positive"));
        }

        let [spam_weight, ham_weight] = self.class_weights(labels)?;

        let l = samples.len();
        let bias = if self.params.fit_intercept {
            self.params.intercept_scaling
        } else {
            0.0
        };
        let eps = self.params.tolerance;

        let upper: Vec<f64> = labels
            .iter()
            .map(|label| {
                self.params.c
                    * match label {
                        Label::Spam => spam_weight,
                        Label::Ham => ham_weight,
                    }
            })
            .collect();
        let y: Vec<f64> = labels.iter().map(|label| label.sign()).collect();
        let xtx: Vec<f64> = samples
            .iter()
            .map(|x| x.squared_norm() + bias * bias)
            .collect();

        // The intercept lives in the last slot of `w`.
        let mut w = vec![0.0; n_features + 1];
        let mut alpha = vec![0.0; 2 * l];
        for i in 0..l {
            alpha[2 * i] = (0.001 * upper[i]).min(1e-8);
            alpha[2 * i + 1] = upper[i] - alpha[2 * i];
            Self::add_scaled(&mut w, &samples[i], bias, y[i] * alpha[2 * i]);
        }

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut order: Vec<usize> = (0..l).collect();
        let mut innereps = 1e-2;
        let innereps_min = eps.min(1e-8);

        let mut iterations = 0;
        let mut converged = false;
        let mut gmax = f64::INFINITY;

        while iterations < self.params.max_iter {
            order.shuffle(&mut rng);
            let mut newton_iter = 0;
            gmax = 0.0;

            for &i in &order {
                let c = upper[i];
                let a = xtx[i];
                let b = y[i] * Self::margin(&w, &samples[i], bias);

                // Pick which member of the dual pair to optimize so the
                // Newton step starts on the convex side.
                let (ind1, ind2, sign) = if 0.5 * a * (alpha[2 * i + 1] - alpha[2 * i]) + b < 0.0 {
                    (2 * i + 1, 2 * i, -1.0)
                } else {
                    (2 * i, 2 * i + 1, 1.0)
                };

                let alpha_old = alpha[ind1];
                let mut z = alpha_old;
                if c - z < 0.5 * c {
                    z *= 0.1;
                }
                let mut gp = a * (z - alpha_old) + sign * b + (z / (c - z)).ln();
                gmax = gmax.max(gp.abs());

                let eta = 0.1;
                let mut inner_iter = 0;
                while inner_iter <= MAX_INNER_ITER {
                    if gp.abs() < innereps {
                        break;
                    }
                    let gpp = a + c / (c - z) / z;
                    let tmpz = z - gp / gpp;
                    if tmpz <= 0.0 {
                        z *= eta;
                    } else {
                        z = tmpz;
                    }
                    gp = a * (z - alpha_old) + sign * b + (z / (c - z)).ln();
                    newton_iter += 1;
                    inner_iter += 1;
                }

                if inner_iter > 0 {
                    alpha[ind1] = z;
                    alpha[ind2] = c - z;
                    Self::add_scaled(&mut w, &samples[i], bias, sign * (z - alpha_old) * y[i]);
                }
            }

            iterations += 1;

            if gmax < eps {
                converged = true;
                break;
            }
            if newton_iter <= l / 10 {
                innereps = innereps_min.max(0.1 * innereps);
            }
        }

        if !converged {
            log::warn!(
                "Logistic regression reached max_iter={} without converging (max gradient {:.3e})",
                self.params.max_iter,
                gmax
            );
        }

        self.intercept = w[n_features] * bias;
        w.truncate(n_features);
        self.weights = w;

        let summary = self.summary.insert(FitSummary {
            iterations,
            converged,
            max_gradient: gmax,
            spam_weight,
            ham_weight,
        });
        Ok(&*summary)
    }

    /// Per-class sample weights as `[spam, ham]`.
    fn class_weights(&self, labels: &[Label]) -> Result<[f64; 2]> {
        let mut counts = [0usize; 2];
        for label in labels {
            counts[label.index()] += 1;
        }
        if counts.contains(&0) {
            return Err(HamspamError::training(format!(
                "Training data must contain both classes (spam: {}, ham: {})",
                counts[Label::Spam.index()],
                counts[Label::Ham.index()]
            )));
        }

        Ok(match self.params.class_weight {
            ClassWeight::None => [1.0, 1.0],
            ClassWeight::Balanced => {
                let n = labels.len() as f64;
                [
                    n / (2.0 * counts[0] as f64),
                    n / (2.0 * counts[1] as f64),
                ]
            }
        })
    }

    fn margin(w: &[f64], x: &SparseVector, bias: f64) -> f64 {
        x.dot(w) + w[w.len() - 1] * bias
    }

    fn add_scaled(w: &mut [f64], x: &SparseVector, bias: f64, scale: f64) {
        x.axpy_into(scale, w);
        let last = w.len() - 1;
        w[last] += scale * bias;
    }

    pub fn is_fitted(&self) -> bool {
        self.summary.is_some()
    }

    /// Signed distance to the decision boundary; positive means Ham.
    pub fn decision_function(&self, features: &SparseVector) -> f64 {
        features.dot(&self.weights) + self.intercept
    }

    /// Class probabilities as `[P(Spam), P(Ham)]`.
    pub fn predict_proba(&self, features: &SparseVector) -> [f64; 2] {
        let ham = sigmoid(self.decision_function(features));
        [1.0 - ham, ham]
    }

    /// Hard prediction. A decision value of exactly zero is Spam.
    pub fn predict(&self, features: &SparseVector) -> Label {
        if self.decision_function(features) > 0.0 {
            Label::Ham
        } else {
            Label::Spam
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn params(&self) -> &LogisticRegressionParams {
        &self.params
    }

    pub fn summary(&self) -> Option<&FitSummary> {
        self.summary.as_ref()
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticRegressionParams::default())
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
