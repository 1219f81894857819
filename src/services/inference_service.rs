use std::collections::HashMap;
use std::sync::Arc;

use ndarray::{Array1, Array2};
use ndarray_stats::QuantileExt;
use regex::Regex;
use tracing::debug;

use crate::error::EngineError;
use crate::models::{
    ActivityLevel, FitnessGoal, FitnessLevel, Gender, HealthMetrics, InferenceResult, Profile,
};

/// Cluster assignment capability of the pretrained bundle.
#[cfg_attr(test, mockall::automock)]
pub trait ClusterModel: Send + Sync {
    fn assign(&self, features: &Array1<f64>) -> Result<usize, EngineError>;
}

/// Calorie regression capability of the pretrained bundle.
#[cfg_attr(test, mockall::automock)]
pub trait CalorieModel: Send + Sync {
    fn predict(&self, features: &Array1<f64>) -> Result<f64, EngineError>;
}

/// Text similarity capability used for free-text note interpretation.
/// Must be deterministic for a fixed model: same inputs, same score.
pub trait SimilarityModel: Send + Sync {
    fn similarity(&self, text: &str, phrase: &str) -> f64;
}

/// Feature scaling captured at training time. Inference applies the same
/// means/stds that were fitted; it never re-fits.
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    name: &'static str,
    means: Array1<f64>,
    stds: Array1<f64>,
}

impl FeatureScaler {
    pub fn new(name: &'static str, means: Array1<f64>, stds: Array1<f64>) -> Self {
        Self { name, means, stds }
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Transform a single feature vector using the fitted parameters.
    pub fn transform(&self, features: &Array1<f64>) -> Result<Array1<f64>, EngineError> {
        if features.len() != self.means.len() {
            return Err(EngineError::FeatureMismatch {
                stage: self.name,
                expected: self.means.len(),
                actual: features.len(),
            });
        }
        Ok((features - &self.means) / &self.stds)
    }
}

/// Ordinal category codes captured at training time. The orderings are part
/// of the fitted artifact; changing them would invalidate the regression
/// coefficients.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    genders: Vec<Gender>,
    activity_levels: Vec<ActivityLevel>,
    goals: Vec<FitnessGoal>,
}

impl CategoricalEncoder {
    pub fn new(
        genders: Vec<Gender>,
        activity_levels: Vec<ActivityLevel>,
        goals: Vec<FitnessGoal>,
    ) -> Self {
        Self {
            genders,
            activity_levels,
            goals,
        }
    }

    pub fn gender_code(&self, gender: Gender) -> Result<f64, EngineError> {
        Self::code(&self.genders, &gender, "gender")
    }

    pub fn activity_code(&self, level: ActivityLevel) -> Result<f64, EngineError> {
        Self::code(&self.activity_levels, &level, "activity_level")
    }

    pub fn goal_code(&self, goal: FitnessGoal) -> Result<f64, EngineError> {
        Self::code(&self.goals, &goal, "fitness_goal")
    }

    fn code<T: PartialEq>(table: &[T], value: &T, column: &'static str) -> Result<f64, EngineError> {
        table
            .iter()
            .position(|v| v == value)
            .map(|i| i as f64)
            .ok_or_else(|| {
                EngineError::ModelUnavailable(format!(
                    "{column} category missing from fitted encoder"
                ))
            })
    }
}

/// Nearest-centroid cluster assignment over scaled features. Squared
/// Euclidean distance; ties resolve to the lowest cluster id.
#[derive(Debug, Clone)]
pub struct CentroidClassifier {
    centroids: Array2<f64>,
}

impl CentroidClassifier {
    pub fn new(centroids: Array2<f64>) -> Self {
        Self { centroids }
    }
}

impl ClusterModel for CentroidClassifier {
    fn assign(&self, features: &Array1<f64>) -> Result<usize, EngineError> {
        if self.centroids.nrows() == 0 {
            return Err(EngineError::ModelUnavailable(
                "cluster model has no centroids".to_string(),
            ));
        }
        if features.len() != self.centroids.ncols() {
            return Err(EngineError::FeatureMismatch {
                stage: "cluster_assignment",
                expected: self.centroids.ncols(),
                actual: features.len(),
            });
        }

        let distances = Array1::from_iter(self.centroids.rows().into_iter().map(|centroid| {
            centroid
                .iter()
                .zip(features.iter())
                .map(|(c, f)| (c - f) * (c - f))
                .sum::<f64>()
        }));

        distances
            .argmin()
            .map_err(|e| EngineError::ModelUnavailable(format!("cluster distance argmin: {e}")))
    }
}

/// Linear regression over encoded+scaled features.
#[derive(Debug, Clone)]
pub struct LinearCalorieModel {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearCalorieModel {
    pub fn new(coefficients: Array1<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl CalorieModel for LinearCalorieModel {
    fn predict(&self, features: &Array1<f64>) -> Result<f64, EngineError> {
        if features.len() != self.coefficients.len() {
            return Err(EngineError::FeatureMismatch {
                stage: "calorie_regression",
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }
        Ok(self.coefficients.dot(features) + self.intercept)
    }
}

/// Sparse hashed bag-of-words embedding with cosine similarity. Tokens are
/// lowercased alphanumeric runs keyed by their FNV-1a hash into a sparse
/// count vector. Fully deterministic: no sampling, no learned state.
pub struct HashedBowEmbedder {
    token_re: Regex,
}

impl HashedBowEmbedder {
    pub fn new() -> Self {
        Self {
            // Compiled once per embedder; the pattern is a constant.
            token_re: Regex::new(r"[a-z0-9]+").unwrap(),
        }
    }

    fn embed(&self, text: &str) -> HashMap<u64, f64> {
        let mut counts: HashMap<u64, f64> = HashMap::new();
        let lowered = text.to_lowercase();
        for token in self.token_re.find_iter(&lowered) {
            *counts.entry(fnv1a(token.as_str())).or_insert(0.0) += 1.0;
        }
        let norm = counts.values().map(|c| c * c).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in counts.values_mut() {
                *value /= norm;
            }
        }
        counts
    }
}

impl Default for HashedBowEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityModel for HashedBowEmbedder {
    fn similarity(&self, text: &str, phrase: &str) -> f64 {
        let a = self.embed(text);
        let b = self.embed(phrase);
        a.iter()
            .filter_map(|(key, weight)| b.get(key).map(|other| weight * other))
            .sum()
    }
}

fn fnv1a(token: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

// Fitted parameters captured at training time and carried as static
// configuration. The cluster space is [age, bmi, one-hot activity (5)];
// the calorie space is [age, gender, height_cm, weight_kg, activity_level,
// fitness_goal, bmi, bmr, tdee] with ordinal category codes.
const CLUSTER_FEATURE_MEANS: [f64; 7] = [40.0, 26.0, 0.20, 0.25, 0.25, 0.20, 0.10];
const CLUSTER_FEATURE_STDS: [f64; 7] = [15.0, 5.0, 0.40, 0.43, 0.43, 0.40, 0.30];
const CLUSTER_CENTROIDS: [[f64; 7]; 3] = [
    [0.85, 0.90, 1.20, 0.60, -0.50, -0.50, -0.33],
    [-0.20, -0.10, -0.50, 0.20, 0.90, -0.20, -0.33],
    [-0.85, -0.80, -0.50, -0.58, -0.58, 1.50, 2.00],
];
const CALORIE_FEATURE_MEANS: [f64; 9] = [40.0, 0.8, 172.0, 75.0, 2.0, 2.0, 25.5, 1580.0, 2450.0];
const CALORIE_FEATURE_STDS: [f64; 9] = [14.0, 0.75, 10.0, 18.0, 1.2, 1.4, 4.5, 220.0, 420.0];
const CALORIE_COEFFICIENTS: [f64; 9] = [-15.0, 25.0, 10.0, 60.0, 45.0, 250.0, -20.0, 80.0, 380.0];
const CALORIE_INTERCEPT: f64 = 2500.0;

/// Process-wide, read-only bundle of model artifacts. Created once at
/// startup and shared by reference; inference never mutates it, so any
/// number of concurrent requests may use the same bundle.
pub struct ModelBundle {
    pub cluster_scaler: FeatureScaler,
    pub calorie_encoder: CategoricalEncoder,
    pub calorie_scaler: FeatureScaler,
    pub cluster_model: Arc<dyn ClusterModel>,
    pub calorie_model: Arc<dyn CalorieModel>,
    pub embedder: Arc<dyn SimilarityModel>,
    /// Cluster id -> skill tier, established at model-fit time.
    pub cluster_levels: Vec<FitnessLevel>,
}

impl ModelBundle {
    /// Bundle backed by the shipped fitted parameters.
    pub fn pretrained() -> Self {
        let centroids = Array2::from_shape_vec(
            (CLUSTER_CENTROIDS.len(), CLUSTER_CENTROIDS[0].len()),
            CLUSTER_CENTROIDS.iter().flatten().copied().collect(),
        )
        .expect("centroid table shape is a compile-time constant");

        Self {
            cluster_scaler: FeatureScaler::new(
                "cluster_scaler",
                Array1::from_iter(CLUSTER_FEATURE_MEANS),
                Array1::from_iter(CLUSTER_FEATURE_STDS),
            ),
            calorie_encoder: CategoricalEncoder::new(
                vec![Gender::Female, Gender::Male, Gender::Other],
                ActivityLevel::ALL.to_vec(),
                // Goal categories ordered by mean calorie target in the
                // training data.
                vec![
                    FitnessGoal::WeightLoss,
                    FitnessGoal::Maintenance,
                    FitnessGoal::GeneralFitness,
                    FitnessGoal::Endurance,
                    FitnessGoal::MuscleGain,
                ],
            ),
            calorie_scaler: FeatureScaler::new(
                "calorie_scaler",
                Array1::from_iter(CALORIE_FEATURE_MEANS),
                Array1::from_iter(CALORIE_FEATURE_STDS),
            ),
            cluster_model: Arc::new(CentroidClassifier::new(centroids)),
            calorie_model: Arc::new(LinearCalorieModel::new(
                Array1::from_iter(CALORIE_COEFFICIENTS),
                CALORIE_INTERCEPT,
            )),
            embedder: Arc::new(HashedBowEmbedder::new()),
            cluster_levels: vec![
                FitnessLevel::Beginner,
                FitnessLevel::Intermediate,
                FitnessLevel::Advanced,
            ],
        }
    }
}

/// Narrow adapter over the pretrained predictors and their preprocessing.
/// The engine never inspects model internals; it builds feature vectors,
/// applies the fitted preprocessing, and reads back typed results.
#[derive(Clone)]
pub struct InferenceService {
    bundle: Arc<ModelBundle>,
}

impl InferenceService {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self { bundle }
    }

    /// Run cluster assignment and calorie regression for one request.
    pub fn infer(
        &self,
        profile: &Profile,
        metrics: &HealthMetrics,
    ) -> Result<InferenceResult, EngineError> {
        let cluster_features = self.cluster_features(profile, metrics);
        let scaled = self.bundle.cluster_scaler.transform(&cluster_features)?;
        let fitness_cluster = self.bundle.cluster_model.assign(&scaled)?;

        let fitness_level = *self.bundle.cluster_levels.get(fitness_cluster).ok_or(
            EngineError::FeatureMismatch {
                stage: "cluster_level_lookup",
                expected: self.bundle.cluster_levels.len(),
                actual: fitness_cluster,
            },
        )?;

        let calorie_features = self.calorie_features(profile, metrics)?;
        let scaled = self.bundle.calorie_scaler.transform(&calorie_features)?;
        let predicted_calories = self.bundle.calorie_model.predict(&scaled)?;

        if !predicted_calories.is_finite() || predicted_calories <= 0.0 {
            return Err(EngineError::ModelUnavailable(format!(
                "calorie regression produced invalid output: {predicted_calories}"
            )));
        }

        debug!(
            fitness_cluster,
            ?fitness_level,
            predicted_calories,
            "model inference complete"
        );

        Ok(InferenceResult {
            fitness_cluster,
            fitness_level,
            predicted_calories,
        })
    }

    /// Similarity score between free text and a vocabulary phrase.
    pub fn embed_similarity(&self, text: &str, phrase: &str) -> f64 {
        self.bundle.embedder.similarity(text, phrase)
    }

    /// [age, bmi, one-hot activity level]: 7 dimensions.
    fn cluster_features(&self, profile: &Profile, metrics: &HealthMetrics) -> Array1<f64> {
        let mut features = vec![f64::from(profile.age), metrics.bmi];
        for level in ActivityLevel::ALL {
            features.push(if level == profile.activity_level { 1.0 } else { 0.0 });
        }
        Array1::from(features)
    }

    /// [age, gender, height, weight, activity, goal, bmi, bmr, tdee]: 9
    /// dimensions, categoricals as fitted ordinal codes.
    fn calorie_features(
        &self,
        profile: &Profile,
        metrics: &HealthMetrics,
    ) -> Result<Array1<f64>, EngineError> {
        let encoder = &self.bundle.calorie_encoder;
        Ok(Array1::from(vec![
            f64::from(profile.age),
            encoder.gender_code(profile.gender)?,
            profile.height_cm,
            profile.weight_kg,
            encoder.activity_code(profile.activity_level)?,
            encoder.goal_code(profile.fitness_goal)?,
            metrics.bmi,
            metrics.bmr,
            metrics.tdee,
        ]))
    }
}
