use std::borrow::Borrow;
use std::hash::Hash;

use hashbrown::HashMap;
use liblinear::LibLinearModel;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};

use crate::errors::{Result, TweetGenderError};
use crate::feature::FeatureVector;

/// Assigns sequential IDs to keys in first-appearance order.
struct Indexer<K> {
    ids: HashMap<K, usize>,
    keys: Vec<K>,
}

impl<K> Indexer<K>
where
    K: Eq + Hash,
{
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            keys: vec![],
        }
    }

    fn get_id<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + ToOwned<Owned = K> + Eq + Hash,
    {
        if let Some(&id) = self.ids.get(key) {
            id
        } else {
            let id = self.keys.len();
            self.keys.push(key.to_owned());
            self.ids.insert(key.to_owned(), id);
            id
        }
    }

    fn into_keys(self) -> Vec<K> {
        self.keys
    }
}

fn check_lengths(n_features: usize, n_targets: usize) -> Result<()> {
    if n_features != n_targets {
        return Err(TweetGenderError::invalid_argument(
            "targets",
            format!(
                "{} targets given for {} feature vectors",
                n_targets, n_features
            ),
        ));
    }
    Ok(())
}

/// Training parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainParams {
    /// The tolerance of the termination criterion.
    pub epsilon: f64,

    /// The parameter C.
    pub cost: f64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            cost: 1.0,
        }
    }
}

/// Linear classifier of author genders.
///
/// # Examples
///
/// ```
/// use tweetgender::{FeatureVector, GenderClassifier, TrainParams};
///
/// let features = vec![
///     FeatureVector::new(1.0, 0.0, -1.0),
///     FeatureVector::new(-1.0, 0.0, 1.0),
///     FeatureVector::new(0.8, 0.0, -1.2),
///     FeatureVector::new(-1.2, 0.0, 0.8),
/// ];
/// let targets = vec!["male", "female", "male", "female"];
/// let classifier = GenderClassifier::train(&features, &targets, &TrainParams::default()).unwrap();
/// assert_eq!("female", classifier.predict(&FeatureVector::new(-0.9, 0.0, 1.1)));
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "train")))]
#[derive(Clone, Debug)]
pub struct GenderClassifier {
    classes: Vec<String>,
    weights: Vec<[f64; FeatureVector::DIMENSION]>,
    biases: Vec<f64>,
}

impl GenderClassifier {
    /// Trains an L2-regularized logistic regression model.
    ///
    /// # Arguments
    ///
    /// * `features` - Feature vectors of authors.
    /// * `targets` - Gender labels aligned with `features`.
    /// * `params` - Training parameters.
    ///
    /// # Errors
    ///
    /// [`TweetGenderError::InvalidArgument`] is returned if the inputs are empty or have different
    /// lengths. [`TweetGenderError::Classifier`] is returned if LIBLINEAR fails.
    pub fn train<S>(features: &[FeatureVector], targets: &[S], params: &TrainParams) -> Result<Self>
    where
        S: AsRef<str>,
    {
        check_lengths(features.len(), targets.len())?;
        if features.is_empty() {
            return Err(TweetGenderError::invalid_argument(
                "features",
                "must not be empty",
            ));
        }

        let mut class_ids: Indexer<String> = Indexer::new();
        let ys: Vec<f64> = targets
            .iter()
            .map(|target| class_ids.get_id(target.as_ref()) as f64)
            .collect();
        let xs: Vec<Vec<(u32, f64)>> = features
            .iter()
            .map(|v| (1..).zip(v.to_array()).collect())
            .collect();

        let mut builder = liblinear::Builder::new();
        let training_input = liblinear::util::TrainingInput::from_sparse_features(ys, xs)
            .map_err(|e| TweetGenderError::Classifier(format!("liblinear error: {:?}", e)))?;
        builder.problem().input_data(training_input).bias(1.0);
        builder
            .parameters()
            .solver_type(liblinear::SolverType::L2R_LR)
            .stopping_criterion(params.epsilon)
            .constraints_violation_cost(params.cost);
        let model = builder
            .build_model()
            .map_err(|e| TweetGenderError::Classifier(e.to_string()))?;

        let keys = class_ids.into_keys();
        let mut classes = vec![];
        let mut weights = vec![];
        let mut biases = vec![];
        for (label_idx, &class_id) in model.labels().iter().enumerate() {
            let label_idx = i32::try_from(label_idx)
                .map_err(|e| TweetGenderError::Classifier(e.to_string()))?;
            let class = usize::try_from(class_id)
                .ok()
                .and_then(|i| keys.get(i))
                .ok_or_else(|| {
                    TweetGenderError::Classifier(format!("unknown class ID: {}", class_id))
                })?;
            let mut w = [0.0; FeatureVector::DIMENSION];
            for (fid, coef) in (1..).zip(&mut w) {
                *coef = model.feature_coefficient(fid, label_idx);
            }
            classes.push(class.clone());
            weights.push(w);
            biases.push(model.label_bias(label_idx));
        }
        debug!(?classes, ?weights, ?biases, "trained");
        Ok(Self {
            classes,
            weights,
            biases,
        })
    }

    /// Gets the class labels known to the classifier.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Predicts the gender of an author.
    pub fn predict(&self, vector: &FeatureVector) -> &str {
        let x = vector.to_array();
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            let score = w.iter().zip(&x).map(|(w, x)| w * x).sum::<f64>() + b;
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        &self.classes[best]
    }

    /// Computes the accuracy over the given samples.
    ///
    /// # Errors
    ///
    /// [`TweetGenderError::InvalidArgument`] is returned if the inputs have different lengths.
    pub fn score<S>(&self, features: &[FeatureVector], targets: &[S]) -> Result<f64>
    where
        S: AsRef<str>,
    {
        check_lengths(features.len(), targets.len())?;
        if features.is_empty() {
            return Ok(0.0);
        }
        let n_correct = features
            .iter()
            .zip(targets)
            .filter(|&(v, target)| self.predict(v) == target.as_ref())
            .count();
        Ok(n_correct as f64 / features.len() as f64)
    }
}

/// Splits sample indices into `k` folds.
///
/// The first `n % k` folds have one more test sample than the others.
///
/// # Arguments
///
/// * `n` - The number of samples.
/// * `k` - The number of folds.
/// * `shuffle` - Whether to shuffle samples before splitting.
/// * `seed` - Seed of the shuffling. A random seed is used if `None`.
///
/// # Returns
///
/// Pairs of sorted train indices and sorted test indices.
///
/// # Errors
///
/// [`TweetGenderError::InvalidArgument`] is returned if `k < 2` or `k > n`.
pub fn k_fold_indices(
    n: usize,
    k: usize,
    shuffle: bool,
    seed: Option<u64>,
) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
    if k < 2 {
        return Err(TweetGenderError::invalid_argument(
            "k",
            format!("at least 2 folds are required, got {}", k),
        ));
    }
    if k > n {
        return Err(TweetGenderError::invalid_argument(
            "k",
            format!("{} folds exceed the number of samples {}", k, n),
        ));
    }
    let mut indices: Vec<usize> = (0..n).collect();
    if shuffle {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        indices.shuffle(&mut rng);
    }
    let mut folds = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let size = n / k + usize::from(i < n % k);
        let mut test = indices[start..start + size].to_vec();
        let mut train: Vec<usize> = indices[..start]
            .iter()
            .chain(&indices[start + size..])
            .copied()
            .collect();
        test.sort_unstable();
        train.sort_unstable();
        folds.push((train, test));
        start += size;
    }
    Ok(folds)
}

/// Accuracies of a fold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldScore {
    pub train: f64,
    pub test: f64,
}

/// Result of a cross-validation.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossValidation {
    pub folds: Vec<FoldScore>,
}

impl CrossValidation {
    pub fn mean_train_score(&self) -> f64 {
        self.folds.iter().map(|f| f.train).sum::<f64>() / self.folds.len() as f64
    }

    pub fn mean_test_score(&self) -> f64 {
        self.folds.iter().map(|f| f.test).sum::<f64>() / self.folds.len() as f64
    }
}

/// Runs k-fold cross-validation of [`GenderClassifier`].
///
/// # Arguments
///
/// * `features` - Feature vectors of authors.
/// * `targets` - Gender labels aligned with `features`.
/// * `k` - The number of folds.
/// * `shuffle` - Whether to shuffle samples before splitting.
/// * `seed` - Seed of the shuffling.
/// * `params` - Training parameters.
///
/// # Errors
///
/// See [`k_fold_indices`] and [`GenderClassifier::train`].
pub fn k_fold_cross_validate<S>(
    features: &[FeatureVector],
    targets: &[S],
    k: usize,
    shuffle: bool,
    seed: Option<u64>,
    params: &TrainParams,
) -> Result<CrossValidation>
where
    S: AsRef<str>,
{
    check_lengths(features.len(), targets.len())?;
    let mut folds = vec![];
    for (i, (train_idx, test_idx)) in k_fold_indices(features.len(), k, shuffle, seed)?
        .into_iter()
        .enumerate()
    {
        let (train_x, train_y): (Vec<_>, Vec<_>) = train_idx
            .iter()
            .map(|&j| (features[j], targets[j].as_ref()))
            .unzip();
        let (test_x, test_y): (Vec<_>, Vec<_>) = test_idx
            .iter()
            .map(|&j| (features[j], targets[j].as_ref()))
            .unzip();
        let classifier = GenderClassifier::train(&train_x, &train_y, params)?;
        let score = FoldScore {
            train: classifier.score(&train_x, &train_y)?,
            test: classifier.score(&test_x, &test_y)?,
        };
        debug!(fold = i, train = score.train, test = score.test, "evaluated");
        folds.push(score);
    }
    let cv = CrossValidation { folds };
    info!(
        k,
        train = cv.mean_train_score(),
        test = cv.mean_test_score(),
        "cross-validated"
    );
    Ok(cv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable(n: usize) -> (Vec<FeatureVector>, Vec<&'static str>) {
        (0..n)
            .map(|i| {
                let d = 0.05 * (i / 2) as f64;
                if i % 2 == 0 {
                    (FeatureVector::new(-0.5 - d, 0.0, 1.0 + d), "female")
                } else {
                    (FeatureVector::new(0.5 + d, 0.0, -1.0 - d), "male")
                }
            })
            .unzip()
    }

    #[test]
    fn test_k_fold_indices_sizes() {
        let folds = k_fold_indices(10, 3, false, None).unwrap();
        let sizes: Vec<_> = folds.iter().map(|(_, test)| test.len()).collect();
        assert_eq!(vec![4, 3, 3], sizes);
        assert_eq!(vec![0, 1, 2, 3], folds[0].1);
        assert_eq!(vec![4, 5, 6, 7, 8, 9], folds[0].0);
        for (train, test) in &folds {
            assert_eq!(10, train.len() + test.len());
        }
    }

    #[test]
    fn test_k_fold_indices_shuffle_partition() {
        let folds = k_fold_indices(17, 5, true, Some(42)).unwrap();
        let mut all: Vec<_> = folds.iter().flat_map(|(_, test)| test.clone()).collect();
        all.sort_unstable();
        assert_eq!((0..17).collect::<Vec<_>>(), all);
        for (train, test) in &folds {
            assert!(test.iter().all(|i| !train.contains(i)));
        }
        assert_eq!(folds, k_fold_indices(17, 5, true, Some(42)).unwrap());
    }

    #[test]
    fn test_k_fold_indices_invalid_k() {
        assert!(matches!(
            k_fold_indices(10, 1, false, None),
            Err(TweetGenderError::InvalidArgument(_))
        ));
        assert!(matches!(
            k_fold_indices(3, 4, false, None),
            Err(TweetGenderError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_train_and_predict() {
        let (features, targets) = separable(20);
        let classifier =
            GenderClassifier::train(&features, &targets, &TrainParams::default()).unwrap();
        assert_eq!(vec!["female", "male"], classifier.classes());
        assert_eq!("female", classifier.predict(&FeatureVector::new(-1.0, 0.0, 1.0)));
        assert_eq!("male", classifier.predict(&FeatureVector::new(1.0, 0.0, -1.0)));
        assert_eq!(1.0, classifier.score(&features, &targets).unwrap());
    }

    #[test]
    fn test_cross_validate_separable() {
        let (features, targets) = separable(20);
        let cv =
            k_fold_cross_validate(&features, &targets, 5, true, Some(0), &TrainParams::default())
                .unwrap();
        assert_eq!(5, cv.folds.len());
        assert!(cv.mean_train_score() > 0.99);
        assert!(cv.mean_test_score() > 0.99);
    }

    #[test]
    fn test_length_mismatch() {
        let (features, _) = separable(4);
        assert!(matches!(
            GenderClassifier::train(&features, &["male"], &TrainParams::default()),
            Err(TweetGenderError::InvalidArgument(_))
        ));
        assert!(matches!(
            k_fold_cross_validate(&features, &["male"], 2, false, None, &TrainParams::default()),
            Err(TweetGenderError::InvalidArgument(_))
        ));
    }
}
