//! K-Means segmentation of parking sites
//!
//! Sites are clustered on the single `avg_parked` feature and the fitted
//! clusters are ranked by centroid into ordinal categories. Labels are
//! relative to the current batch: a site called High in one run may be
//! Medium among different peers, which is intended.

use std::fmt;

use crate::data::SiteRecord;
use linfa::prelude::*;
use linfa_clustering::KMeans;
use linfa_nn::distance::L2Dist;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed for K-Means initialization. Fixed so that re-running on identical
/// input yields identical assignments and centroids.
pub const DEFAULT_SEED: u64 = 42;

/// Ordinal site category, assigned by ascending-centroid rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Low,
    Medium,
    High,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Low, Category::Medium, Category::High];

    pub fn label(self) -> &'static str {
        match self {
            Category::Low => "Low",
            Category::Medium => "Medium",
            Category::High => "High",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Fitted segmentation model with per-record labels and ranked categories.
#[derive(Debug)]
pub struct SegmentationModel {
    /// Fitted K-Means model from linfa
    pub model: KMeans<f64, L2Dist>,
    /// Effective number of clusters (may be fewer than requested on tiny inputs)
    pub n_clusters: usize,
    /// Cluster assignment per input record, in input order
    pub labels: Array1<usize>,
    /// Centroid value per cluster id
    pub centroids: Vec<f64>,
    /// Category per cluster id, by ascending-centroid rank
    pub categories: Vec<Category>,
    /// Within-cluster sum of squares
    pub inertia: f64,
}

impl SegmentationModel {
    /// Category of the record at `index` (input order).
    pub fn category_of(&self, index: usize) -> Category {
        self.categories[self.labels[index]]
    }

    /// Categories for every record, in input order.
    pub fn record_categories(&self) -> Vec<Category> {
        self.labels.iter().map(|&l| self.categories[l]).collect()
    }

    /// Get cluster sizes
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for &label in self.labels.iter() {
            if label < self.n_clusters {
                sizes[label] += 1;
            }
        }
        sizes
    }

    /// Record count per category, listed Low to High.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        let record_categories = self.record_categories();
        Category::ALL
            .iter()
            .take(self.n_clusters)
            .map(|&c| {
                let count = record_categories.iter().filter(|&&rc| rc == c).count();
                (c, count)
            })
            .collect()
    }

    /// Centroid values in ascending order.
    pub fn sorted_centroids(&self) -> Vec<f64> {
        let mut sorted = self.centroids.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

/// Segment sites by average parked-vehicle count.
///
/// Returns `Ok(None)` for an empty input: no sites is a normal, quiet
/// outcome, not an error. With fewer records than requested clusters the
/// effective cluster count is reduced to the record count.
///
/// # Arguments
/// * `sites` - Validated site records
/// * `n_clusters` - Requested cluster count, 1 to 3
/// * `max_iters` - Maximum iterations for convergence
/// * `tolerance` - Convergence tolerance
/// * `seed` - RNG seed for deterministic initialization
pub fn segment_sites(
    sites: &[SiteRecord],
    n_clusters: usize,
    max_iters: usize,
    tolerance: f64,
    seed: u64,
) -> crate::Result<Option<SegmentationModel>> {
    if !(1..=3).contains(&n_clusters) {
        anyhow::bail!(
            "number of clusters must be between 1 and 3 for Low/Medium/High segmentation, got {}",
            n_clusters
        );
    }

    if sites.is_empty() {
        return Ok(None);
    }

    let effective_k = n_clusters.min(sites.len());

    let values: Vec<f64> = sites.iter().map(|s| s.avg_parked).collect();
    let features = Array2::from_shape_vec((values.len(), 1), values)?;
    let targets: Array1<usize> = Array1::zeros(features.nrows());
    let dataset = Dataset::new(features.clone(), targets);

    let rng = StdRng::seed_from_u64(seed);
    let model = KMeans::params_with(effective_k, rng, L2Dist)
        .max_n_iterations(max_iters as u64)
        .tolerance(tolerance)
        .fit(&dataset)?;

    let labels = model.predict(&dataset);
    let centroids: Vec<f64> = model.centroids().column(0).to_vec();
    let categories = rank_categories(&centroids);
    let inertia = compute_inertia(&features, &labels, &centroids);

    Ok(Some(SegmentationModel {
        model,
        n_clusters: effective_k,
        labels,
        centroids,
        categories,
        inertia,
    }))
}

/// Rank cluster ids by ascending centroid and map rank 0 -> Low,
/// 1 -> Medium, 2 -> High. Ties keep cluster-id order (stable sort), so the
/// mapping stays total and deterministic even with duplicate centroids.
fn rank_categories(centroids: &[f64]) -> Vec<Category> {
    let mut order: Vec<usize> = (0..centroids.len()).collect();
    order.sort_by(|&a, &b| centroids[a].total_cmp(&centroids[b]));

    let mut categories = vec![Category::Low; centroids.len()];
    for (rank, &cluster_id) in order.iter().enumerate() {
        categories[cluster_id] = Category::ALL[rank];
    }
    categories
}

/// Compute within-cluster sum of squares over the single feature.
fn compute_inertia(features: &Array2<f64>, labels: &Array1<usize>, centroids: &[f64]) -> f64 {
    let mut inertia = 0.0;
    for (i, &cluster) in labels.iter().enumerate() {
        if cluster < centroids.len() {
            let delta = features[[i, 0]] - centroids[cluster];
            inertia += delta * delta;
        }
    }
    inertia
}
