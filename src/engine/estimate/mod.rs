pub mod size_estimator;

pub use size_estimator::SizeEstimator;
