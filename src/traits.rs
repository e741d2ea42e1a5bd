//! Seams between the planner core and its collaborators.

/// Provides a distance matrix (kilometres) for a set of locations.
///
/// The matrix is indexed by the provided location order and must be
/// square with a zero diagonal.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>>;
}
