//! Complete distance graph over the locations of one scheduling run.

use std::collections::HashMap;

use crate::error::PlannerError;
use crate::model::Location;
use crate::traits::DistanceMatrixProvider;

/// Pairwise distances (km) keyed by location name. Read-only once built.
#[derive(Debug, Clone)]
pub struct DistanceGraph {
    index: HashMap<String, usize>,
    matrix: Vec<Vec<f64>>,
}

impl DistanceGraph {
    pub fn build<M>(locations: &[Location], provider: &M) -> Result<Self, PlannerError>
    where
        M: DistanceMatrixProvider,
    {
        let mut index = HashMap::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            if index.insert(location.name.clone(), i).is_some() {
                return Err(PlannerError::DuplicateLocation(location.name.clone()));
            }
        }

        let coords = locations.iter().map(Location::coords).collect::<Vec<_>>();
        let matrix = provider.matrix_for(&coords);

        Ok(Self { index, matrix })
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Distance by node index (the order the graph was built from).
    pub fn distance_between(&self, from: usize, to: usize) -> f64 {
        self.matrix[from][to]
    }

    /// Distance by location name; `None` if either name is unknown.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        Some(self.distance_between(self.index_of(from)?, self.index_of(to)?))
    }
}
