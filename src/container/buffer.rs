use crate::engine::errors::ContainerError;

/// Point storage handed between a container reader and a writer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer<P> {
    points: Vec<P>,
}

impl<P> PointBuffer<P> {
    /// Reserves room for `declared` points up front, failing instead of aborting
    /// when the declared count cannot be allocated.
    pub fn with_declared(declared: u64) -> Result<Self, ContainerError> {
        let wanted =
            usize::try_from(declared).map_err(|_| ContainerError::Allocation { points: declared })?;
        let mut points = Vec::new();
        points
            .try_reserve_exact(wanted)
            .map_err(|_| ContainerError::Allocation { points: declared })?;
        Ok(Self { points })
    }

    pub fn push(&mut self, point: P) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[P] {
        &self.points
    }

    pub fn into_points(self) -> Vec<P> {
        self.points
    }
}

impl<P> Default for PointBuffer<P> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<P> From<Vec<P>> for PointBuffer<P> {
    fn from(points: Vec<P>) -> Self {
        Self { points }
    }
}
