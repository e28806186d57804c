//! Row-major enumeration of an N-dimensional index grid.
//!
//! A sweep is a grid whose shape is the enabled-value count of each axis.
//! Points are visited in row-major order: the last dimension varies fastest
//! and the first dimension slowest, which is the order nested loops produce.

/// Total number of points in a grid of the given shape.
///
/// An empty shape has exactly one point (the empty tuple).
pub fn grid_len(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Iterator over all indices in a grid
#[derive(Debug, Clone)]
pub struct GridIndices {
    shape: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl GridIndices {
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            current: vec![0; shape.len()],
            done: shape.contains(&0),
        }
    }
}

impl Iterator for GridIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current.clone();

        if self.shape.is_empty() {
            self.done = true;
            return Some(result);
        }

        // Increment indices (row-major: last dimension varies fastest)
        for i in (0..self.shape.len()).rev() {
            self.current[i] += 1;
            if self.current[i] < self.shape[i] {
                break;
            }
            self.current[i] = 0;
            if i == 0 {
                self.done = true;
            }
        }

        Some(result)
    }
}

/// Cartesian product of ordered sequences, last sequence varying fastest.
pub fn cartesian_product<T: Clone>(sequences: &[Vec<T>]) -> Vec<Vec<T>> {
    let shape: Vec<usize> = sequences.iter().map(Vec::len).collect();
    GridIndices::new(&shape)
        .map(|indices| {
            indices
                .iter()
                .zip(sequences)
                .map(|(&i, seq)| seq[i].clone())
                .collect()
        })
        .collect()
}
