//! # Similarity Index
//!
//! File: cli/src/index.rs
//!
//! ## Overview
//!
//! Exact nearest-neighbor search over the question embeddings. The knowledge
//! bases this chatbot works with are small, so a flat scan over every stored
//! vector is both simple and exact. Distances are squared Euclidean.
//!
//! Results are ordered by ascending distance; equal distances keep the lower
//! entry index first. The index is built once at startup and never mutated.
//!
use crate::embedding::Embedding;
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised while building or querying the index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("cannot build an index from zero vectors")]
    Empty,

    #[error("vector dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// One query hit: the stored entry's index and its squared distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f32,
}

/// Brute-force index over a fixed set of vectors.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Embedding>,
}

impl FlatIndex {
    /// Builds the index. All vectors must share one dimension.
    pub fn build(vectors: Vec<Embedding>) -> Result<Self, IndexError> {
        let dimension = vectors.first().ok_or(IndexError::Empty)?.len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(IndexError::DimensionMismatch {
                expected: dimension,
                found: bad.len(),
            });
        }
        Ok(Self { dimension, vectors })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the `k` nearest stored vectors (fewer when the index is smaller).
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>, IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                found: vector.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, stored)| Neighbor {
                index,
                distance: squared_euclidean(vector, stored),
            })
            .collect();

        neighbors.sort_by(|a, b| match a.distance.total_cmp(&b.distance) {
            Ordering::Equal => a.index.cmp(&b.index),
            other => other,
        });
        neighbors.truncate(k);
        Ok(neighbors)
    }
}

/// Sum of squared element differences.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
