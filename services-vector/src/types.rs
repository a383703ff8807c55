//! Collection types shared by the backends.

/// Similarity metric of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distance {
    /// Cosine similarity; higher scores are closer.
    #[default]
    Cosine,
    /// Dot product; higher scores are closer.
    Dot,
}

/// Parameters used when creating a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionParams {
    /// Fixed embedding length for every record.
    pub vector_size: usize,
    pub distance: Distance,
}

impl CollectionParams {
    /// Cosine collection with the given dimensionality.
    pub fn cosine(vector_size: usize) -> Self {
        Self {
            vector_size,
            distance: Distance::Cosine,
        }
    }
}

/// Metadata returned by a collection lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub name: String,
    pub points_count: u64,
}
