//! Image identifiers.
//!
//! The engine never looks at image content. An `ImageRef` is an opaque,
//! comparable token (usually a path or URI) and two tiles form a pair
//! exactly when their tokens are equal.
//!
//! ## Usage
//!
//! ```
//! use memory_pairs::core::{ImageRef, ImageSet};
//!
//! let images = ImageSet::new(vec![ImageRef::new("a.jpg"), ImageRef::new("b.jpg")]).unwrap();
//! assert_eq!(images.len(), 2);
//! assert!(ImageSet::new(vec![]).is_err());
//! ```

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Most distinct images one board can hold (tile ids are `u16`).
pub const MAX_IMAGES: usize = (u16::MAX as usize + 1) / 2;

/// Identifies which picture a tile shows.
///
/// Cloning is cheap (reference counted).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(Arc<str>);

impl ImageRef {
    /// Create an image reference from a path or URI.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short human label: the file stem of the identifier.
    ///
    /// `./images/cereza.jpg` becomes `cereza`.
    #[must_use]
    pub fn label(&self) -> &str {
        let full: &str = &self.0;
        let name = full.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(full);
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ImageRef {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

/// The distinct images a game is played with.
///
/// Guaranteed non-empty, free of duplicates and no larger than
/// `MAX_IMAGES`, so a deck dealt from it holds every image exactly twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSet {
    images: Vec<ImageRef>,
}

impl ImageSet {
    /// Validate and wrap an ordered image list.
    pub fn new(images: Vec<ImageRef>) -> Result<Self> {
        if images.is_empty() {
            return Err(Error::NoImages);
        }
        if images.len() > MAX_IMAGES {
            return Err(Error::TooManyImages {
                count: images.len(),
                limit: MAX_IMAGES,
            });
        }

        let mut seen = FxHashSet::default();
        for image in &images {
            if !seen.insert(image) {
                return Err(Error::DuplicateImage(image.clone()));
            }
        }

        Ok(Self { images })
    }

    /// Number of distinct images, which is also the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.iter()
    }
}
