//! Deck dealing and tile bookkeeping.

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{GameRng, ImageRef, ImageSet, Tile, TileId, TileState};

/// The shuffled tiles of one round, indexed by board position.
///
/// Backed by `im::Vector`, so cloning a deck shares its tiles.
///
/// ## Usage
///
/// ```
/// use memory_pairs::core::{GameRng, ImageSet, TileId};
/// use memory_pairs::deck::Deck;
///
/// let images = ImageSet::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
/// let mut rng = GameRng::new(42);
/// let deck = Deck::deal(&images, &mut rng);
///
/// assert_eq!(deck.len(), 6);
/// assert!(deck.has_valid_pairs());
/// assert_eq!(deck.get(TileId::new(5)).map(|t| t.id), Some(TileId::new(5)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    tiles: Vector<Tile>,
}

impl Deck {
    /// Duplicate every image, shuffle the doubled list, and lay it out.
    pub fn deal(images: &ImageSet, rng: &mut GameRng) -> Self {
        let mut faces: Vec<ImageRef> = images
            .iter()
            .chain(images.iter())
            .cloned()
            .collect();
        rng.shuffle(&mut faces);

        let tiles = faces
            .into_iter()
            .enumerate()
            .map(|(position, image)| Tile::new(TileId::new(position as u16), image))
            .collect();

        Self { tiles }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    #[must_use]
    pub fn state_of(&self, id: TileId) -> Option<TileState> {
        self.get(id).map(|tile| tile.state)
    }

    /// Tiles in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Board positions holding `image`.
    #[must_use]
    pub fn positions_of(&self, image: &ImageRef) -> SmallVec<[TileId; 2]> {
        self.tiles
            .iter()
            .filter(|tile| &tile.image == image)
            .map(|tile| tile.id)
            .collect()
    }

    /// Does every image occupy exactly two positions?
    #[must_use]
    pub fn has_valid_pairs(&self) -> bool {
        let mut counts: FxHashMap<&ImageRef, usize> = FxHashMap::default();
        for tile in &self.tiles {
            *counts.entry(&tile.image).or_default() += 1;
        }
        counts.values().all(|&count| count == 2)
    }

    /// `Hidden -> Flipped`. False for unknown tiles or other states.
    pub fn flip(&mut self, id: TileId) -> bool {
        self.tiles.get_mut(id.index()).is_some_and(Tile::flip)
    }

    /// `Flipped -> Matched`.
    pub fn mark_matched(&mut self, id: TileId) -> bool {
        self.tiles.get_mut(id.index()).is_some_and(Tile::mark_matched)
    }

    /// `Flipped -> Hidden`.
    pub fn hide(&mut self, id: TileId) -> bool {
        self.tiles.get_mut(id.index()).is_some_and(Tile::hide)
    }

    /// Do the tiles at `a` and `b` show the same image?
    #[must_use]
    pub fn is_pair(&self, a: TileId, b: TileId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(first), Some(second)) => first.pairs_with(second),
            _ => false,
        }
    }
}
