//! Deck dealing tests.
//!
//! Property tests check the dealing invariants for any image count and seed.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use memory_pairs::{Deck, GameRng, ImageRef, ImageSet, TileId, TileState};

fn image_set(count: usize) -> ImageSet {
    let images = (0..count).map(|i| ImageRef::new(format!("./images/{i}.jpg"))).collect();
    ImageSet::new(images).unwrap()
}

proptest! {
    /// Every image is dealt exactly twice and nothing else is dealt.
    #[test]
    fn prop_each_image_dealt_twice(count in 1usize..64, seed in any::<u64>()) {
        let images = image_set(count);
        let deck = Deck::deal(&images, &mut GameRng::new(seed));

        prop_assert_eq!(deck.len(), 2 * count);
        prop_assert_eq!(deck.pair_count(), count);

        let mut counts: FxHashMap<&ImageRef, usize> = FxHashMap::default();
        for tile in deck.iter() {
            *counts.entry(&tile.image).or_insert(0) += 1;
        }
        prop_assert_eq!(counts.len(), count);
        prop_assert!(counts.values().all(|&n| n == 2));
        prop_assert!(deck.has_valid_pairs());
    }

    /// Tile ids are board positions and every tile starts face down.
    #[test]
    fn prop_ids_match_positions(count in 1usize..32, seed in any::<u64>()) {
        let deck = Deck::deal(&image_set(count), &mut GameRng::new(seed));

        for (position, tile) in deck.iter().enumerate() {
            prop_assert_eq!(tile.id, TileId::new(position as u16));
            prop_assert_eq!(tile.state, TileState::Hidden);
        }
    }

    /// The same seed always deals the same deck.
    #[test]
    fn prop_seeded_deal_is_deterministic(count in 1usize..32, seed in any::<u64>()) {
        let images = image_set(count);
        let first = Deck::deal(&images, &mut GameRng::new(seed));
        let second = Deck::deal(&images, &mut GameRng::new(seed));
        prop_assert_eq!(first, second);
    }

    /// `positions_of` finds both copies, and they form a pair.
    #[test]
    fn prop_positions_form_pairs(count in 1usize..32, seed in any::<u64>()) {
        let images = image_set(count);
        let deck = Deck::deal(&images, &mut GameRng::new(seed));

        for image in images.iter() {
            let positions = deck.positions_of(image);
            prop_assert_eq!(positions.len(), 2);
            prop_assert!(deck.is_pair(positions[0], positions[1]));
        }
    }
}

// =============================================================================
// Shuffle
// =============================================================================

/// Test that dealing actually shuffles: across seeds, the first tile is not
/// always the first image.
#[test]
fn test_deal_shuffles() {
    let images = image_set(8);
    let first_image = ImageRef::new("./images/0.jpg");

    let unshuffled = (0..50u64)
        .filter(|&seed| {
            let deck = Deck::deal(&images, &mut GameRng::new(seed));
            deck.get(TileId::new(0)).map(|tile| &tile.image) == Some(&first_image)
        })
        .count();
    assert!(unshuffled < 50);
}

/// Test that a single image deals one pair.
#[test]
fn test_single_image_deck() {
    let deck = Deck::deal(&image_set(1), &mut GameRng::new(0));
    assert_eq!(deck.len(), 2);
    assert!(deck.is_pair(TileId::new(0), TileId::new(1)));
}

/// Test tile transitions through the deck.
#[test]
fn test_tile_transitions() {
    let mut deck = Deck::deal(&image_set(2), &mut GameRng::new(5));
    let tile = TileId::new(0);

    assert!(deck.flip(tile));
    assert!(!deck.flip(tile));
    assert!(deck.hide(tile));
    assert!(deck.flip(tile));
    assert!(deck.mark_matched(tile));
    assert!(!deck.hide(tile));
    assert_eq!(deck.state_of(tile), Some(TileState::Matched));

    assert!(!deck.flip(TileId::new(9)));
}
