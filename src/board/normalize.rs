use crate::board::clue::RawClueList;
use crate::board::random::RandomSource;
use crate::board::{Board, Column};
use crate::config::BoardDimensions;

/// Draws at or above this (on a 1..=100 scale) leave the category without a
/// daily double, giving 4 in 100 odds.
const DAILY_DOUBLE_THRESHOLD: u32 = 5;

/// Build a playable grid from raw per-category clue lists.
///
/// Empty categories are skipped entirely, so the board may be narrower than
/// `categories_num` when the source runs dry. Each emitted category takes two
/// draws from `rng`, eligibility first and slot second, even when the chosen
/// slot is empty.
pub fn normalize(
    raw: Vec<RawClueList>,
    dims: BoardDimensions,
    rng: &mut impl RandomSource,
) -> Board {
    let clues_num = dims.clues_num() as usize;

    let columns = raw
        .into_iter()
        .filter(|clues| !clues.is_empty())
        .take(dims.categories_num() as usize)
        .map(|clues| {
            let title = clues[0].category.title.clone();
            let mut column: Vec<_> = clues
                .into_iter()
                .filter(|clue| clue.has_value())
                .take(clues_num)
                .collect();

            let eligible = daily_double_roll(&mut *rng);
            let slot = slot_index(&mut *rng, clues_num);
            if let Some(clue) = column.get_mut(slot) {
                clue.daily_double = eligible;
            }

            Column {
                title,
                clues: column,
            }
        })
        .collect();

    Board::new(columns)
}

fn daily_double_roll(rng: &mut impl RandomSource) -> bool {
    let roll = (rng.next_unit() * 100.0 + 1.0).floor() as u32;
    roll < DAILY_DOUBLE_THRESHOLD
}

fn slot_index(rng: &mut impl RandomSource, clues_num: usize) -> usize {
    ((rng.next_unit() * clues_num as f64).floor() as usize).min(clues_num.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::clue::{CategoryRef, Clue};
    use crate::board::random::SequenceSource;

    fn clue(id: i64, value: Option<i64>, title: &str) -> Clue {
        Clue {
            id,
            question: format!("q{id}"),
            answer: format!("a{id}"),
            value,
            category: CategoryRef {
                title: title.to_string(),
            },
            daily_double: false,
        }
    }

    fn category(base: i64, count: i64) -> RawClueList {
        (0..count)
            .map(|i| clue(base + i, Some((i + 1) * 100), &format!("cat{base}")))
            .collect()
    }

    fn never_daily_double() -> SequenceSource {
        SequenceSource::new(vec![0.99])
    }

    #[test]
    fn test_truncates_to_clues_num() {
        let raw = (0..7).map(|c| category(c * 100, 8)).collect();
        let dims = BoardDimensions::new(6, 5).unwrap();
        let board = normalize(raw, dims, &mut never_daily_double());
        assert_eq!(board.columns().len(), 6);
        for column in board.columns() {
            assert_eq!(column.clues.len(), 5);
        }
    }

    #[test]
    fn test_skips_empty_categories_without_gaps() {
        let mut raw: Vec<RawClueList> = (0..7).map(|c| category(c * 100, 8)).collect();
        raw[2] = Vec::new();
        let dims = BoardDimensions::new(6, 5).unwrap();
        let board = normalize(raw, dims, &mut never_daily_double());
        let titles: Vec<_> = board.columns().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["cat0", "cat100", "cat300", "cat400", "cat500", "cat600"]
        );
    }

    #[test]
    fn test_fewer_categories_than_requested() {
        let raw = vec![category(0, 3), Vec::new()];
        let dims = BoardDimensions::new(6, 5).unwrap();
        let board = normalize(raw, dims, &mut never_daily_double());
        assert_eq!(board.columns().len(), 1);
        assert_eq!(board.columns()[0].clues.len(), 3);
    }

    #[test]
    fn test_filters_null_and_zero_values() {
        let raw = vec![vec![
            clue(1, None, "mixed"),
            clue(2, Some(0), "mixed"),
            clue(3, Some(200), "mixed"),
            clue(4, Some(400), "mixed"),
        ]];
        let dims = BoardDimensions::new(1, 5).unwrap();
        let board = normalize(raw, dims, &mut never_daily_double());
        let ids: Vec<_> = board.columns()[0].clues.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_all_filtered_column_keeps_title() {
        let raw = vec![vec![clue(1, None, "void"), clue(2, Some(0), "void")]];
        let dims = BoardDimensions::new(1, 5).unwrap();
        let board = normalize(raw, dims, &mut never_daily_double());
        assert_eq!(board.columns().len(), 1);
        assert_eq!(board.columns()[0].title, "void");
        assert!(board.columns()[0].clues.is_empty());
    }

    #[test]
    fn test_daily_double_placed_at_drawn_slot() {
        // roll = floor(0.02 * 100 + 1) = 3 -> eligible; slot = floor(0.5 * 5) = 2
        let mut rng = SequenceSource::new(vec![0.02, 0.5]);
        let dims = BoardDimensions::new(1, 5).unwrap();
        let board = normalize(vec![category(0, 5)], dims, &mut rng);
        let flags: Vec<_> = board.columns()[0]
            .clues
            .iter()
            .map(|c| c.daily_double)
            .collect();
        assert_eq!(flags, vec![false, false, true, false, false]);
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        // roll = floor(0.045 * 100 + 1) = 5 -> not eligible
        let mut rng = SequenceSource::new(vec![0.045, 0.0]);
        let dims = BoardDimensions::new(1, 5).unwrap();
        let board = normalize(vec![category(0, 5)], dims, &mut rng);
        assert_eq!(board.daily_double_count(), 0);

        // roll = floor(0.0399 * 100 + 1) = 4 -> eligible
        let mut rng = SequenceSource::new(vec![0.0399, 0.0]);
        let board = normalize(vec![category(0, 5)], dims, &mut rng);
        assert_eq!(board.daily_double_count(), 1);
    }

    #[test]
    fn test_daily_double_slot_beyond_short_column_is_dropped() {
        // eligible, slot = floor(0.9 * 5) = 4 but the column only holds 2 clues
        let mut rng = SequenceSource::new(vec![0.0, 0.9]);
        let dims = BoardDimensions::new(1, 5).unwrap();
        let board = normalize(vec![category(0, 2)], dims, &mut rng);
        assert_eq!(board.daily_double_count(), 0);
    }

    #[test]
    fn test_two_draws_per_emitted_category() {
        // column 1: eligible at slot 0; column 2: not eligible; column 3: eligible at slot 4
        let mut rng = SequenceSource::new(vec![0.0, 0.0, 0.5, 0.5, 0.01, 0.99]);
        let dims = BoardDimensions::new(3, 5).unwrap();
        let raw = vec![category(0, 5), category(100, 5), category(200, 5)];
        let board = normalize(raw, dims, &mut rng);
        assert!(board.columns()[0].clues[0].daily_double);
        assert!(board.columns()[1].clues.iter().all(|c| !c.daily_double));
        assert!(board.columns()[2].clues[4].daily_double);
    }

    #[test]
    fn test_invariants_hold_under_real_rng() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(42);
        let dims = BoardDimensions::new(6, 5).unwrap();
        for round in 0..200 {
            let raw: Vec<RawClueList> = (0..7)
                .map(|c| {
                    (0..(c + round) % 9)
                        .map(|i| clue(c * 100 + i, if i % 3 == 0 { None } else { Some(i * 100) }, "x"))
                        .collect()
                })
                .collect();
            let board = normalize(raw, dims, &mut rng);
            assert!(board.columns().len() <= 6);
            for column in board.columns() {
                assert!(column.clues.len() <= 5);
                assert!(column.clues.iter().all(|c| c.has_value()));
                assert!(column.clues.iter().filter(|c| c.daily_double).count() <= 1);
            }
        }
    }
}
