use rand::Rng;
use rand::rngs::SmallRng;

/// Uniform draws in `[0, 1)`. Production boards use `SmallRng`; tests feed
/// fixed sequences.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for SmallRng {
    fn next_unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    draws: Vec<f64>,
    idx: usize,
}

impl SequenceSource {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, idx: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.idx % self.draws.len()];
        self.idx += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_small_rng_stays_in_unit_interval() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_sequence_cycles() {
        let mut seq = SequenceSource::new(vec![0.1, 0.5]);
        assert_eq!(seq.next_unit(), 0.1);
        assert_eq!(seq.next_unit(), 0.5);
        assert_eq!(seq.next_unit(), 0.1);
    }

    #[test]
    fn test_sequence_clamps_to_half_open_range() {
        let mut seq = SequenceSource::new(vec![1.0]);
        assert!(seq.next_unit() < 1.0);
        let mut empty = SequenceSource::new(Vec::new());
        assert_eq!(empty.next_unit(), 0.0);
    }
}
