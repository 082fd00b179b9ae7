// ABOUTME: Dice rolling with an injectable random source.
// ABOUTME: Rolls five dice and rerolls them under a keep-mask.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of dice in a Yahtzee roll.
pub const NUM_DICE: usize = 5;

/// Number of faces on each die.
pub const FACES: u32 = 6;

/// Trait for random number generation, allowing for testing with fixed values.
pub trait Rng {
    /// Generate a random number in the range [1, max].
    fn roll(&mut self, max: u32) -> u32;
}

/// Default RNG using fastrand.
pub struct FastRng(fastrand::Rng);

impl FastRng {
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for FastRng {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng for FastRng {
    fn roll(&mut self, max: u32) -> u32 {
        self.0.u32(1..=max)
    }
}

/// Five die faces, each in 1..=6.
///
/// Order only matters for keep-mask rerolls; scoring treats the dice as a
/// multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Dice([u8; NUM_DICE]);

impl Dice {
    /// Build a dice set, rejecting faces outside 1..=6.
    pub fn new(values: [u8; NUM_DICE]) -> Result<Self> {
        if let Some(bad) = values.iter().find(|&&v| !(1..=FACES as u8).contains(&v)) {
            return Err(Error::InvalidInput(format!("die value {} is not in 1..=6", bad)));
        }
        Ok(Self(values))
    }

    /// Roll five fresh dice.
    ///
    /// Fails with `InvalidInput` if `rng` yields a value outside 1..=6.
    pub fn roll(rng: &mut impl Rng) -> Result<Self> {
        let mut values = [0u8; NUM_DICE];
        for value in values.iter_mut() {
            *value = roll_die(rng)?;
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> [u8; NUM_DICE] {
        self.0
    }

    /// Count of each face, indexed by face value (index 0 unused).
    pub fn counts(&self) -> [u8; 7] {
        let mut counts = [0u8; 7];
        for &d in &self.0 {
            counts[d as usize] += 1;
        }
        counts
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&d| d as u32).sum()
    }

    /// Reroll every die not marked as kept.
    pub fn reroll_keeping(&self, keep: KeepMask, rng: &mut impl Rng) -> Result<Self> {
        let mut values = self.0;
        for (value, &kept) in values.iter_mut().zip(keep.0.iter()) {
            if !kept {
                *value = roll_die(rng)?;
            }
        }
        Ok(Self(values))
    }
}

impl TryFrom<&[u8]> for Dice {
    type Error = Error;

    fn try_from(values: &[u8]) -> Result<Self> {
        let values: [u8; NUM_DICE] = values.try_into().map_err(|_| {
            Error::InvalidInput(format!("expected {} dice, got {}", NUM_DICE, values.len()))
        })?;
        Dice::new(values)
    }
}

impl TryFrom<Vec<u8>> for Dice {
    type Error = Error;

    fn try_from(values: Vec<u8>) -> Result<Self> {
        Dice::try_from(values.as_slice())
    }
}

impl From<Dice> for Vec<u8> {
    fn from(dice: Dice) -> Self {
        dice.0.to_vec()
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", faces.join(", "))
    }
}

/// Per-die flags; `true` keeps the die on a reroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeepMask([bool; NUM_DICE]);

impl KeepMask {
    pub fn new(keep: [bool; NUM_DICE]) -> Self {
        Self(keep)
    }

    /// Reroll everything.
    pub fn none() -> Self {
        Self([false; NUM_DICE])
    }

    /// Build a mask from 0/1 flags.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        let flags = bits
            .iter()
            .map(|&b| match b {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(Error::InvalidInput(format!("keep flag {} is not 0 or 1", other))),
            })
            .collect::<Result<Vec<bool>>>()?;
        KeepMask::try_from(flags.as_slice())
    }

    pub fn flags(&self) -> [bool; NUM_DICE] {
        self.0
    }
}

impl TryFrom<&[bool]> for KeepMask {
    type Error = Error;

    fn try_from(keep: &[bool]) -> Result<Self> {
        let keep: [bool; NUM_DICE] = keep.try_into().map_err(|_| {
            Error::InvalidInput(format!("expected {} keep flags, got {}", NUM_DICE, keep.len()))
        })?;
        Ok(Self(keep))
    }
}

impl FromStr for KeepMask {
    type Err = Error;

    /// Parses a string of 0/1 digits such as "10110".
    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .trim()
            .chars()
            .map(|c| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(Error::InvalidInput(format!("keep flag '{}' is not 0 or 1", other))),
            })
            .collect::<Result<Vec<u8>>>()?;
        KeepMask::from_bits(&bits)
    }
}

/// Draw one face, rejecting anything a misbehaving `Rng` returns outside 1..=6.
fn roll_die(rng: &mut impl Rng) -> Result<u8> {
    let value = rng.roll(FACES);
    u8::try_from(value)
        .ok()
        .filter(|face| (1..=FACES as u8).contains(face))
        .ok_or_else(|| Error::InvalidInput(format!("die value {} is not in 1..=6", value)))
}

/// Roll `n` independent dice.
pub fn roll(n: usize, rng: &mut impl Rng) -> Result<Vec<u8>> {
    (0..n).map(|_| roll_die(rng)).collect()
}

/// Reroll the dice not marked in `keep`.
///
/// Both slices must hold exactly five entries and every die must be a legal
/// face, otherwise `InvalidInput` is returned.
pub fn reroll_keeping(dice: &[u8], keep: &[bool], rng: &mut impl Rng) -> Result<Dice> {
    let dice = Dice::try_from(dice)?;
    let keep = KeepMask::try_from(keep)?;
    dice.reroll_keeping(keep, rng)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A deterministic RNG for testing.
    pub(crate) struct TestRng {
        values: Vec<u32>,
        index: usize,
    }

    impl TestRng {
        pub(crate) fn new(values: Vec<u32>) -> Self {
            Self { values, index: 0 }
        }
    }

    impl Rng for TestRng {
        fn roll(&mut self, _max: u32) -> u32 {
            let value = self.values[self.index % self.values.len()];
            self.index += 1;
            value
        }
    }

    #[test]
    fn test_roll_count_and_range() {
        let mut rng = FastRng::with_seed(7);
        let dice = roll(500, &mut rng).unwrap();
        assert_eq!(dice.len(), 500);
        assert!(dice.iter().all(|&d| (1..=6).contains(&d)));
    }

    #[test]
    fn test_roll_seeded() {
        let a = Dice::roll(&mut FastRng::with_seed(42)).unwrap();
        let b = Dice::roll(&mut FastRng::with_seed(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_roll_uses_rng_values() {
        let mut rng = TestRng::new(vec![6, 5, 4, 3, 2]);
        assert_eq!(Dice::roll(&mut rng).unwrap().values(), [6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_roll_rejects_out_of_range_rng() {
        for bad in [0, 7, 263] {
            let err = Dice::roll(&mut TestRng::new(vec![bad])).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{} accepted", bad);
            assert!(roll(3, &mut TestRng::new(vec![bad])).is_err());
        }
    }

    #[test]
    fn test_reroll_rejects_out_of_range_rng() {
        let dice = Dice::new([1, 2, 3, 4, 5]).unwrap();
        let keep = KeepMask::new([true, true, true, true, false]);
        let err = dice.reroll_keeping(keep, &mut TestRng::new(vec![7])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(reroll_keeping(&[1, 2, 3, 4, 5], &[false; 5], &mut TestRng::new(vec![0])).is_err());
    }

    #[test]
    fn test_reroll_keeps_masked_dice() {
        let mut rng = TestRng::new(vec![6]);
        let dice = reroll_keeping(&[1, 2, 3, 4, 5], &[true, false, true, false, false], &mut rng).unwrap();
        assert_eq!(dice.values(), [1, 6, 3, 6, 6]);
    }

    #[test]
    fn test_reroll_keep_all_draws_nothing() {
        let mut rng = TestRng::new(vec![6]);
        let dice = Dice::new([1, 2, 3, 4, 5]).unwrap();
        let kept = dice.reroll_keeping(KeepMask::new([true; 5]), &mut rng).unwrap();
        assert_eq!(kept, dice);
        assert_eq!(rng.index, 0);
    }

    #[test]
    fn test_reroll_rejects_bad_lengths() {
        let mut rng = TestRng::new(vec![1]);
        let err = reroll_keeping(&[1, 2, 3, 4], &[true; 5], &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        let err = reroll_keeping(&[1, 2, 3, 4, 5], &[true; 6], &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_dice_rejects_bad_faces() {
        assert!(Dice::new([0, 1, 2, 3, 4]).is_err());
        assert!(Dice::new([1, 2, 3, 4, 7]).is_err());
    }

    #[test]
    fn test_counts_and_sum() {
        let dice = Dice::new([2, 2, 5, 6, 2]).unwrap();
        assert_eq!(dice.counts(), [0, 0, 3, 0, 0, 1, 1]);
        assert_eq!(dice.sum(), 17);
    }

    #[test]
    fn test_keep_mask_parse() {
        let mask: KeepMask = "10110".parse().unwrap();
        assert_eq!(mask.flags(), [true, false, true, true, false]);
        assert!("1011".parse::<KeepMask>().is_err());
        assert!("10112".parse::<KeepMask>().is_err());
        assert!(KeepMask::from_bits(&[1, 0, 2, 0, 0]).is_err());
    }

    #[test]
    fn test_dice_serde_validates() {
        let dice: Dice = serde_json::from_str("[3, 3, 3, 1, 2]").unwrap();
        assert_eq!(dice.values(), [3, 3, 3, 1, 2]);
        assert!(serde_json::from_str::<Dice>("[3, 3, 3]").is_err());
        assert!(serde_json::from_str::<Dice>("[9, 3, 3, 1, 2]").is_err());
    }

    #[test]
    fn test_dice_display() {
        let dice = Dice::new([1, 1, 1, 4, 5]).unwrap();
        assert_eq!(dice.to_string(), "[1, 1, 1, 4, 5]");
    }
}
