//! Dice - Source of every random roll in an encounter

use rand::{Rng, RngCore};
use std::collections::VecDeque;

/// Random rolls an encounter needs
///
/// Implemented for every `rand` generator, so `thread_rng()` or a seeded
/// `ChaCha8Rng` can be passed straight in. [`ScriptedDice`] replays fixed
/// values for deterministic tests.
pub trait Dice {
    /// Uniform roll in [0, 1)
    fn chance(&mut self) -> f64;
    /// Damage variance in [-1, 1]
    fn offset(&mut self) -> i32;
}

impl<R: RngCore + ?Sized> Dice for R {
    fn chance(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn offset(&mut self) -> i32 {
        self.gen_range(-1..=1)
    }
}

/// Replays queued rolls, then falls back to fixed values
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    chances: VecDeque<f64>,
    offsets: VecDeque<i32>,
    fallback_chance: f64,
    fallback_offset: i32,
}

impl Default for ScriptedDice {
    fn default() -> Self {
        ScriptedDice {
            chances: VecDeque::new(),
            offsets: VecDeque::new(),
            fallback_chance: 0.5,
            fallback_offset: 0,
        }
    }
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every chance roll returns `roll`, every offset 0
    pub fn always(roll: f64) -> Self {
        ScriptedDice {
            fallback_chance: roll,
            ..Default::default()
        }
    }

    /// Queue chance rolls, consumed in order
    pub fn with_chances(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.chances.extend(rolls);
        self
    }

    /// Queue damage offsets, consumed in order
    pub fn with_offsets(mut self, offsets: impl IntoIterator<Item = i32>) -> Self {
        self.offsets.extend(offsets);
        self
    }

    pub fn with_fallback_offset(mut self, offset: i32) -> Self {
        self.fallback_offset = offset.clamp(-1, 1);
        self
    }

    /// Rolls still queued
    pub fn remaining(&self) -> usize {
        self.chances.len() + self.offsets.len()
    }
}

impl Dice for ScriptedDice {
    fn chance(&mut self) -> f64 {
        self.chances.pop_front().unwrap_or(self.fallback_chance)
    }

    fn offset(&mut self) -> i32 {
        self.offsets.pop_front().unwrap_or(self.fallback_offset)
    }
}
