use crate::app::{AtomError, AtomResult, DurationRange};
use crate::constants::REVERSE_THRESHOLD;
use log::debug;
use rand::{Rng, RngCore};
use serde::Serialize;

/// Source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

/// Adapts a plain closure, e.g. `FromFn(|| 0.5)`, into a [`RandomSource`].
pub struct FromFn<F>(pub F);

impl<F: FnMut() -> f64> RandomSource for FromFn<F> {
    fn next_unit(&mut self) -> f64 {
        (self.0)()
    }
}

/// Timing of every electron on one orbit. Orbits loop forever.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnimationPlan {
    pub duration_secs: u32,
    pub reversed: bool,
    /// Start offset between neighbouring electrons; spreads them evenly in phase.
    pub stagger_secs: f32,
    pub repeat_delay_secs: f32,
    /// Initial seek. One full period, so the first frame is the end of a cycle.
    pub seek_secs: f32,
    /// Frozen on the seeked frame instead of playing.
    pub paused: bool,
}

impl AnimationPlan {
    pub fn duration(&self) -> f32 {
        self.duration_secs as f32
    }
}

pub struct AnimationPlanner {
    range: DurationRange,
}

impl AnimationPlanner {
    pub fn new(range: DurationRange) -> AtomResult<Self> {
        range.validate()?;
        Ok(Self { range })
    }

    pub fn plan<R: RandomSource + ?Sized>(
        &self,
        electron_count: u32,
        animated: bool,
        random: &mut R,
    ) -> AtomResult<AnimationPlan> {
        if electron_count == 0 {
            return Err(AtomError::InvalidConfiguration(
                "cannot schedule an orbit without electrons".to_owned(),
            ));
        }

        let reversed = random.next_unit() > REVERSE_THRESHOLD;
        let duration_secs = self.random_duration(random);
        let duration = duration_secs as f32;

        let plan = AnimationPlan {
            duration_secs,
            reversed,
            stagger_secs: duration / electron_count as f32,
            repeat_delay_secs: 0.0,
            seek_secs: duration,
            paused: !animated,
        };
        debug!(
            "planned {} electron(s): {}s period, stagger {:.3}s, reversed={}",
            electron_count, plan.duration_secs, plan.stagger_secs, plan.reversed
        );
        Ok(plan)
    }

    fn random_duration<R: RandomSource + ?Sized>(&self, random: &mut R) -> u32 {
        let DurationRange { minimum, maximum } = self.range;
        let span = f64::from(maximum - minimum) + 1.0;
        let offset = (random.next_unit().clamp(0.0, 1.0) * span).floor() as u32;
        // A source returning exactly 1.0 would otherwise overshoot by one.
        minimum.saturating_add(offset).min(maximum)
    }
}
