use crate::simulation::planner::AnimationPlan;

/// Moves every target along the path `path_id`, one after another, looping forever.
#[derive(Clone, Debug)]
pub struct MotionTween<T> {
    pub targets: Vec<T>,
    pub path_id: String,
    pub duration: f32,
    pub stagger_each: f32,
    /// Path fractions at the start and end of a cycle; `1 -> 0` runs backwards.
    pub start: f32,
    pub end: f32,
}

impl<T> MotionTween<T> {
    /// Time target `index` has been moving at timeline time `time`.
    pub fn elapsed_for(&self, index: usize, time: f32) -> f32 {
        time - self.stagger_each * index as f32
    }

    /// Cycle progress of target `index` in `[0, 1]`.
    ///
    /// A target sitting exactly on a cycle boundary reports `1.0`, i.e. the end
    /// frame of the cycle it just finished.
    pub fn progress_of(&self, index: usize, time: f32) -> f32 {
        let elapsed = self.elapsed_for(index, time);
        if elapsed <= 0.0 || self.duration <= 0.0 {
            return 0.0;
        }

        let fraction = (elapsed / self.duration).fract();
        if fraction == 0.0 { 1.0 } else { fraction }
    }

    /// Position of target `index` along the path, as a fraction of its length.
    pub fn path_fraction(&self, index: usize, time: f32) -> f32 {
        self.start + (self.end - self.start) * self.progress_of(index, time)
    }
}

/// Seekable, pausable sequence of motion tweens.
#[derive(Clone, Debug)]
pub struct Timeline<T> {
    repeat_delay: f32,
    tweens: Vec<MotionTween<T>>,
    position: f32,
    paused: bool,
}

impl<T> Timeline<T> {
    pub fn new(repeat_delay: f32) -> Self {
        Self {
            repeat_delay,
            tweens: Vec::new(),
            position: 0.0,
            paused: false,
        }
    }

    /// Builds the orbit timeline described by `plan`: one staggered tween over
    /// `targets`, already seeked, and paused when the plan says so.
    pub fn from_plan(plan: &AnimationPlan, targets: Vec<T>, path_id: impl Into<String>) -> Self {
        let (start, end) = if plan.reversed { (1.0, 0.0) } else { (0.0, 1.0) };
        let mut timeline = Self::new(plan.repeat_delay_secs);
        timeline.to(MotionTween {
            targets,
            path_id: path_id.into(),
            duration: plan.duration(),
            stagger_each: plan.stagger_secs,
            start,
            end,
        });
        timeline.seek(plan.seek_secs);
        if plan.paused {
            timeline.pause();
        }
        timeline
    }

    pub fn to(&mut self, tween: MotionTween<T>) -> &mut Self {
        self.tweens.push(tween);
        self
    }

    pub fn seek(&mut self, time: f32) -> &mut Self {
        self.position = time.max(0.0);
        self
    }

    pub fn pause(&mut self) -> &mut Self {
        self.paused = true;
        self
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn repeat_delay(&self) -> f32 {
        self.repeat_delay
    }

    pub fn tweens(&self) -> &[MotionTween<T>] {
        &self.tweens
    }

    pub fn summary(&self) -> TimelineSummary {
        TimelineSummary {
            paths: self.tweens.iter().map(|t| t.path_id.clone()).collect(),
            targets: self.tweens.iter().map(|t| t.targets.len()).sum(),
            position: self.position,
            paused: self.paused,
        }
    }
}

/// Target-free snapshot of a timeline, handy for logging and assertions.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineSummary {
    pub paths: Vec<String>,
    pub targets: usize,
    pub position: f32,
    pub paused: bool,
}
