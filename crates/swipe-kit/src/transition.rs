/// Easing function type: takes progress (0.0 to 1.0) and returns eased value (0.0 to 1.0)
pub type EasingFn = fn(f32) -> f32;

/// Linear interpolation (no easing)
pub fn linear(t: f32) -> f32 {
    t
}

/// Swing - the cosine curve used by jQuery-style property animation
pub fn swing(t: f32) -> f32 {
    0.5 - (t * std::f32::consts::PI).cos() / 2.0
}

/// Linearly interpolate between two f32 values
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Transition configuration
///
/// Defines how long a transition takes and what easing function to use.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// Duration in milliseconds
    pub duration_ms: u32,

    /// Easing function to apply
    pub easing: EasingFn,
}

impl Transition {
    /// Create a new transition with custom duration and easing
    pub fn new(duration_ms: u32, easing: EasingFn) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Instant transition (no animation, duration = 0)
    pub fn instant() -> Self {
        Self {
            duration_ms: 0,
            easing: linear,
        }
    }

    /// Property animation with swing easing
    pub fn swing(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: swing,
        }
    }

    /// Whether this transition jumps straight to its target
    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }
}

/// A single animated scalar
///
/// Retargeting an in-flight tween starts the new animation from the value it
/// currently shows, so a newer command always supersedes an older one.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed_ms: f32,
    transition: Transition,
}

impl Tween {
    /// A tween resting at `value`
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            elapsed_ms: 0.0,
            transition: Transition::instant(),
        }
    }

    /// Value shown at the current point of the animation
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = (self.elapsed_ms / self.transition.duration_ms as f32).clamp(0.0, 1.0);
        lerp_f32(self.from, self.to, (self.transition.easing)(t))
    }

    pub fn is_finished(&self) -> bool {
        self.transition.is_instant() || self.elapsed_ms >= self.transition.duration_ms as f32
    }

    /// Start animating towards `to` from the currently shown value
    pub fn retarget(&mut self, to: f32, transition: Transition) {
        self.from = self.value();
        self.to = to;
        self.elapsed_ms = 0.0;
        self.transition = transition;
    }

    /// Step the animation forward; returns true while still running
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed_ms += dt_ms;
        !self.is_finished()
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::settled(0.0)
    }
}
