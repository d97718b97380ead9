use crate::wheel::geometry::{EASING, target_rotation};

/// How the disc moves to its next rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transition {
    /// Snap instantly.
    #[default]
    None,
    Eased { duration_ms: u64 },
}

impl Transition {
    /// CSS `transition` value.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Transition::None => "none".to_string(),
            Transition::Eased { duration_ms } => format!("transform {duration_ms}ms {EASING}"),
        }
    }
}

/// Animation state owned by one rendered wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelMotion {
    rotation: f64,
    transition: Transition,
}

impl WheelMotion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Start an eased spin that lands wedge `index` under the marker.
    ///
    /// Returns the new accumulated rotation.
    pub fn spin_to(&mut self, index: usize, len: usize, duration_ms: u64, base_turns: u32) -> f64 {
        self.rotation = target_rotation(self.rotation, index, len, base_turns);
        self.transition = Transition::Eased { duration_ms };
        self.rotation
    }

    /// Snap back to rest so the next spin starts from a known baseline.
    pub fn reset(&mut self) {
        self.rotation = 0.0;
        self.transition = Transition::None;
    }

    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.rotation == 0.0 && self.transition == Transition::None
    }

    /// CSS `transform` value for the disc.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!("rotate({}deg)", self.rotation)
    }

    #[must_use]
    pub fn transition_css(&self) -> String {
        self.transition.css()
    }

    /// Inline style for the disc element.
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "transform: {}; transition: {};",
            self.transform_css(),
            self.transition_css()
        )
    }
}
