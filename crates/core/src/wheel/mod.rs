//! Wheel geometry and motion.
//!
//! Angles are in degrees, measured clockwise from the top marker (12 o'clock).
//! Everything in [`geometry`] is a pure function of its inputs; [`WheelMotion`]
//! holds the one piece of animation state a rendered wheel owns.

mod geometry;
mod motion;
mod palette;

pub use geometry::{
    DISC_CENTER, EASING, FULL_TURN, HUB_RADIUS, LABEL_RADIUS, LabelPlacement, RIM_RADIUS,
    TEXT_CORRECTION_DEG, VIEWBOX_SIZE, WEDGE_RADIUS, WedgeSpan, label_placement, slice_angle,
    slice_center, target_rotation, wedge_count, wedge_path, wedge_span,
};
pub use motion::{Transition, WheelMotion};
pub use palette::{ColorScheme, DISABLED_FILL, wedge_fill};
