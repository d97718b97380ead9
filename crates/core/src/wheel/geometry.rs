/// Degrees in one full turn.
pub const FULL_TURN: f64 = 360.0;

/// Side length of the square SVG viewBox the disc is drawn in.
pub const VIEWBOX_SIZE: f64 = 400.0;
/// Center of the disc inside the viewBox (both axes).
pub const DISC_CENTER: f64 = 200.0;
pub const WEDGE_RADIUS: f64 = 180.0;
pub const LABEL_RADIUS: f64 = 120.0;
pub const RIM_RADIUS: f64 = 198.0;
pub const HUB_RADIUS: f64 = 16.0;

/// Extra rotation applied to labels so text reads along the radius.
pub const TEXT_CORRECTION_DEG: f64 = 90.0;

/// Ease-out curve: fast start, slow settle.
pub const EASING: &str = "cubic-bezier(0.2, 0.9, 0.1, 1)";

/// Number of wedges drawn for `len` labels. An empty wheel still draws one.
#[must_use]
pub fn wedge_count(len: usize) -> usize {
    len.max(1)
}

/// Angular width of every wedge.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn slice_angle(len: usize) -> f64 {
    FULL_TURN / wedge_count(len) as f64
}

/// Angular center of wedge `index`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn slice_center(index: usize, len: usize) -> f64 {
    let angle = slice_angle(len);
    index as f64 * angle + angle / 2.0
}

/// Half-open angular span `[start, end)` of one wedge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeSpan {
    pub start: f64,
    pub end: f64,
}

impl WedgeSpan {
    #[must_use]
    pub fn contains(&self, deg: f64) -> bool {
        deg >= self.start && deg < self.end
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn wedge_span(index: usize, len: usize) -> WedgeSpan {
    let angle = slice_angle(len);
    WedgeSpan {
        start: index as f64 * angle,
        end: (index + 1) as f64 * angle,
    }
}

/// Rotation that brings the center of wedge `index` under the top marker.
///
/// The disc keeps its accumulated rotation between spins: the new target is
/// laid on top of the whole turns already completed, plus `base_turns` extra
/// turns, so it always lands past `current`. From a wheel at rest (rotation
/// 0) this is exactly `base_turns * 360 + (360 - slice_center)`. Spinning
/// again from `Finished` adds those turns on top of the current rotation.
#[must_use]
pub fn target_rotation(current: f64, index: usize, len: usize, base_turns: u32) -> f64 {
    let completed = (current / FULL_TURN).floor() * FULL_TURN;
    completed + f64::from(base_turns) * FULL_TURN + (FULL_TURN - slice_center(index, len))
}

fn polar(center: f64, radius: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (center + radius * rad.cos(), center + radius * rad.sin())
}

/// SVG path for wedge `index`: a circular sector around (`center`, `center`).
///
/// SVG angles start at 3 o'clock, so every angle is shifted by -90° to make
/// wedge 0 start under the top marker.
#[must_use]
pub fn wedge_path(index: usize, len: usize, center: f64, radius: f64) -> String {
    let angle = slice_angle(len);
    let span = wedge_span(index, len);
    let (x1, y1) = polar(center, radius, span.start - 90.0);
    let (x2, y2) = polar(center, radius, span.end - 90.0);
    let large_arc = u8::from(angle > 180.0);
    format!("M {center} {center} L {x1} {y1} A {radius} {radius} 0 {large_arc} 1 {x2} {y2} Z")
}

/// Where and how a wedge label is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    /// Rotation of the label group, equal to the wedge's center angle.
    pub rotate: f64,
    /// Rotation of the text inside the group.
    pub text_rotate: f64,
}

impl LabelPlacement {
    /// SVG `transform` for the label group.
    #[must_use]
    pub fn group_transform(&self) -> String {
        format!("translate({},{}) rotate({})", self.x, self.y, self.rotate)
    }

    #[must_use]
    pub fn text_transform(&self) -> String {
        format!("rotate({})", self.text_rotate)
    }
}

#[must_use]
pub fn label_placement(index: usize, len: usize, center: f64, radius: f64) -> LabelPlacement {
    let mid = slice_center(index, len);
    let (x, y) = polar(center, radius, mid - 90.0);
    LabelPlacement {
        x,
        y,
        rotate: mid,
        text_rotate: TEXT_CORRECTION_DEG,
    }
}
