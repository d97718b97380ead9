use std::collections::BTreeSet;

use draw_core::wheel::{
    ColorScheme, DISC_CENTER, LABEL_RADIUS, WEDGE_RADIUS, label_placement, wedge_count,
    wedge_fill, wedge_path,
};

#[derive(Clone, Debug, PartialEq)]
pub struct WedgeVm {
    pub index: usize,
    pub path: String,
    pub fill: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WheelLabelVm {
    pub index: usize,
    pub text: String,
    pub group_transform: String,
    pub text_transform: String,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WheelVm {
    pub scheme_class: &'static str,
    pub wedges: Vec<WedgeVm>,
    pub labels: Vec<WheelLabelVm>,
}

/// Lay out one wheel. An empty wheel still gets a single blank wedge.
#[must_use]
pub fn map_wheel(items: &[String], disabled: &[usize], scheme: ColorScheme) -> WheelVm {
    let len = items.len();
    let disabled: BTreeSet<usize> = disabled.iter().copied().collect();

    let wedges = (0..wedge_count(len))
        .map(|index| WedgeVm {
            index,
            path: wedge_path(index, len, DISC_CENTER, WEDGE_RADIUS),
            fill: wedge_fill(index, scheme, disabled.contains(&index)),
        })
        .collect();

    let labels = items
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let placement = label_placement(index, len, DISC_CENTER, LABEL_RADIUS);
            WheelLabelVm {
                index,
                text: text.clone(),
                group_transform: placement.group_transform(),
                text_transform: placement.text_transform(),
                class: if disabled.contains(&index) {
                    "slice-label disabled"
                } else {
                    "slice-label"
                },
            }
        })
        .collect();

    WheelVm {
        scheme_class: scheme.css_class(),
        wedges,
        labels,
    }
}

/// What a wheel does when the controller state it is shown changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelCue {
    /// Ease towards the drawn wedge, one frame after the state change.
    Spin { index: usize },
    /// Snap back to rest: idle with nothing drawn.
    Reset,
    /// Keep the current rotation, e.g. resting on a finished draw.
    Hold,
}

#[must_use]
pub fn wheel_cue(spinning: bool, selected_index: Option<usize>) -> WheelCue {
    match (spinning, selected_index) {
        (true, Some(index)) => WheelCue::Spin { index },
        (false, None) => WheelCue::Reset,
        _ => WheelCue::Hold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draw_core::wheel::{DISABLED_FILL, WheelMotion};

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn empty_wheel_has_one_blank_wedge() {
        let vm = map_wheel(&[], &[], ColorScheme::Terms);
        assert_eq!(vm.wedges.len(), 1);
        assert!(vm.labels.is_empty());
    }

    #[test]
    fn disabled_students_are_greyed_out() {
        let vm = map_wheel(&labels(&["X", "Y", "Z"]), &[1], ColorScheme::Students);
        assert_eq!(vm.scheme_class, "students");
        assert_eq!(vm.wedges[0].fill, "hsl(330 85% 55%)");
        assert_eq!(vm.wedges[1].fill, DISABLED_FILL);
        assert_eq!(vm.labels[1].class, "slice-label disabled");
        assert_eq!(vm.labels[2].class, "slice-label");
    }

    #[test]
    fn labels_follow_wedge_centers() {
        let vm = map_wheel(&labels(&["A", "B"]), &[], ColorScheme::Terms);
        assert_eq!(vm.labels[0].group_transform, "translate(320,200) rotate(90)");
        assert_eq!(vm.labels[0].text_transform, "rotate(90)");
    }

    #[test]
    fn cue_follows_spin_lifecycle() {
        assert_eq!(wheel_cue(true, Some(2)), WheelCue::Spin { index: 2 });
        assert_eq!(wheel_cue(false, Some(2)), WheelCue::Hold);
        assert_eq!(wheel_cue(false, None), WheelCue::Reset);
        assert_eq!(wheel_cue(true, None), WheelCue::Hold);
    }

    #[test]
    fn spin_cue_then_reset_cue_returns_the_disc_to_rest() {
        let mut motion = WheelMotion::new();
        if let WheelCue::Spin { index } = wheel_cue(true, Some(1)) {
            motion.spin_to(index, 4, 10_000, 8);
        }
        assert_eq!(motion.rotation(), 3105.0);
        assert!(!motion.is_at_rest());

        // Finishing keeps the landing angle.
        assert_eq!(wheel_cue(false, Some(1)), WheelCue::Hold);
        assert_eq!(motion.rotation(), 3105.0);

        if wheel_cue(false, None) == WheelCue::Reset {
            motion.reset();
        }
        assert!(motion.is_at_rest());
        assert_eq!(motion.rotation(), 0.0);
    }
}
