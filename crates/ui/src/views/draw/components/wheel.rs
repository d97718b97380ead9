use std::time::Duration;

use dioxus::prelude::*;
use draw_core::wheel::{ColorScheme, DISC_CENTER, HUB_RADIUS, RIM_RADIUS, VIEWBOX_SIZE, WheelMotion};

use crate::vm::{WheelCue, map_wheel, wheel_cue};

/// Gap between rendering the resting rotation and applying the eased one,
/// so the webview sees two distinct transform values.
const FRAME: Duration = Duration::from_millis(16);

#[component]
pub fn Wheel(
    items: Vec<String>,
    selected_index: Option<usize>,
    spinning: bool,
    spin_id: u64,
    duration_ms: u64,
    base_turns: u32,
    #[props(default)] disabled_indices: Vec<usize>,
    #[props(default)] scheme: ColorScheme,
) -> Element {
    let motion = use_signal(WheelMotion::new);
    let len = items.len();

    use_effect(use_reactive!(
        |(spinning, selected_index, spin_id, len, duration_ms, base_turns)| {
            let mut motion = motion;
            match wheel_cue(spinning, selected_index) {
                WheelCue::Spin { index } => {
                    spawn(async move {
                        tokio::time::sleep(FRAME).await;
                        let rotation = motion.write().spin_to(index, len, duration_ms, base_turns);
                        tracing::trace!(spin_id, index, rotation, "wheel spinning");
                    });
                }
                WheelCue::Reset => motion.write().reset(),
                WheelCue::Hold => {}
            }
        }
    ));

    let vm = map_wheel(&items, &disabled_indices, scheme);
    let disc_style = motion.read().style();
    let view_box = format!("0 0 {VIEWBOX_SIZE} {VIEWBOX_SIZE}");

    rsx! {
        div { class: "wheel {vm.scheme_class}",
            div { class: "wheel-viewport",
                svg { class: "pointer", view_box: "0 0 40 40",
                    polygon { points: "20,0 30,12 10,12" }
                }
                div { class: "disc", style: "{disc_style}",
                    svg { class: "disc-svg", view_box: "{view_box}",
                        for wedge in vm.wedges {
                            path { key: "w-{wedge.index}", d: "{wedge.path}", fill: "{wedge.fill}" }
                        }
                        for label in vm.labels {
                            g { key: "t-{label.index}", transform: "{label.group_transform}",
                                text {
                                    class: "{label.class}",
                                    text_anchor: "middle",
                                    transform: "{label.text_transform}",
                                    "{label.text}"
                                }
                            }
                        }
                        circle {
                            class: "rim",
                            cx: "{DISC_CENTER}",
                            cy: "{DISC_CENTER}",
                            r: "{RIM_RADIUS}",
                            fill: "none",
                            stroke: "rgba(0,0,0,0.1)",
                            stroke_width: "4",
                        }
                        circle {
                            class: "hub",
                            cx: "{DISC_CENTER}",
                            cy: "{DISC_CENTER}",
                            r: "{HUB_RADIUS}",
                            fill: "#fff",
                        }
                    }
                }
            }
        }
    }
}
