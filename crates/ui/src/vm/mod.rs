mod roster_vm;
mod wheel_vm;

pub use roster_vm::{SelectionVm, StudentRowVm, map_selection, map_student_rows, presence_label};
pub use wheel_vm::{WedgeVm, WheelCue, WheelLabelVm, WheelVm, map_wheel, wheel_cue};
