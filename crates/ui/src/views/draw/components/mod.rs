mod modal;
mod selection;
mod students;
mod wheel;

pub use modal::DefinitionModal;
pub use selection::SelectionPanel;
pub use students::StudentList;
pub use wheel::Wheel;
#[cfg(test)]
pub(crate) use wheel::WheelProps;
