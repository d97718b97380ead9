mod components;
mod view;

pub use components::{DefinitionModal, SelectionPanel, StudentList, Wheel};
#[cfg(test)]
pub(crate) use components::WheelProps;
pub use view::DrawView;
