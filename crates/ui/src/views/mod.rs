mod draw;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use draw::{DefinitionModal, DrawView, SelectionPanel, StudentList, Wheel};
#[cfg(test)]
pub(crate) use draw::WheelProps;
