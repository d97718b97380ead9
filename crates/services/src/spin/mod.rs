mod controller;
mod snapshot;

pub use controller::SpinController;
pub use snapshot::SpinSnapshot;
