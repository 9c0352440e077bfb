//! Service layer: pure geometry logic shared by the controller and hosts.

pub mod layout;
pub mod transition;

pub use layout::compute_layout;
pub use transition::GeometryTransition;
