//! Dashboard components.

mod connection_indicator;
mod professor_queue;
mod serving_controls;
mod status_picker;

pub use connection_indicator::ConnectionIndicator;
pub use professor_queue::ProfessorQueue;
pub use serving_controls::ServingControls;
pub use status_picker::StatusPicker;
