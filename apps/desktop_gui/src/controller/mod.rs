//! Controller layer: UI events, the submission workflow reducer, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
