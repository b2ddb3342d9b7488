pub mod diagram;
pub mod summary;

pub use diagram::{render_image_plan, render_survey_plan, save_mask};
pub use summary::PlanSummary;
