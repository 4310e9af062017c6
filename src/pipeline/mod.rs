pub mod analysis;
pub mod extract;
pub mod intake;
pub mod orchestrator;
pub mod packager;

pub use extract::{extract_report, ExtractionError};
pub use intake::{store_images, IntakeError};
pub use orchestrator::{CaseStage, DiagnosticPipeline, PipelineError};
pub use packager::package_case;
