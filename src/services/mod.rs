pub mod coordinator;
pub mod extractor;
pub mod validator;

pub use coordinator::SubmissionCoordinator;
pub use extractor::{PdfResumeExtractor, ResumeExtractor};
pub use validator::{validate, IntakePolicy};
