pub mod applicant;
pub mod response;
pub mod resume;
pub mod upload;

pub use applicant::Applicant;
pub use response::{
    AccountResponse, CreateAccountRequest, LoginRequest, LoginResponse, SubmissionResponse,
};
pub use resume::{EducationEntry, ResumeAnswers, WorkEntry};
pub use upload::UploadAttempt;
