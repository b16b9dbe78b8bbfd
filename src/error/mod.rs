pub mod types;

pub use types::{AppError, AppResult, ExtractError, StoreError, ValidationError};
