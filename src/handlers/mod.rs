pub mod accounts;
pub mod health;
pub mod submissions;

pub use accounts::{create_account, login};
pub use health::health_handler;
pub use submissions::{show_answers, submit_resume};
