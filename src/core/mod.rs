pub mod chat;
pub mod client;
pub mod display;
pub mod input;
pub mod predictor;

pub use crate::domain::model::{PredictionResult, RequestOutcome, ValidatedRequest};
pub use crate::domain::ports::{ChatBackend, ConfigProvider, PredictionBackend, Presenter};
pub use crate::utils::error::Result;
