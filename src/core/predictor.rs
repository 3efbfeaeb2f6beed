use crate::core::display::format_result_for_display;
use crate::core::input::parse_input;
use crate::domain::model::{PredictionResult, RequestOutcome, SubmissionState, ValidatedRequest};
use crate::domain::ports::{PredictionBackend, Presenter};
use crate::utils::error::Result;

/// Drives one prediction form: parse, submit, render.
///
/// A submission moves `Idle -> Submitting -> {Displaying, Failed}` and the next
/// submission starts over. Nothing is retried automatically and nothing guards
/// against a second submission while one is pending.
pub struct Predictor<B: PredictionBackend> {
    backend: B,
    state: SubmissionState,
}

impl<B: PredictionBackend> Predictor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Typed variant of [`Predictor::submit_prediction`] for callers that need the error kind.
    pub async fn try_submit_prediction(&self, request: &ValidatedRequest) -> Result<PredictionResult> {
        self.backend.predict(request).await
    }

    pub async fn submit_prediction(&self, request: &ValidatedRequest) -> RequestOutcome {
        match self.try_submit_prediction(request).await {
            Ok(result) => {
                tracing::info!("Prediction received: next start {}", result.predicted_date);
                RequestOutcome::Success(result)
            }
            Err(e) => {
                tracing::error!("Prediction error: {} (category: {:?})", e, e.category());
                RequestOutcome::Failure(e.user_friendly_message())
            }
        }
    }

    /// Full form submission against a render adapter.
    ///
    /// Validation errors are shown without touching the network. Once the
    /// request is sent, `hide_loading` runs whether it succeeds or fails.
    pub async fn handle_submission<P: Presenter>(
        &mut self,
        raw_dates: &str,
        raw_lookback: &str,
        presenter: &mut P,
    ) -> RequestOutcome {
        self.state = SubmissionState::Idle;

        let request = match parse_input(raw_dates, raw_lookback) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Submission rejected before sending: {}", e);
                let message = e.user_friendly_message();
                presenter.show_error(&message);
                self.state = SubmissionState::Failed;
                return RequestOutcome::Failure(message);
            }
        };

        self.state = SubmissionState::Submitting;
        presenter.show_loading();

        let outcome = self.submit_prediction(&request).await;
        let outcome = match outcome {
            RequestOutcome::Success(result) => match format_result_for_display(&result) {
                Ok(display) => {
                    presenter.show_result(&display);
                    self.state = SubmissionState::Displaying;
                    RequestOutcome::Success(result)
                }
                Err(e) => {
                    tracing::error!("Could not render prediction: {}", e);
                    let message = e.user_friendly_message();
                    presenter.show_error(&message);
                    self.state = SubmissionState::Failed;
                    RequestOutcome::Failure(message)
                }
            },
            RequestOutcome::Failure(message) => {
                presenter.show_error(&message);
                self.state = SubmissionState::Failed;
                RequestOutcome::Failure(message)
            }
        };

        presenter.hide_loading();
        outcome
    }
}
