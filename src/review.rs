//! One analysis round trip: request, envelope check, view-model.

use tracing::{error, info};

use crate::api::AnalysisService;
use crate::error::ClientError;
use crate::report::ReportView;
use crate::state::Submission;

/// Send `submission` to the service and build the report to display.
pub async fn run_analysis<S: AnalysisService>(
    service: &S,
    submission: &Submission,
) -> Result<ReportView, ClientError> {
    let response = service.analyze(&submission.request()).await.map_err(|e| {
        error!("Analysis request failed: {}", e);
        e
    })?;

    let success = response.into_success().map_err(|e| {
        error!("Analysis rejected by service: {}", e);
        e
    })?;

    info!(
        "Analysis complete: score={:?}, tokens={}",
        success.data.quality_score, success.tokens
    );

    Ok(ReportView::build(success, submission))
}
