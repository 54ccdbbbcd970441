//! One-shot alert registration.
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::TransitApi;
use crate::domain::{AlertRequest, Coordinate, LineId};
use crate::error::{AlertError, AlertField};

pub const ALERT_CREATED_MESSAGE: &str = "Alert created successfully!";

/// Confirmation shown after the service stored the alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertReceipt {
    pub message: String,
}

/// Builds the request if email, line and start point are all present.
///
/// # Errors
///
/// Returns [`AlertError::Incomplete`] naming the first missing input.
pub fn prepare_alert(
    email: &str,
    line: &str,
    start_point: Option<Coordinate>,
) -> Result<AlertRequest, AlertError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AlertError::Incomplete {
            missing: AlertField::Email,
        });
    }
    let line = LineId::parse(line).ok_or(AlertError::Incomplete {
        missing: AlertField::Line,
    })?;
    let start_point = start_point.ok_or(AlertError::Incomplete {
        missing: AlertField::StartPoint,
    })?;
    Ok(AlertRequest::new(email.to_owned(), line, start_point))
}

/// Posts alert registrations to the API.
///
/// Submissions are never retried or de-duplicated.
#[derive(Debug)]
pub struct AlertSubmitter<A> {
    api: Arc<A>,
}

impl<A> Clone for AlertSubmitter<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A> AlertSubmitter<A>
where
    A: TransitApi,
{
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Posts an already validated request.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Network`] when the request fails and
    /// [`AlertError::Rejected`] when the service does not confirm it.
    pub async fn send(&self, request: AlertRequest) -> Result<AlertReceipt, AlertError> {
        let reply = self.api.create_alert(&request).await.map_err(|err| {
            warn!("Alert request failed: {}", err);
            AlertError::from(err)
        })?;
        if !reply.is_success() {
            warn!("Alert service answered with status '{}'", reply.status);
            return Err(AlertError::Rejected {
                status: reply.status,
            });
        }
        info!(line = %request.line, "Alert registered");
        Ok(AlertReceipt {
            message: reply
                .message
                .unwrap_or_else(|| ALERT_CREATED_MESSAGE.to_owned()),
        })
    }

    /// Validates and submits in one step; no request is made when validation fails.
    ///
    /// # Errors
    ///
    /// See [`prepare_alert`] and [`AlertSubmitter::send`].
    pub async fn submit(
        &self,
        email: &str,
        line: &str,
        start_point: Option<Coordinate>,
    ) -> Result<AlertReceipt, AlertError> {
        let request = prepare_alert(email, line, start_point)?;
        self.send(request).await
    }
}
