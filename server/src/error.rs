use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use std::process::{ExitCode, Termination};

use application::error::ApplicationError;
use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<ApplicationError>);

impl From<Report<ApplicationError>> for ErrorStatus {
    fn from(e: Report<ApplicationError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.current_context() {
            ApplicationError::UnknownBook | ApplicationError::UnknownUser => StatusCode::NOT_FOUND,
            ApplicationError::InvalidInput => StatusCode::BAD_REQUEST,
            ApplicationError::UserNameTaken => StatusCode::CONFLICT,
            ApplicationError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApplicationError::Repository => match self.0.downcast_ref::<KernelError>() {
                Some(KernelError::Timeout) => StatusCode::REQUEST_TIMEOUT,
                Some(KernelError::Uniqueness) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{}: {}", status, self.0.current_context());
        }
        status.into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;

    use application::error::ApplicationError;
    use kernel::KernelError;

    use crate::error::ErrorStatus;

    fn status(report: Report<ApplicationError>) -> StatusCode {
        ErrorStatus::from(report).into_response().status()
    }

    #[test]
    fn service_errors_map_to_client_statuses() {
        assert_eq!(
            status(Report::new(ApplicationError::UnknownBook)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(Report::new(ApplicationError::InvalidInput)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(Report::new(ApplicationError::UserNameTaken)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(Report::new(ApplicationError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn repository_errors_look_at_the_kernel_cause() {
        let timeout =
            Report::new(KernelError::Timeout).change_context(ApplicationError::Repository);
        assert_eq!(status(timeout), StatusCode::REQUEST_TIMEOUT);
        let persistence =
            Report::new(KernelError::Persistence).change_context(ApplicationError::Repository);
        assert_eq!(status(persistence), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
