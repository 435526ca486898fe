//! Request extractors.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::Response,
};
use puc_core::check::CheckForm;
use tracing::warn;

use crate::response::validation_response;

const UNREADABLE_SUBMISSION: &str = "The submitted form could not be read.";

/// A check submission, from either a JSON body or an urlencoded form post.
///
/// A body that cannot be read at all is answered with the same validation
/// envelope as a form that fails its rules.
#[derive(Debug)]
pub struct CheckSubmission(pub CheckForm);

impl<S> FromRequest<S> for CheckSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let parsed = if is_urlencoded(&req) {
            Form::<CheckForm>::from_request(req, state)
                .await
                .map(|Form(form)| form)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<CheckForm>::from_request(req, state)
                .await
                .map(|Json(form)| form)
                .map_err(|rejection| rejection.body_text())
        };

        parsed.map(Self).map_err(|detail| {
            warn!(detail = %detail, "Unreadable check submission");
            validation_response(&[UNREADABLE_SUBMISSION.to_string()], &CheckForm::default())
        })
    }
}

fn is_urlencoded(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}
