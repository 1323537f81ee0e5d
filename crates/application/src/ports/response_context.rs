//! Read-only view of the response under validation.

use scribecheck_domain::EndpointResponse;

/// Port exposing the response a validation pass inspects.
///
/// Implemented by [`EndpointResponse`]; other hosts (a recorded HAR entry, a
/// proxy capture) can implement it directly.
pub trait ResponseContext {
    /// HTTP status code.
    fn status_code(&self) -> u16;

    /// Elapsed time in milliseconds.
    fn elapsed_millis(&self) -> u64;

    /// Raw body text, if a body was received.
    fn body_text(&self) -> Option<&str>;
}

impl ResponseContext for EndpointResponse {
    fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    fn elapsed_millis(&self) -> u64 {
        Self::elapsed_millis(self)
    }

    fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
