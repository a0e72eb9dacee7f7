//! Wire types and form validation for the proxy management API.
//!
//! Everything the backend exchanges is camelCase JSON; the backend is the
//! source of truth and the final validator, the forms here only enforce
//! shape (required fields, selected enumerations) before a request leaves
//! the console.

pub mod datetime;
pub mod pagination;
pub mod proxy;
pub mod route;

pub use pagination::{PageableResponse, DEFAULT_PAGE_SIZE};
pub use proxy::{Proxy, ProxyForm};
pub use route::{
    HeaderRuleType, HttpMethod, Route, RouteCookie, RouteForm, RouteHeader, RouteListResponse,
    RouteRequest, StatusRequest,
};

use crate::errors::Error;
use validator::ValidationErrors;

/// Convert `validator` output into the console's field-scoped validation
/// error, keeping the first failing field.
pub fn first_validation_error(errors: &ValidationErrors) -> Error {
    for (field, failures) in errors.field_errors() {
        if let Some(failure) = failures.first() {
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            return Error::validation_field(message, field.to_string());
        }
    }
    Error::validation("form is invalid")
}
