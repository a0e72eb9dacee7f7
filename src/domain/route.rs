//! Route wire types, the route edit form, and its enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::datetime;
use crate::errors::{Error, Result};

/// HTTP methods a route can match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl HttpMethod {
    /// Every selectable method, in display order
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so table column widths apply
        f.pad(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            "TRACE" => Ok(HttpMethod::Trace),
            other => Err(Error::validation_field(
                format!("unknown HTTP method '{other}'"),
                "method",
            )),
        }
    }
}

/// Header-injection semantics: unconditional, or only when the header is
/// not already present. Enforced by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderRuleType {
    AddRequestHeader,
    AddRequestHeaderIfNotPresent,
}

/// A single header-injection rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteHeader {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub rule: HeaderRuleType,
}

/// Cookie-presence/value match rule. The regex syntax is validated only
/// by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCookie {
    pub name: String,
    pub regexp: String,
}

/// A route as returned by the backend. Belongs to exactly one proxy,
/// referenced by proxy name in the URL path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub route_id: String,
    pub enabled: bool,
    pub path: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: Vec<RouteHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<RouteCookie>>,
}

/// Envelope of the route list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteListResponse {
    pub routes: Vec<Route>,
}

/// Create/update body for a route. Headers are always present (`[]` when
/// empty); the optional fields are omitted from the JSON entirely when
/// absent, never sent as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub route_id: String,
    pub path: String,
    pub method: HttpMethod,
    pub headers: Vec<RouteHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<RouteCookie>>,
}

/// Body of the status toggle endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub enabled: bool,
}

/// The route edit form. Owns the header and cookie sublists outright so
/// there is exactly one copy of that state to mutate. Timestamps are held
/// as local wall-clock strings and converted on the way to the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RouteForm {
    #[validate(length(min = 1, message = "routeId must not be empty"))]
    pub route_id: String,

    #[validate(length(min = 1, message = "path must not be empty"))]
    pub path: String,

    #[validate(required(message = "method must be selected"))]
    pub method: Option<HttpMethod>,

    #[serde(default)]
    pub headers: Vec<RouteHeader>,

    #[serde(default)]
    pub cookies: Vec<RouteCookie>,

    /// Activation time as local `YYYY-MM-DDTHH:MM`
    pub activation_time: Option<String>,

    /// Expiration time as local `YYYY-MM-DDTHH:MM`
    pub expiration_time: Option<String>,
}

impl RouteForm {
    /// Populate an edit form from an existing route, converting its
    /// timestamps back to local wall-clock strings.
    pub fn from_route(route: &Route) -> Result<Self> {
        let activation_time =
            route.activation_time.as_deref().map(datetime::offset_to_local).transpose()?;
        let expiration_time =
            route.expiration_time.as_deref().map(datetime::offset_to_local).transpose()?;

        Ok(Self {
            route_id: route.route_id.clone(),
            path: route.path.clone(),
            method: Some(route.method),
            headers: route.headers.clone(),
            cookies: route.cookies.clone().unwrap_or_default(),
            activation_time,
            expiration_time,
        })
    }

    pub fn add_header(&mut self, header: RouteHeader) {
        self.headers.push(header);
    }

    pub fn remove_header(&mut self, index: usize) -> Option<RouteHeader> {
        if index < self.headers.len() {
            Some(self.headers.remove(index))
        } else {
            None
        }
    }

    pub fn add_cookie(&mut self, cookie: RouteCookie) {
        self.cookies.push(cookie);
    }

    pub fn remove_cookie(&mut self, index: usize) -> Option<RouteCookie> {
        if index < self.cookies.len() {
            Some(self.cookies.remove(index))
        } else {
            None
        }
    }

    /// Validate the form and build the wire body, converting local
    /// timestamps to their explicit-offset form.
    pub fn to_request(&self) -> Result<RouteRequest> {
        self.validate().map_err(|e| super::first_validation_error(&e))?;

        let method = self
            .method
            .ok_or_else(|| Error::validation_field("method must be selected", "method"))?;

        let activation_time = match self.activation_time.as_deref() {
            Some(s) if !s.is_empty() => Some(datetime::local_to_offset(s)?),
            _ => None,
        };
        let expiration_time = match self.expiration_time.as_deref() {
            Some(s) if !s.is_empty() => Some(datetime::local_to_offset(s)?),
            _ => None,
        };

        Ok(RouteRequest {
            route_id: self.route_id.clone(),
            path: self.path.clone(),
            method,
            headers: self.headers.clone(),
            activation_time,
            expiration_time,
            cookies: if self.cookies.is_empty() { None } else { Some(self.cookies.clone()) },
        })
    }
}
