//! Route identifiers.
//!
//! A route is identified by its controller and action names joined with `#`,
//! e.g. `pages#home` or `instruction/authorization_requests#index`. The joined
//! string is the key matched against `whitelisted_routes`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Separator between controller and action names.
pub const ROUTE_SEPARATOR: char = '#';

/// A `<controller>#<action>` route identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    /// Build a route identifier from a controller and an action name.
    ///
    /// Names are taken verbatim; no case folding or trimming is applied.
    #[must_use]
    pub fn new(controller: &str, action: &str) -> Self {
        Self(format!("{controller}{ROUTE_SEPARATOR}{action}"))
    }

    /// The joined `<controller>#<action>` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The controller part.
    #[must_use]
    pub fn controller(&self) -> &str {
        self.split().0
    }

    /// The action part.
    #[must_use]
    pub fn action(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Actions never contain the separator, so split on the last one.
        self.0
            .rsplit_once(ROUTE_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }

    /// Check whether a whitelist entry is well formed.
    #[must_use]
    pub fn is_well_formed(s: &str) -> bool {
        matches!(
            s.rsplit_once(ROUTE_SEPARATOR),
            Some((controller, action)) if !controller.is_empty() && !action.is_empty()
        )
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RouteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RouteId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RouteId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromStr for RouteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once(ROUTE_SEPARATOR) {
            None => Err(Error::invalid_route(s, "missing '#' separator")),
            Some(("", _)) => Err(Error::invalid_route(s, "empty controller name")),
            Some((_, "")) => Err(Error::invalid_route(s, "empty action name")),
            Some((controller, action)) => Ok(Self::new(controller, action)),
        }
    }
}
