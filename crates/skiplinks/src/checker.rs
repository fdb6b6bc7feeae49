//! Skip links presence check.
//!
//! Pages either define their own skip links or are listed in
//! `whitelisted_routes`; anything else is reported as
//! [`Error::SkipLinksNotDefined`].

use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::route::RouteId;

/// Decides whether a rendered page satisfies the skip links requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipLinksChecker {
    route: RouteId,
    has_skip_links: bool,
}

impl SkipLinksChecker {
    /// Create a checker for a route.
    #[must_use]
    pub fn new(route: RouteId, has_skip_links: bool) -> Self {
        Self {
            route,
            has_skip_links,
        }
    }

    /// Create a checker for a page that defines no custom skip links.
    #[must_use]
    pub fn for_route(route: RouteId) -> Self {
        Self::new(route, false)
    }

    /// The route being checked.
    #[must_use]
    pub fn route(&self) -> &RouteId {
        &self.route
    }

    /// Whether the page defines custom skip links.
    #[must_use]
    pub fn has_skip_links(&self) -> bool {
        self.has_skip_links
    }

    /// Check whether the route is exempt.
    #[must_use]
    pub fn is_whitelisted(&self, config: &Config) -> bool {
        config.is_whitelisted(&self.route)
    }

    /// Run the check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SkipLinksNotDefined`] when the page has no custom skip
    /// links and its route is not whitelisted.
    pub fn perform(&self, config: &Config) -> Result<()> {
        if self.has_skip_links {
            debug!(route = %self.route, "Page defines its own skip links");
            return Ok(());
        }
        if self.is_whitelisted(config) {
            debug!(route = %self.route, "Route is whitelisted");
            return Ok(());
        }
        Err(Error::skip_links_not_defined(self.route.clone()))
    }
}

/// Check a route against the whitelist.
///
/// Shorthand for [`SkipLinksChecker::perform`].
///
/// # Errors
///
/// Returns [`Error::SkipLinksNotDefined`] when `has_custom_links` is false and
/// `route` is not whitelisted.
pub fn check(config: &Config, route: &RouteId, has_custom_links: bool) -> Result<()> {
    SkipLinksChecker::new(route.clone(), has_custom_links).perform(config)
}
