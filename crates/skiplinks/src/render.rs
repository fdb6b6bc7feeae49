//! Skip links rendering.
//!
//! Produces the HTML fragments of the DSFR skip links component. Each link is
//! a list item pointing at an element id on the page:
//!
//! ```
//! use skiplinks::render::skip_link;
//!
//! assert_eq!(
//!     skip_link("Menu", "header"),
//!     r##"<li><a href="#header" class="fr-link">Menu</a></li>"##
//! );
//! ```
//!
//! Anchors starting with `tab-` also carry a `data-anchor` attribute for
//! client-side tab navigation scripts.

use std::fmt;

use tracing::debug;

use crate::checker::SkipLinksChecker;
use crate::config::Config;
use crate::error::Result;
use crate::route::RouteId;
use crate::slots::{SlotLookup, CONTENT_SKIP_LINK_TEXT_SLOT, SKIP_LINKS_SLOT};

/// Anchor prefix that marks tab panel targets.
pub const TAB_PREFIX: &str = "tab-";

/// CSS class applied to every skip link.
pub const LINK_CLASS: &str = "fr-link";

/// Text of the "skip to content" link when no override is given.
pub const DEFAULT_CONTENT_SKIP_LINK_TEXT: &str = "Aller au contenu";

/// Text of the link to the page header.
pub const MENU_LINK_TEXT: &str = "Menu";

/// Text of the link to the page footer.
pub const FOOTER_LINK_TEXT: &str = "Pied de page";

/// Accessible label of the skip links navigation.
pub const NAV_LABEL: &str = "Accès rapide";

/// Element ids targeted by the default links, in render order.
pub const DEFAULT_ANCHORS: [&str; 3] = ["content", "header", "footer"];

/// Whether the host is running its test suite.
///
/// The presence check only runs in [`ExecutionMode::Test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Normal serving.
    #[default]
    Production,
    /// Test execution; pages without skip links fail to render.
    Test,
}

impl ExecutionMode {
    /// Check if this is test execution.
    #[must_use]
    pub fn is_test(self) -> bool {
        matches!(self, Self::Test)
    }
}

/// One skip link: visible text and the id it jumps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipLink {
    /// Visible link text.
    pub text: String,
    /// Target element id, without `#`.
    pub anchor: String,
}

impl SkipLink {
    /// Create a skip link.
    #[must_use]
    pub fn new(text: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: anchor.into(),
        }
    }

    /// Whether the anchor targets a tab panel.
    #[must_use]
    pub fn is_tab(&self) -> bool {
        self.anchor.starts_with(TAB_PREFIX)
    }

    /// Render as a list item.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SkipLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let anchor = escape_html(&self.anchor);
        write!(f, "<li><a href=\"#{anchor}\" class=\"{LINK_CLASS}\"")?;
        if self.is_tab() {
            write!(f, " data-anchor=\"{anchor}\"")?;
        }
        write!(f, ">{}</a></li>", escape_html(&self.text))
    }
}

/// Render one skip link list item.
#[must_use]
pub fn skip_link(text: &str, anchor: &str) -> String {
    SkipLink::new(text, anchor).render()
}

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap rendered list items in the skip links navigation block.
#[must_use]
pub fn wrap_block(items: &str) -> String {
    format!(
        "<div class=\"fr-skiplinks\">\n  \
         <nav class=\"fr-container\" role=\"navigation\" aria-label=\"{NAV_LABEL}\">\n    \
         <ul class=\"fr-skiplinks__list\">\n      \
         {items}\n    \
         </ul>\n  \
         </nav>\n\
         </div>\n"
    )
}

/// Renders skip links for one page.
///
/// Holds the page's settings, content slots, route and execution mode.
#[derive(Debug)]
pub struct Renderer<'a, S> {
    config: &'a Config,
    slots: &'a S,
    mode: ExecutionMode,
    route: Option<RouteId>,
}

impl<'a, S: SlotLookup> Renderer<'a, S> {
    /// Create a renderer in production mode with no route context.
    #[must_use]
    pub fn new(config: &'a Config, slots: &'a S) -> Self {
        Self {
            config,
            slots,
            mode: ExecutionMode::default(),
            route: None,
        }
    }

    /// Set the execution mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the route of the page being rendered.
    #[must_use]
    pub fn with_route(mut self, route: RouteId) -> Self {
        self.route = Some(route);
        self
    }

    /// The three default links: content, header, footer.
    #[must_use]
    pub fn default_skip_links(&self) -> String {
        let content_text = self.content_skip_link_text();
        let texts = [content_text.as_str(), MENU_LINK_TEXT, FOOTER_LINK_TEXT];
        texts
            .iter()
            .zip(DEFAULT_ANCHORS)
            .map(|(text, anchor)| skip_link(text, anchor))
            .collect()
    }

    /// The page's skip links, or the defaults.
    ///
    /// A blank `skip_links` slot counts as not filled.
    ///
    /// Falling back to the defaults runs the presence check first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SkipLinksNotDefined`] in test mode when the
    /// page's route is not whitelisted and validation is enabled.
    pub fn skip_links_content(&self) -> Result<String> {
        if let Some(content) = self.slots.present(SKIP_LINKS_SLOT) {
            return Ok(content);
        }
        self.validate()?;
        Ok(self.default_skip_links())
    }

    /// Text of the "skip to content" link.
    #[must_use]
    pub fn content_skip_link_text(&self) -> String {
        self.slots
            .present(CONTENT_SKIP_LINK_TEXT_SLOT)
            .unwrap_or_else(|| DEFAULT_CONTENT_SKIP_LINK_TEXT.to_string())
    }

    /// The full skip links navigation block.
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::skip_links_content`].
    pub fn render_block(&self) -> Result<String> {
        Ok(wrap_block(&self.skip_links_content()?))
    }

    /// Run the presence check if this render is subject to it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SkipLinksNotDefined`] when the check fails.
    pub fn validate(&self) -> Result<()> {
        if !self.mode.is_test() {
            return Ok(());
        }
        let Some(route) = &self.route else {
            debug!("No route context, skipping skip links validation");
            return Ok(());
        };
        if self.config.disable_validation {
            debug!(route = %route, "Skip links validation disabled");
            return Ok(());
        }

        let has_custom_links = self.slots.present(SKIP_LINKS_SLOT).is_some();
        SkipLinksChecker::new(route.clone(), has_custom_links).perform(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigStore;
    use crate::slots::{ContentSlots, NoSlots};
    use proptest::prelude::*;

    fn test_route() -> RouteId {
        RouteId::new("test_controller", "test_action")
    }

    #[test]
    fn test_skip_link_basic() {
        let result = skip_link("Test Link", "test-anchor");
        assert!(result.contains(r##"<a href="#test-anchor" class="fr-link""##));
        assert!(result.contains("Test Link"));
        assert!(!result.contains("data-anchor"));
        assert!(result.starts_with("<li>"));
        assert!(result.ends_with("</li>"));
    }

    #[test]
    fn test_skip_link_tab_prefix() {
        let result = skip_link("Tab Link", "tab-test");
        assert_eq!(
            result,
            r##"<li><a href="#tab-test" class="fr-link" data-anchor="tab-test">Tab Link</a></li>"##
        );
    }

    #[test]
    fn test_skip_link_prefix_must_lead() {
        assert!(!skip_link("x", "my-tab-test").contains("data-anchor"));
        assert!(!skip_link("x", "tab").contains("data-anchor"));
    }

    #[test]
    fn test_skip_link_escapes_text() {
        let result = skip_link("<b>Menu</b> & co", "header");
        assert!(result.contains("&lt;b&gt;Menu&lt;/b&gt; &amp; co"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a"b'c"#), "a&quot;b&#39;c");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_content_skip_link_text_default() {
        let config = Config::default();
        let renderer = Renderer::new(&config, &NoSlots);
        assert_eq!(renderer.content_skip_link_text(), "Aller au contenu");
    }

    #[test]
    fn test_content_skip_link_text_override() {
        let config = Config::default();
        let slots = ContentSlots::new().with(CONTENT_SKIP_LINK_TEXT_SLOT, "Custom");
        let renderer = Renderer::new(&config, &slots);
        assert_eq!(renderer.content_skip_link_text(), "Custom");
    }

    #[test]
    fn test_default_skip_links() {
        let config = Config::default();
        let result = Renderer::new(&config, &NoSlots).default_skip_links();

        assert!(result.contains("Aller au contenu"));
        assert!(result.contains("Menu"));
        assert!(result.contains("Pied de page"));
        assert_eq!(result.matches("<li>").count(), 3);

        let content = result.find(r##"href="#content""##).unwrap();
        let header = result.find(r##"href="#header""##).unwrap();
        let footer = result.find(r##"href="#footer""##).unwrap();
        assert!(content < header && header < footer);
    }

    #[test]
    fn test_default_skip_links_use_overridden_text() {
        let config = Config::default();
        let slots = ContentSlots::new().with(CONTENT_SKIP_LINK_TEXT_SLOT, "Aller au formulaire");
        let result = Renderer::new(&config, &slots).default_skip_links();

        assert!(result.starts_with(
            r##"<li><a href="#content" class="fr-link">Aller au formulaire</a></li>"##
        ));
        assert!(!result.contains("Aller au contenu"));
    }

    #[test]
    fn test_skip_links_content_uses_slot() {
        let config = Config::default();
        let custom = "<li><a href='#custom'>Custom</a></li>";
        let slots = ContentSlots::new().with(SKIP_LINKS_SLOT, custom);
        let renderer = Renderer::new(&config, &slots)
            .with_mode(ExecutionMode::Test)
            .with_route(test_route());

        assert_eq!(renderer.skip_links_content().unwrap(), custom);
    }

    #[test]
    fn test_blank_slots_fall_back_to_defaults() {
        let config = Config::default();
        let slots = ContentSlots::new()
            .with(SKIP_LINKS_SLOT, "   ")
            .with(CONTENT_SKIP_LINK_TEXT_SLOT, "");
        let renderer = Renderer::new(&config, &slots);

        assert_eq!(renderer.content_skip_link_text(), DEFAULT_CONTENT_SKIP_LINK_TEXT);
        let result = renderer.skip_links_content().unwrap();
        assert_eq!(result.matches("<li>").count(), 3);
        assert!(result.contains("Aller au contenu"));
    }

    #[test]
    fn test_blank_skip_links_slot_fails_in_test_mode() {
        crate::logging::init_test_logging();
        let config = Config::default();
        let slots = ContentSlots::new().with(SKIP_LINKS_SLOT, "\n");
        let renderer = Renderer::new(&config, &slots)
            .with_mode(ExecutionMode::Test)
            .with_route(test_route());

        let err = renderer.skip_links_content().unwrap_err();
        assert!(err.is_missing_skip_links());
    }

    #[test]
    fn test_skip_links_content_defaults_in_production() {
        let config = Config::default();
        let renderer = Renderer::new(&config, &NoSlots).with_route(test_route());

        let result = renderer.skip_links_content().unwrap();
        assert!(result.contains("Aller au contenu"));
        assert!(result.contains("Menu"));
        assert!(result.contains("Pied de page"));
    }

    #[test]
    fn test_skip_links_content_fails_in_test_mode() {
        let config = Config::default();
        let renderer = Renderer::new(&config, &NoSlots)
            .with_mode(ExecutionMode::Test)
            .with_route(test_route());

        let err = renderer.skip_links_content().unwrap_err();
        assert!(err.is_missing_skip_links());
        assert!(err.to_string().contains("test_controller#test_action"));
    }

    #[test]
    fn test_skip_links_content_whitelisted_in_test_mode() {
        let mut store = ConfigStore::new();
        store.configure(|config| {
            config.whitelisted_routes = vec!["test_controller#test_action".into()];
        });
        let renderer = Renderer::new(store.get(), &NoSlots)
            .with_mode(ExecutionMode::Test)
            .with_route(test_route());

        assert!(renderer.skip_links_content().is_ok());
    }

    #[test]
    fn test_validation_disabled() {
        let mut store = ConfigStore::new();
        store.configure(|config| config.disable_validation = true);
        let renderer = Renderer::new(store.get(), &NoSlots)
            .with_mode(ExecutionMode::Test)
            .with_route(test_route());

        assert!(renderer.validate().is_ok());
        assert!(renderer.skip_links_content().is_ok());
    }

    #[test]
    fn test_validation_skipped_without_route() {
        let config = Config::default();
        let renderer = Renderer::new(&config, &NoSlots).with_mode(ExecutionMode::Test);
        assert!(renderer.validate().is_ok());
    }

    #[test]
    fn test_validation_skipped_in_production() {
        let config = Config::default();
        let renderer = Renderer::new(&config, &NoSlots).with_route(test_route());
        assert!(renderer.validate().is_ok());
    }

    #[test]
    fn test_render_block() {
        let config = Config::default();
        let block = Renderer::new(&config, &NoSlots).render_block().unwrap();

        assert!(block.starts_with("<div class=\"fr-skiplinks\">"));
        assert!(block.contains("aria-label=\"Accès rapide\""));
        assert!(block.contains("<ul class=\"fr-skiplinks__list\">"));
        assert!(block.contains(r##"href="#footer""##));
    }

    #[test]
    fn test_execution_mode_default() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Production);
        assert!(ExecutionMode::Test.is_test());
        assert!(!ExecutionMode::Production.is_test());
    }

    proptest! {
        #[test]
        fn test_plain_anchor_has_no_data_attribute(
            text in "[A-Za-z ]{0,20}",
            anchor in "[a-z0-9_-]{0,20}",
        ) {
            prop_assume!(!anchor.starts_with(TAB_PREFIX));
            prop_assert!(!skip_link(&text, &anchor).contains("data-anchor="));
        }

        #[test]
        fn test_tab_anchor_has_data_attribute(
            text in "[A-Za-z ]{0,20}",
            suffix in "[a-z0-9_-]{0,20}",
        ) {
            let anchor = format!("{TAB_PREFIX}{suffix}");
            let expected = format!("data-anchor=\"{anchor}\"");
            prop_assert!(skip_link(&text, &anchor).contains(&expected));
        }
    }
}
