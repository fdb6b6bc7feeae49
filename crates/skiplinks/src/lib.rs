//! `skiplinks` - Accessible skip links for server-rendered web pages
//!
//! Renders the skip links of the French government design system (DSFR) and,
//! during test execution, checks that every page either defines its own skip
//! links or is explicitly whitelisted.
//!
//! ```
//! use skiplinks::{ConfigStore, ContentSlots, ExecutionMode, Renderer, RouteId};
//!
//! let mut store = ConfigStore::new();
//! store.configure(|config| config.whitelisted_routes.push("pages#home".into()));
//!
//! let slots = ContentSlots::new();
//! let html = Renderer::new(store.get(), &slots)
//!     .with_mode(ExecutionMode::Test)
//!     .with_route(RouteId::new("pages", "home"))
//!     .skip_links_content()?;
//! assert!(html.contains("Aller au contenu"));
//! # Ok::<(), skiplinks::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod logging;
pub mod render;
pub mod route;
pub mod slots;

pub use checker::{check, SkipLinksChecker};
pub use config::{Config, ConfigStore};
pub use error::{Error, Result};
pub use install::{InstallReport, Installer};
pub use logging::init_logging;
pub use render::{skip_link, ExecutionMode, Renderer, SkipLink};
pub use route::RouteId;
pub use slots::{ContentSlots, NoSlots, SlotLookup};
