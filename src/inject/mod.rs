//! Client installation subsystem.
//!
//! # Data Flow
//! ```text
//! composition root constructs an object
//!     → Installer::install(&mut object)
//!     → Injectable::injection_sites() (marked slots + backend names)
//!     → per site: skip if populated, else
//!         single   → ClientFactory::create_one(names[0])
//!         sequence → ClientFactory::create_many(names)
//!         mapping  → ClientFactory::create_mapped(names)
//!     → InstallReport
//! ```
//!
//! # Design Decisions
//! - Installation is an explicit call, no global registry
//! - Pre-populated slots are left alone (manual wiring wins, re-runs are no-ops)
//! - The first failing site aborts the pass; earlier sites stay installed

pub mod installer;
pub mod site;

pub use installer::{InstallReport, Installer, SiteReport, SiteState};
pub use site::{Injectable, InjectionSite, SiteShape};
