pub mod config;
pub mod error;
pub mod logging;
pub mod reader;
pub mod resolver;
pub mod service;
pub mod target;
pub mod tracker;
pub mod walker;

pub use config::{Config, SettingsLayout};
pub use error::SettingsError;
pub use reader::{FileReader, SettingsMapping, SettingsSource};
pub use resolver::{CandidateFile, PriorityResolver, Resolution};
pub use service::{ApplyOutcome, HostEvent, SuperSettings};
pub use target::{syntax_name, Target, TargetId};
pub use tracker::AppliedTargets;
pub use walker::{walk, DirectoryLevel};
