//! Skill and field extraction from raw document text

pub mod vocabulary;
pub mod skills;
pub mod fields;

pub use fields::{ContactInfo, ExperienceTier, ResumeProfile};
pub use skills::SkillSet;
pub use vocabulary::{SynonymMap, Vocabulary};
