//! Extraction of structured artifacts from free-form model output.
//!
//! Two extractors live here:
//! - code_blocks: pulls fenced code regions out of a build transcript
//! - json: locates and parses the first balanced JSON object in a reply

pub mod code_blocks;
pub mod json;

pub use code_blocks::{Artifact, extract_code_blocks};
pub use json::{extract_json_object, parse_json_object};
