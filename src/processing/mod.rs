//! Text processing and analysis module

pub mod advisor;
pub mod analyzer;
pub mod entities;
pub mod job_matcher;
pub mod lexicon;
pub mod matcher;
pub mod parser;
pub mod text_processor;
