pub mod document;
pub mod relevance;
pub mod similarity;
pub mod taxonomy;
