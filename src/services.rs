pub mod articles;
pub mod keyword_extraction;
pub mod keywords;
pub mod matching;
pub mod roadmap_rewrite;
pub mod scrapper;
pub mod topics;
