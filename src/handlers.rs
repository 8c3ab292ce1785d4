pub mod article_handlers;
pub mod roadmap_handlers;
