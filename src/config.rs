use dotenv::dotenv;
use std::env;

pub struct Config {
    pub database_url: String,
    pub server_address: String,
    pub scrapper_url: String,
    pub roadmap_html_path: String,
    pub frontend_dir: String,
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL")?;
    let server_address = env::var("SERVER_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let scrapper_url =
        env::var("SCRAPPER_SERVICE_URL").unwrap_or_else(|_| "http://scrapping:9003".to_string());
    let roadmap_html_path =
        env::var("ROADMAP_HTML_PATH").unwrap_or_else(|_| "frontend/index.html".to_string());
    let frontend_dir = env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend".to_string());

    Ok(Config {
        database_url,
        server_address,
        scrapper_url,
        roadmap_html_path,
        frontend_dir,
    })
}
