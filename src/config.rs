use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongo_username: String,
    pub mongo_password: String,
    pub mongo_cluster: String,
    pub mongo_db_name: String,
    pub gemini_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .context("PORT must be a number")?,
            mongo_username: require("MONGO_USERNAME")?,
            mongo_password: require("MONGO_PASSWORD")?,
            mongo_cluster: require("MONGO_CLUSTER")?,
            mongo_db_name: require("MONGO_DB_NAME")?,
            gemini_api_key: require("GEMINI_API_KEY")?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{} must be set", name))
}
