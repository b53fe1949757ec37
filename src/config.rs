use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StudyhubConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailConfig {
    /// Mail API endpoint. Leave empty to disable outbound mail (messages are logged instead).
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    pub from_address: String,
    /// Base URL placed in reset emails; the token is appended as a query parameter.
    pub reset_password_url: String,
}

impl Default for StudyhubConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_level: "info".to_string(),
            },
            storage: StorageConfig {
                db_path: "./data/studyhub_db".to_string(),
            },
            mail: MailConfig {
                api_url: String::new(),
                api_key: String::new(),
                from_address: "no-reply@studyhub.local".to_string(),
                reset_password_url: "http://localhost:8080/reset-password".to_string(),
            },
        }
    }
}

impl StudyhubConfig {
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => {
                        println!("Config loaded from {}", path);
                        c
                    }
                    Err(e) => {
                        eprintln!("Error parsing config: {}. Using Defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config: {}. Using Defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }
}
