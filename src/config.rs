use std::env;

#[derive(Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub avatars_bucket: String,
    pub default_avatar_file: String,
    pub public_storage_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            mongo_uri: env::var("MONGO_URI").expect("MONGO_URI must be set"),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "taskhub".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            avatars_bucket: env::var("AVATARS_BUCKET").unwrap_or_else(|_| "avatars".to_string()),
            default_avatar_file: env::var("DEFAULT_AVATAR_FILE")
                .unwrap_or_else(|_| "defaultPfp.png".to_string()),
            public_storage_url: env::var("PUBLIC_STORAGE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/storage".to_string()),
        }
    }
}
