use anyhow::Result;
use tracing::warn;

use super::config_model::{
    AdminCredentials, Database, DotEnvyConfig, JwtSecret, Razorpay, Server,
};
use super::stage::Stage;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .unwrap_or_else(|_| "50".to_string())
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let jwt = JwtSecret {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    };

    let admin = AdminCredentials {
        username: std::env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME is invalid"),
        password_hash: std::env::var("ADMIN_PASSWORD_HASH")
            .expect("ADMIN_PASSWORD_HASH is invalid"),
    };

    // Online payments stay disabled when the gateway keys are absent.
    let razorpay = match (
        std::env::var("RAZORPAY_KEY_ID"),
        std::env::var("RAZORPAY_KEY_SECRET"),
    ) {
        (Ok(key_id), Ok(key_secret)) => Some(Razorpay { key_id, key_secret }),
        _ => {
            warn!("Razorpay credentials not found; online payment features will not work");
            None
        }
    };

    Ok(DotEnvyConfig {
        server,
        database,
        jwt,
        admin,
        razorpay,
        stage: get_stage(),
    })
}

pub fn get_jwt_secret() -> Result<JwtSecret> {
    dotenvy::dotenv().ok();

    Ok(JwtSecret {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(stage_str.as_str()).unwrap_or_default()
}
