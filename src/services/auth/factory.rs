/// Factory: build `AccessTokenCodec` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AccessTokenCodec;

pub fn build_token_codec(config: &Config) -> Arc<AccessTokenCodec> {
    Arc::new(AccessTokenCodec::new(
        &config.secret_key,
        config.algorithm,
        &config.issuer,
        &config.audience,
        config.access_token_ttl_minutes,
        config.access_token_leeway_seconds,
    ))
}
