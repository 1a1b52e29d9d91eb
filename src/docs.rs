use crate::common::response::ErrorBody;
use crate::middleware::api_key::API_KEY_HEADER;
use crate::modules::download::dto::{DownloadRequest, VideoDataResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(crate::modules::download::handler::download_youtube_data),
    components(schemas(DownloadRequest, VideoDataResponse, ErrorBody)),
    tags(
        (name = "Download", description = "YouTube download relay")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}
