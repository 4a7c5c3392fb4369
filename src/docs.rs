use tenantry_config::{DEFAULT_TOKEN_HEADER, JwtConfig};
use tenantry_core::{ErrorResponse, FieldError};
use tenantry_models::{Account, CreateAccountDto};
use utoipa::openapi::RefOr;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::accounts::controller::EmptyResponse;
use crate::modules::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health,
        crate::modules::accounts::controller::create_account,
        crate::modules::accounts::controller::get_accounts,
        crate::modules::accounts::controller::get_account_by_id,
    ),
    components(
        schemas(
            Account,
            CreateAccountDto,
            EmptyResponse,
            ErrorResponse,
            FieldError,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Tenant account management"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Tenantry API",
        version = "0.1.0",
        description = "Multi-tenant account management. Every /api route requires a token \
                       header; each successful call returns a renewed token, extending the \
                       session by one full lifetime.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(DEFAULT_TOKEN_HEADER))),
            )
        }
    }
}

/// The OpenAPI document with token header names taken from `jwt_config`.
///
/// Handler annotations name the default header; overridden names are
/// substituted here.
pub fn api_doc(jwt_config: &JwtConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    if let Some(components) = doc.components.as_mut() {
        components.add_security_scheme(
            "token_auth",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                jwt_config.request_header.clone(),
            ))),
        );
    }

    if jwt_config.response_header != DEFAULT_TOKEN_HEADER {
        for item in doc.paths.paths.values_mut() {
            for operation in [&mut item.get, &mut item.post].into_iter().flatten() {
                for response in operation.responses.responses.values_mut() {
                    if let RefOr::T(response) = response {
                        if let Some(header) = response.headers.remove(DEFAULT_TOKEN_HEADER) {
                            response
                                .headers
                                .insert(jwt_config.response_header.clone(), header);
                        }
                    }
                }
            }
        }
    }

    doc
}
