use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Users API",
        version = "0.1.0",
        description = "Create, list, fetch, update and delete users"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;
