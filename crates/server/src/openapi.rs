use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct DeviceDoc {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub model: String,
}

#[derive(ToSchema)]
pub struct NewDeviceDoc {
    pub name: String,
    pub brand: String,
    pub model: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::devices::create,
        crate::routes::devices::get,
        crate::routes::devices::delete,
    ),
    components(
        schemas(
            HealthResponse,
            DeviceDoc,
            NewDeviceDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "devices")
    )
)]
pub struct ApiDoc;
