//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::handlers::upload::UploadResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Qrdrop API",
        version = "0.1.0",
        description = "Ephemeral file drop: upload a file, get a short-lived download link plus a QR image of it. Objects disappear when their TTL lapses, whether or not anyone fetched them."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::download::download_file,
        handlers::delete::delete_file,
        handlers::health::health,
    ),
    components(schemas(UploadResponse, ErrorResponse)),
    tags(
        (name = "transfer", description = "Upload, download, and delete ephemeral objects"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
