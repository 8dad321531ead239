use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Users API",
    version = "0.1.0",
    description = "Create, edit and look up users"
))]
struct ServiceInfo;

/// Service document: title and version, plus every domain's paths
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceInfo::openapi();
        doc.merge(domain_users::ApiDoc::openapi());
        doc
    }
}
