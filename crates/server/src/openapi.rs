use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct DealDoc {
    pub id: u64,
    pub seller: String,
    pub buyer: String,
    pub country: String,
    pub technology: String,
    pub capacity: i64,
    pub term: String,
    pub date: String,
}

/// Create/update body; `capacity` may also be sent as a numeric string.
#[derive(ToSchema)]
pub struct DealInputDoc {
    pub seller: String,
    pub buyer: String,
    pub country: String,
    pub technology: String,
    pub capacity: i64,
    pub term: String,
    pub date: String,
}

#[derive(ToSchema)]
pub struct DealEnvelopeDoc { pub data: DealDoc }

#[derive(ToSchema)]
pub struct DealListEnvelopeDoc { pub data: Vec<DealDoc> }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::deals::list,
        crate::routes::deals::get,
        crate::routes::deals::create,
        crate::routes::deals::update,
        crate::routes::deals::delete,
    ),
    components(
        schemas(
            HealthResponse,
            DealDoc,
            DealInputDoc,
            DealEnvelopeDoc,
            DealListEnvelopeDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "deals")
    )
)]
pub struct ApiDoc;
