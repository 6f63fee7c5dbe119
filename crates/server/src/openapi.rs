use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct TokenDoc { pub token: String }

#[derive(utoipa::ToSchema)]
pub struct CredentialsDoc { pub username: String, pub password: String }

/// Attributes are stored as sent; sizes and prices are usually numbers or strings.
#[derive(utoipa::ToSchema)]
pub struct ShoeDoc {
    pub id: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub size: Option<f64>,
    pub color: Option<String>,
    pub price: Option<f64>,
}

#[derive(utoipa::ToSchema)]
pub struct NewShoeDoc {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub size: Option<f64>,
    pub color: Option<String>,
    pub price: Option<f64>,
}

/// Omitted fields keep their stored value; `null` clears them.
#[derive(utoipa::ToSchema)]
pub struct ShoePatchDoc {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub size: Option<f64>,
    pub color: Option<String>,
    pub price: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::welcome,
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::shoes::list,
        crate::routes::shoes::get,
        crate::routes::shoes::create,
        crate::routes::shoes::update,
        crate::routes::shoes::delete,
        crate::routes::shoes::search,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            MessageDoc,
            TokenDoc,
            CredentialsDoc,
            ShoeDoc,
            NewShoeDoc,
            ShoePatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "shoes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in ["/", "/health", "/register", "/login", "/shoes", "/shoes/{id}", "/search-shoes"] {
            assert!(paths.contains(&p), "missing {p}");
        }
    }
}
