use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::{
    models::UserFields,
    services::UserService,
    utils::response::{error_response, ApiResponse},
};

/// POST /api/users - Cria um novo usuário
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserFields,
    responses(
        (status = 201, description = "User created; envelope `data` holds the record"),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn create_user(
    service: web::Data<UserService>,
    body: web::Json<UserFields>,
) -> impl Responder {
    log::info!("📝 POST /api/users");

    match service.create(body.into_inner()).await {
        Ok(user) => ApiResponse::ok(StatusCode::CREATED, "User created successfully", user).into_response(),
        Err(e) => error_response("Create user", &e),
    }
}

/// GET /api/users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every user in `data`, with `count`"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn list_users(service: web::Data<UserService>) -> impl Responder {
    match service.list_all().await {
        Ok(users) => {
            log::info!("📋 Listed {} users", users.len());
            let count = users.len();
            ApiResponse::ok(StatusCode::OK, "Users retrieved successfully", users)
                .with_count(count)
                .into_response()
        }
        Err(e) => error_response("List users", &e),
    }
}

/// GET /api/users/{id} - Busca usuário por ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier (8-4-4-4-12 hex)")),
    responses(
        (status = 200, description = "User found"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(service: web::Data<UserService>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match service.get_by_id(&user_id).await {
        Ok(user) => ApiResponse::ok(StatusCode::OK, "User retrieved successfully", user).into_response(),
        Err(e) => error_response(&format!("Get user {}", user_id), &e),
    }
}

/// PUT /api/users/{id} - Atualiza usuário
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier (8-4-4-4-12 hex)")),
    request_body = UserFields,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Malformed identifier, validation error or duplicate email"),
        (status = 404, description = "User not found")
    )
)]
pub async fn replace_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<UserFields>,
) -> impl Responder {
    let user_id = path.into_inner();
    log::info!("🔧 PUT /api/users/{}", user_id);

    match service.replace_by_id(&user_id, body.into_inner()).await {
        Ok(user) => ApiResponse::ok(StatusCode::OK, "User updated successfully", user).into_response(),
        Err(e) => error_response(&format!("Replace user {}", user_id), &e),
    }
}

/// PATCH /api/users/{id} - Atualização parcial
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier (8-4-4-4-12 hex)")),
    request_body = UserFields,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Malformed identifier, validation error or duplicate email"),
        (status = 404, description = "User not found")
    )
)]
pub async fn patch_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<UserFields>,
) -> impl Responder {
    let user_id = path.into_inner();
    log::info!("🔧 PATCH /api/users/{}", user_id);

    match service.patch_by_id(&user_id, body.into_inner()).await {
        Ok(user) => ApiResponse::ok(StatusCode::OK, "User updated successfully", user).into_response(),
        Err(e) => error_response(&format!("Patch user {}", user_id), &e),
    }
}

/// DELETE /api/users/{id} - Remove usuário
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier (8-4-4-4-12 hex)")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(service: web::Data<UserService>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    log::info!("🗑️  DELETE /api/users/{}", user_id);

    match service.delete_by_id(&user_id).await {
        Ok(()) => ApiResponse::message(StatusCode::OK, "User deleted successfully").into_response(),
        Err(e) => error_response(&format!("Delete user {}", user_id), &e),
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpResponse {
    ApiResponse::failure(StatusCode::NOT_FOUND, "Route not found").into_response()
}

/// Converts malformed JSON bodies into the standard 400 envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            log::warn!("⚠️  Rejected request body: {}", err);
            let response = ApiResponse::failure(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", err))
                .into_response();
            actix_web::error::InternalError::from_response(err, response).into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .app_data(json_config())
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(replace_user))
            .route("/{id}", web::patch().to(patch_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
