use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "CRUD API for user records.\n\nEvery response uses the same envelope: `success`, `message` or `error`, optional `data` and `count`, and `status`.\n\n**Rules:**\n- name: 1-100 characters after trimming\n- email: `local@domain.tld`, stored lowercase, unique\n- age: 1-149\n- id: 8-4-4-4-12 hex"
    ),
    paths(
        crate::api::health::health_check,
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::replace_user,
        crate::api::users::patch_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::User,
            crate::models::UserFields,
        )
    ),
    tags(
        (name = "Users", description = "Create, read, update and delete user records."),
        (name = "Health", description = "Service and database health."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/users"));
        assert!(doc.paths.paths.contains_key("/api/users/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
