use usermanager_core::{EmptyData, FieldError, PaginationQuery};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{LoginDto, LoginResponse, RegisterUserDto};
use crate::modules::courses::model::{Course, CourseDetails, CreateCourseDto, UpdateCourseDto};
use crate::modules::roles::model::{CreateRoleDto, Role, RoleDetails, UpdateRoleDto};
use crate::modules::users::model::{
    AssignRoleDto, EnrollCourseDto, UpdateUserDto, UserDetails, UserSummary,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_paged_users,
        crate::modules::users::controller::get_all_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::assign_role,
        crate::modules::users::controller::remove_role,
        crate::modules::users::controller::enroll_course,
        crate::modules::users::controller::unenroll_course,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::get_role,
        crate::modules::roles::controller::update_role,
        crate::modules::roles::controller::delete_role,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            EmptyData,
            FieldError,
            PaginationQuery,
            RegisterUserDto,
            LoginDto,
            LoginResponse,
            UserSummary,
            UserDetails,
            UpdateUserDto,
            AssignRoleDto,
            EnrollCourseDto,
            Role,
            RoleDetails,
            CreateRoleDto,
            UpdateRoleDto,
            Course,
            CourseDetails,
            CreateCourseDto,
            UpdateCourseDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "User management, role assignment and enrollment"),
        (name = "Roles", description = "Role management"),
        (name = "Courses", description = "Course management")
    ),
    info(
        title = "User Management API",
        version = "0.1.0",
        description = "CRUD over users, roles and course enrollments with JWT bearer authentication. Every response is wrapped in a `{ data, message, success }` envelope.",
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
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
