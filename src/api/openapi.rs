//! OpenAPI document assembly for the REST surface.
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::system::service_info,
        crate::api::system::health,
        crate::api::student::list_notes,
        crate::api::student::list_books,
        crate::api::student::list_ppts,
        crate::api::student::list_projects,
        crate::api::student::list_assignments,
        crate::api::student::list_tests,
        crate::api::student::get_test,
        crate::api::student::submit_test,
        crate::api::student::register_download,
        crate::api::admin::list_students,
        crate::api::admin::create_student,
        crate::api::admin::toggle_block,
        crate::api::admin::get_permissions,
        crate::api::admin::update_permissions,
        crate::api::admin::update_scope,
        crate::api::admin::delete_student,
        crate::api::admin::list_content,
        crate::api::admin::create_content,
        crate::api::admin::update_content,
        crate::api::admin::delete_content,
        crate::api::admin::list_tests,
        crate::api::admin::create_test,
        crate::api::admin::get_test,
        crate::api::admin::update_test,
        crate::api::admin::delete_test,
        crate::api::admin::analytics,
        crate::api::admin::list_admins,
        crate::api::admin::create_admin,
        crate::api::admin::update_admin,
        crate::api::admin::delete_admin,
        crate::api::subjects::list_subjects,
        crate::api::subjects::create_subject,
        crate::api::subjects::rename_subject,
        crate::api::subjects::delete_subject,
        crate::api::bootstrap::bootstrap_superadmin,
    ),
    components(schemas(
        crate::api::types::ErrorResponse,
        crate::api::types::ServiceInfo,
        crate::api::types::HealthStatus,
        crate::api::types::MessageResponse,
        crate::api::types::ContentListResponse,
        crate::api::types::ContentResponse,
        crate::api::types::ContentCreateRequest,
        crate::api::types::TestListResponse,
        crate::api::types::TestResponse,
        crate::api::types::AdminTestListResponse,
        crate::api::types::AdminTestResponse,
        crate::api::types::TestCreateRequest,
        crate::api::types::SubmitRequest,
        crate::api::types::SubmitResponse,
        crate::api::types::StudentListResponse,
        crate::api::types::StudentResponse,
        crate::api::types::StudentCreateRequest,
        crate::api::types::ScopeUpdateRequest,
        crate::api::types::PermissionsUpdateRequest,
        crate::api::types::AdminListResponse,
        crate::api::types::AdminAccountResponse,
        crate::api::types::AdminCreateRequest,
        crate::api::types::AdminUpdateRequest,
        crate::api::types::SubjectListResponse,
        crate::api::types::SubjectResponse,
        crate::api::types::SubjectCreateRequest,
        crate::api::types::SubjectUpdateRequest,
        crate::api::types::StudentStats,
        crate::api::types::ContentStats,
        crate::api::types::Analytics,
        crate::api::types::AnalyticsResponse,
        crate::api::types::BootstrapRequest,
        crate::api::types::BootstrapResponse,
        crate::assessment::RedactedQuestion,
        crate::assessment::RedactedTest,
        crate::assessment::ScoreReport,
        crate::assessment::AnswerDetail,
        crate::assessment::SubmittedAnswer,
        crate::model::Category,
        crate::model::ContentItem,
        crate::model::ContentKind,
        crate::model::ContentUpdate,
        crate::model::Difficulty,
        crate::model::PermissionPatch,
        crate::model::PermissionSet,
        crate::model::Question,
        crate::model::QuestionInput,
        crate::model::Role,
        crate::model::Subject,
        crate::model::Test,
        crate::model::TestUpdate,
        crate::model::User,
    )),
    tags(
        (name = "system", description = "Service info and health"),
        (name = "student", description = "Scoped content access and test taking"),
        (name = "admin", description = "Student, content, and test management"),
        (name = "superadmin", description = "Admin account management"),
        (name = "subjects", description = "Subject directory"),
        (name = "internal", description = "Deployment bootstrap")
    )
)]
pub struct ApiDoc;
