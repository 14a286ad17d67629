//! Authentication API used to demonstrate routedoc.

pub mod models;

use axum::Json;
use routedoc::option;
use routedoc::{Router, SecurityScheme, Server};

use models::{
    DeleteAccountRequest, ErrorResponse, LoginRequest, MessageResponse, RefreshTokenRequest,
    RegisterRequest, Response, Token, UpdatePasswordRequest, UpdateProfileRequest, User,
    ValidationResponse,
};

async fn login(Json(body): Json<LoginRequest>) -> Json<Response<Token>> {
    tracing::info!(username = %body.username, "login");
    Json(Response {
        status: 200,
        data: Token {
            access_token: format!("access-{}", body.username),
            refresh_token: format!("refresh-{}", body.username),
        },
    })
}

async fn me() -> Json<Response<User>> {
    Json(Response {
        status: 200,
        data: User {
            id: 1,
            username: "demo".to_string(),
            email: "demo@example.com".to_string(),
        },
    })
}

async fn placeholder() -> &'static str {
    "This is a dummy handler"
}

/// Build the documented router.
pub fn app() -> Router {
    let r: Router = Router::new([
        option::with_title("My API"),
        option::with_version("1.0.0"),
        option::with_description("This is a sample API"),
        option::with_docs_path("/docs"),
        option::with_server(Server::new("http://localhost:3000").with_description("Local Server")),
        option::with_security("bearerAuth", SecurityScheme::bearer_with_format("JWT")),
        option::with_debug(true),
        option::with_logger(routedoc::prelude::TracingLogger),
    ]);

    let v1 = r.group("/api").group("/v1");

    v1.route("/auth", |r| {
        r.with([option::group_tags(["Authentication"])]);

        r.post("/login", login).with([
            option::summary("User Login"),
            option::description("Endpoint for user login"),
            option::request::<LoginRequest>(),
            option::response::<Response<Token>>(200),
            option::response::<ErrorResponse>(400),
            option::response::<ValidationResponse>(422),
        ]);
        r.post("/register", placeholder).with([
            option::summary("User Registration"),
            option::description("Endpoint for user registration"),
            option::request::<RegisterRequest>(),
            option::response::<Response<Token>>(201),
            option::response::<ErrorResponse>(400),
            option::response::<ValidationResponse>(422),
        ]);
        r.post("/refresh-token", placeholder).with([
            option::summary("Refresh Access Token"),
            option::description("Endpoint to refresh access token using refresh token"),
            option::request::<RefreshTokenRequest>(),
            option::response::<Response<Token>>(200),
            option::response::<ErrorResponse>(400),
            option::response::<ErrorResponse>(401),
            option::response::<ValidationResponse>(422),
        ]);

        let auth = r.group("/");
        auth.with([option::group_security("bearerAuth", Vec::<String>::new())]);
        auth.get("/me", me).with([
            option::summary("Get User Profile"),
            option::description("Endpoint to get the authenticated user's profile"),
            option::tags(["Profile"]),
            option::response::<Response<User>>(200),
            option::response::<ErrorResponse>(401),
        ]);
        auth.get("/logout", placeholder).with([
            option::summary("User Logout"),
            option::description("Endpoint for user logout"),
            option::response::<MessageResponse>(200),
            option::response::<ErrorResponse>(401),
        ]);
    });

    v1.route("/profile", |r| {
        r.with([
            option::group_tags(["Profile"]),
            option::group_security("bearerAuth", Vec::<String>::new()),
        ]);

        r.put("/update", placeholder).with([
            option::summary("Update User Profile"),
            option::description("Endpoint to update the user's profile"),
            option::request::<UpdateProfileRequest>(),
            option::response::<Response<User>>(200),
            option::response::<ErrorResponse>(400),
            option::response::<ValidationResponse>(422),
        ]);
        r.put("/password", placeholder).with([
            option::summary("Update Password"),
            option::description("Endpoint to update the user's password"),
            option::request::<UpdatePasswordRequest>(),
            option::response::<MessageResponse>(200),
            option::response::<ErrorResponse>(400),
            option::response::<ValidationResponse>(422),
        ]);
        r.post("/delete-account", placeholder).with([
            option::summary("Delete User Account"),
            option::description("Endpoint to delete the user's account"),
            option::request::<DeleteAccountRequest>(),
            option::response::<MessageResponse>(200),
            option::response::<ErrorResponse>(400),
            option::response::<ValidationResponse>(422),
        ]);
    });

    r
}
