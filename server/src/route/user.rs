mod request;
mod response;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use application::service::{AccountService, ReadingListService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;

use self::request::{AddToReadingListRequest, RegisterUserRequest, SignInRequest, UserTransformer};
use self::response::{ReadingListPresenter, SessionPresenter, UserPresenter};

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            post(
                |State(module): State<AppModule>, Json(req): Json<RegisterUserRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(req)
                        .handle(|dto| module.register(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:name",
            get(
                |State(module): State<AppModule>, Path(name): Path<String>| async move {
                    Controller::new((), UserPresenter)
                        .bypass(|| module.get_user(&name))
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/sessions",
            post(
                |State(module): State<AppModule>, Json(req): Json<SignInRequest>| async move {
                    Controller::new(UserTransformer, SessionPresenter)
                        .intake(req)
                        .handle(|(user_name, password)| async move {
                            module.authenticate(&user_name, &password).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:name/reading-list",
            get(
                |State(module): State<AppModule>, Path(name): Path<String>| async move {
                    Controller::new((), ReadingListPresenter)
                        .bypass(|| module.reading_list_for_user(&name))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 Path(name): Path<String>,
                 Json(req): Json<AddToReadingListRequest>| async move {
                    Controller::new(UserTransformer, ReadingListPresenter)
                        .intake(req)
                        .handle(|book_id| module.add_to_reading_list(&name, book_id))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:name/reading-list/:book_id",
            delete(
                |State(module): State<AppModule>,
                 Path((name, book_id)): Path<(String, i64)>| async move {
                    Controller::new((), ReadingListPresenter)
                        .bypass(|| module.remove_from_reading_list(&name, book_id))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:name/recommendations",
            get(
                |State(module): State<AppModule>, Path(name): Path<String>| async move {
                    Controller::new((), ReadingListPresenter)
                        .bypass(|| module.recommended_books(&name))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
