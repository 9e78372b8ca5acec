mod request;
mod response;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{BrowseService, ReviewService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;

use self::request::{CreateReviewRequest, ReviewTransformer};
use self::response::{BookPresenter, ReviewPresenter};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| module.books_by_title())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new((), BookPresenter)
                        .bypass(|| module.get_book(id))
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
            "/books/year",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| module.books_by_year(None))
                    .await
                    .map_err(ErrorStatus::from)
                    .map(|res| {
                        res.map(IntoResponse::into_response)
                            .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                    })
            }),
        )
        .route(
            "/books/year/:year",
            get(
                |State(module): State<AppModule>, Path(year): Path<i32>| async move {
                    Controller::new((), BookPresenter)
                        .bypass(|| module.books_by_year(Some(year)))
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
            "/books/:id/reviews",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<i64>,
                 Json(req): Json<CreateReviewRequest>| async move {
                    Controller::new(ReviewTransformer, ReviewPresenter)
                        .intake((id, req))
                        .handle(|dto| module.add_review(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reviews",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), ReviewPresenter)
                    .bypass(|| module.get_reviews())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
