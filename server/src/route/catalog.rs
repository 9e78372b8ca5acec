mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;

use application::service::{BrowseService, SearchService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;

use self::request::{SearchRequest, SearchTransformer};
use self::response::CatalogPresenter;

pub trait CatalogRouter {
    fn route_catalog(self) -> Self;
}

impl CatalogRouter for Router<AppModule> {
    fn route_catalog(self) -> Self {
        self.route(
            "/authors",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), CatalogPresenter)
                    .bypass(|| module.authors_by_name())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/authors/:name/books",
            get(
                |State(module): State<AppModule>, Path(name): Path<String>| async move {
                    Controller::new((), CatalogPresenter)
                        .bypass(|| module.books_for_author(&name))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/publishers",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), CatalogPresenter)
                    .bypass(|| module.publishers_by_name())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/publishers/:name/books",
            get(
                |State(module): State<AppModule>, Path(name): Path<String>| async move {
                    Controller::new((), CatalogPresenter)
                        .bypass(|| module.books_by_publisher(&name))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/search",
            get(
                |State(module): State<AppModule>, Query(req): Query<SearchRequest>| async move {
                    Controller::new(SearchTransformer, CatalogPresenter)
                        .intake(req)
                        .handle(|keyword| async move { module.search_books(&keyword).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
