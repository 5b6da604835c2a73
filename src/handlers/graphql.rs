use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};

use crate::schema::ApiSchema;

/// Executes a GraphQL request. The schema carries the application state, so
/// this handler is a thin JSON adapter.
pub async fn graphql_handler(
    State(schema): State<ApiSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request).await)
}

/// Serves the GraphQL playground on GET.
pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
