//! GraphQL schema: the query/mutation gateway in front of the repositories
//! and the cache.

use async_graphql::{EmptySubscription, Schema};

use crate::AppState;

pub mod mutation;
pub mod query;
pub mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the shared application state injected as context
/// data.
pub fn build_schema(state: AppState) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}
