use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::post,
    Router,
};
use tracing::info;

use crate::api::graphql::caller::caller_from_headers;
use crate::api::graphql::schema::BookingsSchema;
use crate::config::BookingsConfig;
use crate::contract::caller::ManagementToken;

#[derive(Clone)]
struct GraphqlState {
    schema: BookingsSchema,
    management: Option<(ManagementToken, String)>,
    endpoint: String,
}

async fn graphql_handler(
    State(state): State<GraphqlState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let caller = caller_from_headers(&headers, state.management.as_ref());
    state.schema.execute(req.into_inner().data(caller)).await.into()
}

async fn graphiql(State(state): State<GraphqlState>) -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(&state.endpoint).finish())
}

/// Routes for the query/mutation endpoint.
pub fn register_routes(router: Router, schema: BookingsSchema, cfg: &BookingsConfig) -> Router {
    let state = GraphqlState {
        schema,
        management: cfg.identity_provider.as_ref().map(|idp| idp.management()),
        endpoint: cfg.graphql_path.clone(),
    };

    let route = if cfg.playground {
        post(graphql_handler).get(graphiql)
    } else {
        post(graphql_handler)
    };
    info!(path = %cfg.graphql_path, playground = cfg.playground, "Registering GraphQL routes");

    router.merge(
        Router::new()
            .route(&cfg.graphql_path, route)
            .with_state(state),
    )
}
