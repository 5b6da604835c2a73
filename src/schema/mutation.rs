use async_graphql::{Context, Object};
use tracing::{info, warn};

use crate::cache::keys;
use crate::errors::ServiceError;
use crate::schema::types::{
    CreateCustomerInput, CreateCustomerPayload, CreateOrderInput, CreateOrderPayload, Customer,
    Order,
};
use crate::AppState;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Creates a customer. A duplicate VAT number yields success=false
    /// without touching any state.
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        input: CreateCustomerInput,
    ) -> CreateCustomerPayload {
        let state = ctx.data_unchecked::<AppState>();

        match state.customers.create(input.into()).await {
            Ok(customer) => {
                // Only the default listing key is invalidated; searched
                // listings age out via TTL.
                let key = keys::customer_list_key(keys::DEFAULT_CUSTOMER_LIMIT);
                state.cache.delete(&key).await;

                CreateCustomerPayload {
                    success: true,
                    message: "Customer created successfully".to_string(),
                    customer: Some(Customer::from(customer)),
                }
            }
            Err(err) => {
                log_mutation_failure("create_customer", &err);
                CreateCustomerPayload {
                    success: false,
                    message: err.response_message(),
                    customer: None,
                }
            }
        }
    }

    /// Creates an order for an existing customer, then invalidates the two
    /// listing keys a fresh order must show up under: the unfiltered default
    /// listing and the default listing for that customer. Status-filtered
    /// listings are left to expire via TTL.
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        input: CreateOrderInput,
    ) -> CreateOrderPayload {
        let state = ctx.data_unchecked::<AppState>();

        match state.orders.create(input.into()).await {
            Ok(order) => {
                let all_key = keys::order_list_key(keys::DEFAULT_ORDER_LIMIT, None, None);
                let customer_key =
                    keys::order_list_key(keys::DEFAULT_ORDER_LIMIT, Some(order.customer_id), None);
                state.cache.delete(&all_key).await;
                state.cache.delete(&customer_key).await;
                info!(order_id = order.id, "Order cache invalidated");

                CreateOrderPayload {
                    success: true,
                    message: "Order created successfully".to_string(),
                    order: Some(Order::from(order)),
                }
            }
            Err(err) => {
                // Failure paths never touch the cache.
                log_mutation_failure("create_order", &err);
                CreateOrderPayload {
                    success: false,
                    message: err.response_message(),
                    order: None,
                }
            }
        }
    }
}

fn log_mutation_failure(mutation: &str, err: &ServiceError) {
    match err {
        ServiceError::DatabaseError(_) | ServiceError::InternalError(_) => {
            warn!(mutation = mutation, error = %err, "Mutation failed");
        }
        _ => {
            info!(mutation = mutation, error = %err, "Mutation rejected");
        }
    }
}
