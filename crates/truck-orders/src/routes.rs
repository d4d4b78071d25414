use crate::error::AppError;
use crate::model::{iso_millis, Order, OrderCreate, OrderId, OrderUpdate};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    Json,
};
use resource_actor::ActorClient;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": iso_millis::format(&state.clock.now()),
        "storage": state.storage,
    }))
}

pub async fn list_orders_handler(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state
        .orders
        .list()
        .await
        .map_err(|e| AppError::from_order(e, state.production))?;

    debug!(size = orders.len(), "Listing orders");
    Ok(Json(orders))
}

pub async fn get_order_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Order>, AppError> {
    let id = parse_id(&raw_id, &method, uri.path())?;

    state
        .orders
        .get(id)
        .await
        .map_err(|e| AppError::from_order(e, state.production))?
        .map(Json)
        .ok_or(AppError::OrderNotFound)
}

pub async fn create_order_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let params: OrderCreate = parse_body(&body, state.production)?;

    let order = state
        .orders
        .create_order(params)
        .await
        .map_err(|e| AppError::from_order(e, state.production))?;

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_order_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Json<Order>, AppError> {
    let id = parse_id(&raw_id, &method, uri.path())?;
    let update: OrderUpdate = parse_body(&body, state.production)?;

    let order = state
        .orders
        .update_order(id, update)
        .await
        .map_err(|e| AppError::from_order(e, state.production))?;

    Ok(Json(order))
}

pub async fn delete_order_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&raw_id, &method, uri.path())?;

    state
        .orders
        .delete(id)
        .await
        .map_err(|e| AppError::from_order(e, state.production))?;

    Ok(Json(json!({ "message": "Order deleted" })))
}

pub async fn clear_orders_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state
        .orders
        .clear()
        .await
        .map_err(|e| AppError::from_order(e, state.production))?;

    Ok(Json(json!({ "message": "All orders cleared" })))
}

pub async fn route_not_found_handler(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    debug!(%method, path = uri.path(), "No route");
    AppError::RouteNotFound {
        path: uri.path().to_string(),
        method: method.to_string(),
    }
}

/// A non-numeric id means no route matched, not a bad request.
fn parse_id(raw: &str, method: &Method, path: &str) -> Result<OrderId, AppError> {
    raw.parse().map_err(|_| AppError::RouteNotFound {
        path: path.to_string(),
        method: method.to_string(),
    })
}

/// An empty body reads as `{}`. `Content-Type` is not checked.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8], hide_detail: bool) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Malformed payload");
        AppError::MalformedPayload {
            detail: (!hide_detail).then(|| e.to_string()),
        }
    })
}
