//! # Food-Truck Order Store
//!
//! A small order-taking backend for a food-truck point of sale. The customer page places
//! orders, the kitchen page moves them through `pending → preparing → ready → completed`,
//! and both talk to the JSON API served here.
//!
//! ## Core Components
//!
//! - **[model]**: [`Order`](model::Order) and its create/update payloads.
//! - **[order_actor]**: the [`ActorEntity`](resource_actor::ActorEntity) implementation and
//!   the actor constructor. One actor owns every read and write of the order collection.
//! - **[clients]**: [`OrderClient`](clients::OrderClient), the typed handle the HTTP handlers use.
//! - **[storage]**: collection backends (hosted key-value REST, unconfigured placeholder).
//! - **[lifecycle]**: [`OrderSystem`](lifecycle::OrderSystem) spawns and stops the actor.
//! - **[server]** and **[routes]**: the axum router and its handlers.
//! - **[config]**: environment configuration.
//!
//! ## Endpoints
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | GET | `/`, `/api`, `/api/health` | health and storage status |
//! | GET | `/api/orders` | every order, in stored order |
//! | POST | `/api/orders` | 201 with the created order |
//! | DELETE | `/api/orders` | clears the collection |
//! | GET | `/api/orders/{id}` | one order or 404 |
//! | PATCH | `/api/orders/{id}` | merged order or 404 |
//! | DELETE | `/api/orders/{id}` | removes the order or 404 |

pub mod clients;
pub mod clock;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod routes;
pub mod server;
pub mod state;
pub mod storage;
