//! OpenAPI documentation configuration.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Security scheme for the API (Bearer session token).
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearer_auth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("Session token")
                        .description(Some(
                            "Session token authentication. Include your token in the `Authorization` header:\n\n\
                            ```\nAuthorization: Bearer YOUR_SESSION_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        api::handlers::hotels::list_hotels,
        api::handlers::hotels::get_hotel,
        api::handlers::tickets::list_ticket_types,
        api::handlers::tickets::get_ticket,
        api::handlers::tickets::create_ticket,
        api::handlers::payments::get_payment,
        api::handlers::payments::create_payment,
    ),
    components(
        schemas(
            crate::api::models::hotels::HotelResponse,
            crate::api::models::hotels::RoomResponse,
            crate::api::models::hotels::HotelWithRoomsResponse,
            crate::api::models::tickets::TicketCreate,
            crate::api::models::tickets::TicketTypeResponse,
            crate::api::models::tickets::TicketResponse,
            crate::api::models::payments::CardData,
            crate::api::models::payments::PaymentCreate,
            crate::api::models::payments::PaymentResponse,
            crate::api::models::users::CurrentUser,
            crate::db::models::tickets::TicketStatus,
        )
    ),
    info(
        title = "eventdesk API",
        description = "Event booking backend: ticket reservation, payment processing and hotel lookup."
    )
)]
pub struct ApiDoc;
