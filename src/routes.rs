use actix_web::{middleware, web};

use crate::auth;
use crate::handlers::*;

/// Every application route. Everything but the login page requires a session.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        // Protected routes
        .service(
            web::scope("")
                .wrap(middleware::from_fn(auth::middleware::require_auth))
                .route("/", web::get().to(|| async { redirect("/admin") }))
                .route("/logout", web::post().to(auth_handlers::logout))
                // Events
                .route("/events", web::get().to(event_handlers::list))
                .route("/events", web::post().to(event_handlers::create))
                .route("/events/{id}/select", web::post().to(event_handlers::select))
                // Dashboard
                .route("/admin", web::get().to(dashboard::index))
                .route("/admin/refresh", web::post().to(dashboard::refresh))
                .route("/admin/config", web::get().to(event_handlers::config_form))
                .route("/admin/config", web::post().to(event_handlers::config_update))
                // Tasks: /new before /{id}
                .route("/admin/tasks", web::get().to(task_handlers::list))
                .route("/admin/tasks/new", web::get().to(task_handlers::new_form))
                .route("/admin/tasks", web::post().to(task_handlers::create))
                .route("/admin/tasks/{id}/edit", web::get().to(task_handlers::edit_form))
                .route("/admin/tasks/{id}", web::post().to(task_handlers::update))
                .route("/admin/tasks/{id}/delete", web::post().to(task_handlers::delete))
                .route("/tasks/{id}/toggle", web::post().to(task_handlers::toggle))
                // Timeline: reorder routes before /{id}
                .route("/admin/planning", web::get().to(planning_handlers::list))
                .route("/admin/planning/new", web::get().to(planning_handlers::new_form))
                .route("/admin/planning", web::post().to(planning_handlers::create))
                .route("/admin/planning/reorder/preview", web::post().to(planning_handlers::preview))
                .route("/admin/planning/reorder", web::post().to(planning_handlers::reorder))
                .route("/admin/planning/{id}/edit", web::get().to(planning_handlers::edit_form))
                .route("/admin/planning/{id}", web::post().to(planning_handlers::update))
                .route("/admin/planning/{id}/delete", web::post().to(planning_handlers::delete))
                // People
                .route("/admin/people", web::get().to(people_handlers::list))
                .route("/admin/people/new", web::get().to(people_handlers::new_form))
                .route("/admin/people", web::post().to(people_handlers::create))
                .route("/admin/people/{id}/edit", web::get().to(people_handlers::edit_form))
                .route("/admin/people/{id}", web::post().to(people_handlers::update))
                .route("/admin/people/{id}/delete", web::post().to(people_handlers::delete))
                // Vendors
                .route("/admin/vendors", web::get().to(vendor_handlers::list))
                .route("/admin/vendors/new", web::get().to(vendor_handlers::new_form))
                .route("/admin/vendors", web::post().to(vendor_handlers::create))
                .route("/admin/vendors/{id}", web::get().to(vendor_handlers::detail))
                .route("/admin/vendors/{id}/edit", web::get().to(vendor_handlers::edit_form))
                .route("/admin/vendors/{id}", web::post().to(vendor_handlers::update))
                .route("/admin/vendors/{id}/delete", web::post().to(vendor_handlers::delete))
                // Documents
                .route("/admin/documents", web::get().to(document_handlers::list))
                .route("/admin/documents/new", web::get().to(document_handlers::new_form))
                .route("/admin/documents", web::post().to(document_handlers::create))
                .route("/admin/documents/{id}/assign", web::post().to(document_handlers::assign))
                .route("/admin/documents/{id}/delete", web::post().to(document_handlers::delete))
                // Personal planning
                .route("/participants/person/{id}", web::get().to(participant_handlers::person))
                .route("/participants/vendor/{id}", web::get().to(participant_handlers::vendor)),
        );
}
