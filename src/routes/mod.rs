use crate::utils::webutils::{json_config, path_config, query_config, validate_token};
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub mod activity;
pub mod auth;
pub mod expense;
pub mod health;
pub mod invitation;
pub mod task;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let bearer = HttpAuthentication::with_fn(validate_token);

    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config());

    cfg.service(web::scope("/health").service(health::health));

    // registered before "/api" so it is matched without the bearer check
    cfg.service(
        web::scope("/api/auth")
            .service(auth::register::register)
            .service(auth::login::login)
            .service(auth::session::refresh)
            .service(auth::session::logout),
    );

    cfg.service(
        web::scope("/api")
            .wrap(bearer)
            .service(
                web::scope("/users")
                    .service(user::me::get_me)
                    .service(user::me::update_me)
                    .service(user::me::change_password)
                    .service(user::lookup::search_users)
                    .service(user::lookup::get_user),
            )
            .service(
                web::scope("/activities")
                    .service(activity::crud::list_activities)
                    .service(activity::crud::create_activity)
                    .service(activity::crud::get_activity)
                    .service(activity::crud::update_activity)
                    .service(activity::crud::delete_activity)
                    .service(activity::participants::list_participants)
                    .service(activity::participants::remove_participant)
                    .service(activity::participants::set_participant_admin)
                    .service(activity::overview::activity_tasks)
                    .service(activity::overview::activity_expenses)
                    .service(activity::overview::activity_balances)
                    .service(activity::overview::activity_invitations),
            )
            .service(
                web::scope("/tasks")
                    .service(task::crud::create_task)
                    .service(task::crud::get_task)
                    .service(task::crud::update_task)
                    .service(task::crud::set_task_status)
                    .service(task::crud::delete_task)
                    .service(task::crud::task_expenses),
            )
            .service(
                web::scope("/expenses")
                    .service(expense::create::create_expense)
                    .service(expense::manage::set_share_status)
                    .service(expense::manage::get_expense)
                    .service(expense::manage::delete_expense),
            )
            .service(
                web::scope("/invitations")
                    .service(invitation::create::create_invitation)
                    .service(invitation::respond::list_my_invitations)
                    .service(invitation::respond::accept_invitation)
                    .service(invitation::respond::reject_invitation)
                    .service(invitation::respond::cancel_invitation),
            ),
    );
}
