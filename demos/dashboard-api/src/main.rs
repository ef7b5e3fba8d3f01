mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

#[tokio::main]
async fn main() {
    eprintln!("Initializing Shoplytics SDK...");
    let mut builder = shoplytics::AsyncShoplytics::builder();
    if let Ok(dir) = std::env::var("SHOPLYTICS_DATA_DIR") {
        builder = builder.data_dir(dir);
    }
    if let Ok(url) = std::env::var("SHOPLYTICS_EXPORT_URL") {
        builder = builder.export_url(url);
    }
    let sdk = builder
        .build()
        .await
        .expect("Failed to initialize Shoplytics SDK");
    eprintln!("SDK ready.");

    let state = Arc::new(AppState { sdk });

    let app = Router::new()
        .route("/api/v1/home", get(routes::home))
        .route("/api/v1/sales", get(routes::sales::total_sales))
        .route("/api/v1/salesgrowth", get(routes::sales::sales_growth))
        .route("/api/v1/newcustomers", get(routes::customers::new_customers))
        .route(
            "/api/v1/repeatcustomers",
            get(routes::customers::repeat_customers),
        )
        .route(
            "/api/v1/customerDistribution",
            get(routes::customers::customer_distribution),
        )
        .route("/api/v1/clvByMonth", get(routes::cohorts::clv_by_month))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    eprintln!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
