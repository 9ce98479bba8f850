pub mod gitlab_webhook;
pub mod health_route;
pub mod similar_reviews;
